use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Categorized registry entry, keyed by `normalized_name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(rename = "normalizedName")]
    pub normalized_name: String,
    /// First spelling registered, casing and spacing as given
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub category: String,
    pub confidence: f64,
    pub reasoning: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Outcome of classifying one skill name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: String,
    pub confidence: f64,
    /// Keywords that contributed to the winning category, in lexicon order
    pub reasoning: Vec<String>,
}

/// The part of a user the matching engine reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "skillsToTeach", default)]
    pub skills_to_teach: Vec<String>,
    #[serde(rename = "skillsToLearn", default)]
    pub skills_to_learn: Vec<String>,
}

impl SkillProfile {
    pub fn new<I, J, S, T>(user_id: &str, teach: I, learn: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            user_id: user_id.to_string(),
            skills_to_teach: teach.into_iter().map(Into::into).collect(),
            skills_to_learn: learn.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

impl MatchStatus {
    /// Statuses that block a new match for the same pair
    pub const ACTIVE: [MatchStatus; 2] = [MatchStatus::Pending, MatchStatus::Accepted];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, MatchStatus::Pending | MatchStatus::Accepted)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, MatchStatus::Pending)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "rejected" => Ok(MatchStatus::Rejected),
            other => Err(format!("unknown match status '{}'", other)),
        }
    }
}

/// Recipient's answer to a pending match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn target_status(&self) -> MatchStatus {
        match self {
            Decision::Accept => MatchStatus::Accepted,
            Decision::Reject => MatchStatus::Rejected,
        }
    }
}

/// A proposed skill exchange between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    #[serde(rename = "fromUserId")]
    pub from_user_id: String,
    #[serde(rename = "toUserId")]
    pub to_user_id: String,
    pub status: MatchStatus,
    pub score: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// The unordered pair as (lower id, higher id)
    pub fn pair(&self) -> (&str, &str) {
        ordered_pair(&self.from_user_id, &self.to_user_id)
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.from_user_id == user_id || self.to_user_id == user_id
    }

    /// The other side of the match as seen from `user_id`
    pub fn counterpart(&self, user_id: &str) -> &str {
        if self.from_user_id == user_id {
            &self.to_user_id
        } else {
            &self.from_user_id
        }
    }
}

/// Canonical ordering of an unordered user pair
#[inline]
pub fn ordered_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Explainable form of a compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    /// Skills the first user can teach and the second wants to learn
    #[serde(rename = "aTeachesB")]
    pub a_teaches_b: Vec<String>,
    /// Skills the second user can teach and the first wants to learn
    #[serde(rename = "bTeachesA")]
    pub b_teaches_a: Vec<String>,
    #[serde(rename = "unionSize")]
    pub union_size: usize,
}

/// One entry of a ranked candidate list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub score: f64,
    /// Skills the ranking user can teach this candidate
    #[serde(rename = "canTeach")]
    pub can_teach: Vec<String>,
    /// Skills the ranking user can learn from this candidate
    #[serde(rename = "canLearn")]
    pub can_learn: Vec<String>,
}

/// What `auto_create` did with each unique normalized name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoCreateSummary {
    pub created: Vec<String>,
    pub existing: Vec<String>,
}
