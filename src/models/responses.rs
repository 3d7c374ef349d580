use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::domain::{AutoCreateSummary, CategoryResult, Match, RankedCandidate, ScoreBreakdown, Skill};

/// One categorized input name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedName {
    pub name: String,
    #[serde(flatten)]
    pub result: CategoryResult,
}

/// Response for the categorization preview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizeResponse {
    #[serde(rename = "lexiconVersion")]
    pub lexicon_version: String,
    pub results: Vec<CategorizedName>,
    pub stats: BTreeMap<String, usize>,
}

/// Configured categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    #[serde(rename = "lexiconVersion")]
    pub lexicon_version: String,
    pub categories: Vec<String>,
    #[serde(rename = "acceptanceThreshold")]
    pub acceptance_threshold: f64,
}

/// Response for skill registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSkillsResponse {
    #[serde(flatten)]
    pub summary: AutoCreateSummary,
}

/// Registry listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillListResponse {
    pub skills: Vec<Skill>,
    pub count: usize,
}

/// Ranked candidates for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub candidates: Vec<RankedCandidate>,
    #[serde(rename = "poolSize")]
    pub pool_size: usize,
}

/// A match, with the score explanation when it was just computed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub record: Match,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default)]
    pub retryable: bool,
}
