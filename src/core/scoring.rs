use std::collections::BTreeSet;

use crate::core::normalize::normalize_skill_name;
use crate::models::{ScoreBreakdown, SkillProfile};

/// Compatibility score (0-1) between two users
///
/// Scoring formula:
/// score = (
///     |A.teach ∩ B.learn| +     # what A can teach B
///     |B.teach ∩ A.learn|       # what B can teach A
/// ) / |A.teach ∪ A.learn ∪ B.teach ∪ B.learn|
///
/// All sets hold normalized names. Swapping A and B swaps the two
/// intersections, so the score is symmetric.
pub fn compute_score(a: &SkillProfile, b: &SkillProfile) -> f64 {
    score_breakdown(a, b).score
}

/// Score plus the reciprocal skills behind it
pub fn score_breakdown(a: &SkillProfile, b: &SkillProfile) -> ScoreBreakdown {
    let a_teach = normalized_set(&a.skills_to_teach);
    let a_learn = normalized_set(&a.skills_to_learn);
    let b_teach = normalized_set(&b.skills_to_teach);
    let b_learn = normalized_set(&b.skills_to_learn);

    let a_teaches_b: Vec<String> = a_teach.intersection(&b_learn).cloned().collect();
    let b_teaches_a: Vec<String> = b_teach.intersection(&a_learn).cloned().collect();

    let union_size = a_teach
        .iter()
        .chain(&a_learn)
        .chain(&b_teach)
        .chain(&b_learn)
        .collect::<BTreeSet<_>>()
        .len();

    let score = if union_size == 0 {
        0.0
    } else {
        let reciprocal = (a_teaches_b.len() + b_teaches_a.len()) as f64;
        (reciprocal / union_size as f64).clamp(0.0, 1.0)
    };

    ScoreBreakdown {
        score,
        a_teaches_b,
        b_teaches_a,
        union_size,
    }
}

/// Distinct normalized names, empty results dropped
#[inline]
fn normalized_set(names: &[String]) -> BTreeSet<String> {
    names
        .iter()
        .map(|name| normalize_skill_name(name))
        .filter(|name| !name.is_empty())
        .collect()
}
