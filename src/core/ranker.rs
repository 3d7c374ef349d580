use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::scoring::score_breakdown;
use crate::error::Result;
use crate::models::{RankedCandidate, SkillProfile};
use crate::services::Storage;

/// Produces the ranked candidate list for one user
///
/// # Pipeline Stages
/// 1. Drop the user itself and repeated candidate ids
/// 2. Drop candidates with a pending or accepted match with the user
/// 3. Score the rest, dropping zero scores
/// 4. Sort by score (descending), then candidate id (ascending)
///
/// The set of active partners is read once per call. A match created between
/// that read and a later `create` is caught by the lifecycle as a duplicate.
#[derive(Clone)]
pub struct MatchRanker {
    storage: Arc<dyn Storage>,
}

impl MatchRanker {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Rank `candidate_pool` for `for_user`
    pub async fn rank(
        &self,
        for_user: &SkillProfile,
        candidate_pool: &[SkillProfile],
    ) -> Result<Vec<RankedCandidate>> {
        let active_partners: HashSet<String> = self
            .storage
            .find_active_partners(&for_user.user_id)
            .await?
            .into_iter()
            .collect();

        let ranked = rank_candidates(for_user, candidate_pool, &active_partners);

        tracing::debug!(
            "Ranked {} of {} candidates for {} ({} excluded by active matches)",
            ranked.len(),
            candidate_pool.len(),
            for_user.user_id,
            active_partners.len()
        );

        Ok(ranked)
    }
}

/// Storage-free core of `MatchRanker::rank`
pub fn rank_candidates(
    for_user: &SkillProfile,
    candidate_pool: &[SkillProfile],
    excluded: &HashSet<String>,
) -> Vec<RankedCandidate> {
    let mut seen: HashSet<String> = HashSet::new();

    let mut ranked: Vec<RankedCandidate> = candidate_pool
        .iter()
        // Stage 1: self and repeated ids
        .filter(|candidate| candidate.user_id != for_user.user_id)
        .filter(|candidate| seen.insert(candidate.user_id.clone()))
        // Stage 2: active matches
        .filter(|candidate| !excluded.contains(&candidate.user_id))
        // Stage 3: scoring
        .filter_map(|candidate| {
            let breakdown = score_breakdown(for_user, candidate);
            if breakdown.score > 0.0 {
                Some(RankedCandidate {
                    candidate_id: candidate.user_id.clone(),
                    score: breakdown.score,
                    can_teach: breakdown.a_teaches_b,
                    can_learn: breakdown.b_teaches_a,
                })
            } else {
                None
            }
        })
        .collect();

    // Stage 4: score (descending), then id (ascending)
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchLifecycle;
    use crate::services::MemoryStore;

    fn profile(id: &str, teach: &[&str], learn: &[&str]) -> SkillProfile {
        SkillProfile::new(id, teach.iter().copied(), learn.iter().copied())
    }

    fn me() -> SkillProfile {
        profile("me", &["Guitar", "Python"], &["Cooking", "Spanish"])
    }

    #[test]
    fn test_excludes_self_and_zero_scores() {
        let pool = vec![
            me(),
            profile("a", &["Cooking"], &["Guitar"]),
            profile("b", &["Painting"], &["Chess"]),
        ];

        let ranked = rank_candidates(&me(), &pool, &HashSet::new());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate_id, "a");
        assert_eq!(ranked[0].can_teach, vec!["guitar"]);
        assert_eq!(ranked[0].can_learn, vec!["cooking"]);
    }

    #[test]
    fn test_sorted_with_id_tie_break() {
        let pool = vec![
            profile("zed", &["Cooking"], &["Guitar"]),
            profile("amy", &["Cooking"], &["Guitar"]),
            profile("bob", &["Spanish"], &[]),
        ];

        let ranked = rank_candidates(&me(), &pool, &HashSet::new());
        let ids: Vec<_> = ranked.iter().map(|r| r.candidate_id.as_str()).collect();

        assert_eq!(ids, vec!["amy", "zed", "bob"]);
        assert_eq!(ranked[0].score, ranked[1].score);
        assert!(ranked[1].score > ranked[2].score);
    }

    #[test]
    fn test_duplicate_candidates_collapsed() {
        let pool = vec![
            profile("a", &["Cooking"], &["Guitar"]),
            profile("a", &["Spanish"], &[]),
        ];

        let ranked = rank_candidates(&me(), &pool, &HashSet::new());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].can_learn, vec!["cooking"]);
    }

    #[tokio::test]
    async fn test_rank_excludes_active_matches() {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = MatchLifecycle::new(store.clone());
        let ranker = MatchRanker::new(store.clone());

        let pool = vec![
            profile("a", &["Cooking"], &["Guitar"]),
            profile("b", &["Spanish"], &["Python"]),
        ];

        lifecycle.create("b", "me", 0.5).await.unwrap();

        let ranked = ranker.rank(&me(), &pool).await.unwrap();
        let ids: Vec<_> = ranked.iter().map(|r| r.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
