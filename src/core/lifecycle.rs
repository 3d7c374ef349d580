use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{Decision, Match, MatchStatus};
use crate::services::Storage;

/// State machine for match records
///
/// ```text
/// pending ──accept──▶ accepted
///    │
///    └──reject──▶ rejected
/// ```
///
/// Only the recipient (`to_user_id`) may answer, and only while the match is
/// pending. A pair may hold one pending or accepted match at a time; a
/// rejected match does not block a new proposal.
#[derive(Clone)]
pub struct MatchLifecycle {
    storage: Arc<dyn Storage>,
}

impl MatchLifecycle {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Propose a match from `from_user_id` to `to_user_id`
    ///
    /// The conflict check and the insert are one conditional write in
    /// storage. Two concurrent proposals for the same pair, in either
    /// direction, leave exactly one pending match; the loser gets
    /// `DuplicateMatch`.
    pub async fn create(&self, from_user_id: &str, to_user_id: &str, score: f64) -> Result<Match> {
        if from_user_id == to_user_id {
            return Err(EngineError::SelfMatch);
        }

        let now = Utc::now();
        let record = Match {
            id: Uuid::new_v4(),
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            status: MatchStatus::Pending,
            score: clip_score(score),
            created_at: now,
            updated_at: now,
        };

        if !self.storage.insert_match_if_no_conflict(&record).await? {
            tracing::info!(
                "Rejected duplicate match proposal {} -> {}",
                from_user_id,
                to_user_id
            );
            return Err(EngineError::DuplicateMatch {
                from_user_id: from_user_id.to_string(),
                to_user_id: to_user_id.to_string(),
            });
        }

        tracing::info!(
            "Created match {}: {} -> {} (score {:.3})",
            record.id,
            from_user_id,
            to_user_id,
            record.score
        );

        Ok(record)
    }

    /// Answer a pending match on behalf of `by_user_id`
    pub async fn respond(&self, match_id: Uuid, by_user_id: &str, decision: Decision) -> Result<Match> {
        let record = self
            .storage
            .find_match_by_id(match_id)
            .await?
            .ok_or(EngineError::MatchNotFound(match_id))?;

        if record.status != MatchStatus::Pending {
            return Err(EngineError::InvalidStateTransition {
                match_id,
                status: record.status,
            });
        }

        if record.to_user_id != by_user_id {
            return Err(EngineError::UnauthorizedTransition {
                match_id,
                user_id: by_user_id.to_string(),
            });
        }

        let target = decision.target_status();
        let updated = self
            .storage
            .update_match_status(match_id, MatchStatus::Pending, target, Utc::now())
            .await?;

        match updated {
            Some(updated) => {
                tracing::info!("Match {} is now {} (by {})", match_id, updated.status, by_user_id);
                Ok(updated)
            }
            None => {
                // Lost a race with another response
                let status = self
                    .storage
                    .find_match_by_id(match_id)
                    .await?
                    .map(|m| m.status)
                    .ok_or(EngineError::MatchNotFound(match_id))?;
                Err(EngineError::InvalidStateTransition { match_id, status })
            }
        }
    }

    pub async fn get(&self, match_id: Uuid) -> Result<Match> {
        self.storage
            .find_match_by_id(match_id)
            .await?
            .ok_or(EngineError::MatchNotFound(match_id))
    }

    /// Active match between two users, if any
    pub async fn active_between(&self, user_a: &str, user_b: &str) -> Result<Option<Match>> {
        Ok(self
            .storage
            .find_match_by_pair(user_a, user_b, &MatchStatus::ACTIVE)
            .await?)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Match>> {
        Ok(self.storage.list_matches_for_user(user_id).await?)
    }
}

#[inline]
fn clip_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    fn lifecycle() -> MatchLifecycle {
        MatchLifecycle::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_pending() {
        let lifecycle = lifecycle();
        let created = lifecycle.create("alice", "bob", 0.75).await.unwrap();

        assert_eq!(created.status, MatchStatus::Pending);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(lifecycle.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_duplicate_in_either_direction() {
        let lifecycle = lifecycle();
        lifecycle.create("alice", "bob", 0.5).await.unwrap();

        let same = lifecycle.create("alice", "bob", 0.5).await.unwrap_err();
        assert!(matches!(same, EngineError::DuplicateMatch { .. }));

        let reversed = lifecycle.create("bob", "alice", 0.5).await.unwrap_err();
        assert!(matches!(reversed, EngineError::DuplicateMatch { .. }));
    }

    #[tokio::test]
    async fn test_accepted_blocks_and_rejected_allows_reproposal() {
        let lifecycle = lifecycle();

        let first = lifecycle.create("alice", "bob", 0.5).await.unwrap();
        lifecycle.respond(first.id, "bob", Decision::Accept).await.unwrap();
        assert!(lifecycle.create("bob", "alice", 0.5).await.is_err());

        let other = lifecycle.create("alice", "carol", 0.5).await.unwrap();
        lifecycle.respond(other.id, "carol", Decision::Reject).await.unwrap();
        let again = lifecycle.create("alice", "carol", 0.5).await.unwrap();
        assert_ne!(again.id, other.id);
    }

    #[tokio::test]
    async fn test_active_between_ignores_rejected() {
        let lifecycle = lifecycle();
        assert!(lifecycle.active_between("alice", "bob").await.unwrap().is_none());

        let proposal = lifecycle.create("alice", "bob", 0.5).await.unwrap();
        let active = lifecycle.active_between("bob", "alice").await.unwrap();
        assert_eq!(active.map(|m| m.id), Some(proposal.id));

        lifecycle.respond(proposal.id, "bob", Decision::Reject).await.unwrap();
        assert!(lifecycle.active_between("alice", "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_only_recipient_may_respond() {
        let lifecycle = lifecycle();
        let created = lifecycle.create("alice", "bob", 0.5).await.unwrap();

        for intruder in ["alice", "mallory"] {
            let err = lifecycle
                .respond(created.id, intruder, Decision::Accept)
                .await
                .unwrap_err();
            assert!(matches!(err, EngineError::UnauthorizedTransition { .. }));
        }

        let still = lifecycle.get(created.id).await.unwrap();
        assert_eq!(still.status, MatchStatus::Pending);
    }

    #[tokio::test]
    async fn test_terminal_states_are_final() {
        let lifecycle = lifecycle();
        let created = lifecycle.create("alice", "bob", 0.5).await.unwrap();

        let rejected = lifecycle.respond(created.id, "bob", Decision::Reject).await.unwrap();
        assert_eq!(rejected.status, MatchStatus::Rejected);
        assert!(rejected.updated_at >= rejected.created_at);

        let err = lifecycle
            .respond(created.id, "bob", Decision::Accept)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidStateTransition { status: MatchStatus::Rejected, .. }
        ));
    }

    #[tokio::test]
    async fn test_self_match_and_missing_match() {
        let lifecycle = lifecycle();

        assert!(matches!(
            lifecycle.create("alice", "alice", 1.0).await,
            Err(EngineError::SelfMatch)
        ));
        assert!(matches!(
            lifecycle.respond(Uuid::new_v4(), "bob", Decision::Accept).await,
            Err(EngineError::MatchNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_creates_leave_one_match() {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = MatchLifecycle::new(store.clone());

        let mut handles = Vec::new();
        for i in 0..10 {
            let lifecycle = lifecycle.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    lifecycle.create("alice", "bob", 0.5).await
                } else {
                    lifecycle.create("bob", "alice", 0.5).await
                }
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(EngineError::DuplicateMatch { .. }) => {}
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.match_count().await, 1);
    }

    #[test]
    fn test_clip_score() {
        assert_eq!(clip_score(1.5), 1.0);
        assert_eq!(clip_score(-0.1), 0.0);
        assert_eq!(clip_score(f64::NAN), 0.0);
        assert_eq!(clip_score(0.4), 0.4);
    }
}
