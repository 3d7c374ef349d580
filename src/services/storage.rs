use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Match, MatchStatus, Skill};

/// Errors that can occur in a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

/// Persistence collaborator for skills and matches
///
/// Backends must make `insert_skill_if_absent`, `insert_match_if_no_conflict`
/// and `update_match_status` atomic. Those three are the engine's only
/// concurrency contract; it holds no locks of its own.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    async fn find_skill_by_normalized_name(&self, key: &str) -> Result<Option<Skill>, StorageError>;

    /// Insert unless a skill with the same normalized name exists.
    /// Returns `true` when this call created the row.
    async fn insert_skill_if_absent(&self, skill: &Skill) -> Result<bool, StorageError>;

    /// All skills, optionally restricted to one category, by normalized name
    async fn list_skills(&self, category: Option<&str>) -> Result<Vec<Skill>, StorageError>;

    async fn find_match_by_id(&self, id: Uuid) -> Result<Option<Match>, StorageError>;

    /// Most recent match for the unordered pair in one of `statuses`
    async fn find_match_by_pair(
        &self,
        user_a: &str,
        user_b: &str,
        statuses: &[MatchStatus],
    ) -> Result<Option<Match>, StorageError>;

    /// Users that have a pending or accepted match with `user_id`
    async fn find_active_partners(&self, user_id: &str) -> Result<Vec<String>, StorageError>;

    /// Insert unless the pair already has an active match.
    /// Returns `true` when this call created the row.
    async fn insert_match_if_no_conflict(&self, record: &Match) -> Result<bool, StorageError>;

    /// Move a match from `expected` to `status`. Returns the updated match,
    /// or `None` when the match is missing or no longer in `expected`.
    async fn update_match_status(
        &self,
        id: Uuid,
        expected: MatchStatus,
        status: MatchStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Match>, StorageError>;

    /// Matches involving `user_id`, newest first
    async fn list_matches_for_user(&self, user_id: &str) -> Result<Vec<Match>, StorageError>;

    async fn health_check(&self) -> Result<bool, StorageError>;
}
