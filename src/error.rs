use thiserror::Error;
use uuid::Uuid;

use crate::models::MatchStatus;
use crate::services::StorageError;

/// Errors surfaced by the registry, ranker and match lifecycle
///
/// Categorization and scoring never fail; everything here comes from storage
/// or from a request the match state machine refuses.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Storage failed while upserting a skill. Entries committed earlier in
    /// the same batch are kept.
    #[error("Failed to write skill '{name}': {source}")]
    RegistryWrite {
        name: String,
        #[source]
        source: StorageError,
    },

    #[error("You already have a pending or active match with this person")]
    DuplicateMatch { from_user_id: String, to_user_id: String },

    #[error("Match {match_id} is already {status}; only pending matches can be answered")]
    InvalidStateTransition { match_id: Uuid, status: MatchStatus },

    #[error("Only the recipient of match {match_id} may respond to it (got {user_id})")]
    UnauthorizedTransition { match_id: Uuid, user_id: String },

    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("Cannot propose a match to yourself")]
    SelfMatch,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl EngineError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::RegistryWrite { .. }
                | EngineError::DuplicateMatch { .. }
                | EngineError::Storage(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
