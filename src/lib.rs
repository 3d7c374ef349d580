//! Skill Match - skill categorization and compatibility matching engine
//!
//! This library classifies free-text skill names into a fixed set of
//! categories, scores how well two users' teach/learn lists complement each
//! other, ranks candidate partners, and manages the match request lifecycle.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    compute_score, normalize_skill_name, rank_candidates, score_breakdown, BatchClassifier, Categorizer,
    CategoryLexicon, MatchLifecycle, MatchRanker, SkillRegistry,
};
pub use error::{EngineError, Result};
pub use models::{CategoryResult, Decision, Match, MatchStatus, RankedCandidate, Skill, SkillProfile};
pub use services::{MemoryStore, Storage, StorageError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let categorizer = Categorizer::with_builtin_lexicon();
        assert_eq!(categorizer.categorize("Guitar").category, "Music");
        assert_eq!(normalize_skill_name("  Node.JS "), "nodejs");
    }
}
