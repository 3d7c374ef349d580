// Core engine exports
pub mod batch;
pub mod categorizer;
pub mod lexicon;
pub mod lifecycle;
pub mod normalize;
pub mod ranker;
pub mod registry;
pub mod scoring;

pub use batch::BatchClassifier;
pub use categorizer::{Categorizer, CategorizerSettings};
pub use lexicon::{CategoryDefinition, CategoryLexicon, Keyword, LexiconError, OTHER_CATEGORY};
pub use lifecycle::MatchLifecycle;
pub use normalize::normalize_skill_name;
pub use ranker::{rank_candidates, MatchRanker};
pub use registry::SkillRegistry;
pub use scoring::{compute_score, score_breakdown};
