// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ordered_pair, AutoCreateSummary, CategoryResult, Decision, Match, MatchStatus, RankedCandidate,
    ScoreBreakdown, Skill, SkillProfile,
};
pub use requests::{CategorizeRequest, CreateMatchRequest, RankRequest, RegisterSkillsRequest, RespondRequest};
pub use responses::{
    CategoriesResponse, CategorizeResponse, CategorizedName, ErrorResponse, HealthResponse, MatchResponse,
    RankResponse, RegisterSkillsResponse, SkillListResponse,
};
