use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::Decision;

/// Preview categorization for a batch of names
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategorizeRequest {
    #[validate(length(min = 1, max = 500))]
    pub names: Vec<String>,
}

/// Register skills in the registry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterSkillsRequest {
    #[validate(length(min = 1, max = 500))]
    pub names: Vec<String>,
}

/// Rank candidates for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1, max = 128), custom(function = "validate_user_id"))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Propose a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(length(min = 1, max = 128), custom(function = "validate_user_id"))]
    #[serde(alias = "from_user_id", rename = "fromUserId")]
    pub from_user_id: String,
    #[validate(length(min = 1, max = 128), custom(function = "validate_user_id"))]
    #[serde(alias = "to_user_id", rename = "toUserId")]
    pub to_user_id: String,
}

/// Answer a pending match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RespondRequest {
    #[validate(length(min = 1, max = 128), custom(function = "validate_user_id"))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    pub decision: Decision,
}

/// User ids are embedded in account-store query strings, so quotes and
/// backslashes are refused.
fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.contains(['"', '\\']) || user_id.chars().any(char::is_control) {
        return Err(ValidationError::new("user_id_characters"));
    }
    Ok(())
}
