use crate::models::SkillProfile;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading users from Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only client for the account subsystem's user documents
///
/// The matching engine only needs `userId`, `skillsToTeach` and
/// `skillsToLearn`; every other profile field is ignored.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    users_collection: String,
    client: Client,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        users_collection: String,
        timeout: Duration,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            users_collection,
            client,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.users_collection
        )
    }

    /// Fetch one user's skill sets
    pub async fn get_user(&self, user_id: &str) -> Result<SkillProfile, AppwriteError> {
        let queries = vec![format!("equal(\"userId\", \"{}\")", user_id), "limit(1)".to_string()];

        tracing::debug!("Fetching skill profile for user: {}", user_id);

        let mut profiles = self.query(&queries).await?;
        if profiles.is_empty() {
            return Err(AppwriteError::NotFound(format!("User not found: {}", user_id)));
        }

        Ok(profiles.swap_remove(0))
    }

    /// Fetch up to `limit` other users that list at least one skill
    pub async fn list_candidates(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SkillProfile>, AppwriteError> {
        let queries = vec![
            format!("notEqual(\"userId\", \"{}\")", user_id),
            format!("limit({})", limit),
        ];

        let profiles: Vec<SkillProfile> = self
            .query(&queries)
            .await?
            .into_iter()
            .filter(|p| p.user_id != user_id)
            .filter(|p| !p.skills_to_teach.is_empty() || !p.skills_to_learn.is_empty())
            .collect();

        tracing::debug!("Fetched {} candidates for {}", profiles.len(), user_id);

        Ok(profiles)
    }

    async fn query(&self, queries: &[String]) -> Result<Vec<SkillProfile>, AppwriteError> {
        let queries_json = serde_json::to_string(queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let url = format!("{}?queries={}", self.documents_url(), urlencoding::encode(&queries_json));

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Appwrite query failed: {} - {}", status, body);
            return Err(AppwriteError::ApiError(format!("Failed to query users: {}", status)));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        // Extract profile data from Appwrite document format, skipping
        // documents that lack the fields we need
        Ok(documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect())
    }
}
