// Route exports
pub mod matches;
pub mod skills;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::{BatchClassifier, Categorizer, MatchLifecycle, MatchRanker, SkillRegistry};
use crate::error::EngineError;
use crate::models::ErrorResponse;
use crate::services::{AppwriteClient, AppwriteError, RankingCache, Storage};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub categorizer: Arc<Categorizer>,
    pub classifier: BatchClassifier,
    pub registry: SkillRegistry,
    pub ranker: MatchRanker,
    pub lifecycle: MatchLifecycle,
    pub accounts: Arc<AppwriteClient>,
    pub cache: Option<Arc<RankingCache>>,
    pub max_candidates: usize,
}

impl AppState {
    /// Wire the engine components around one storage backend
    pub fn new(
        storage: Arc<dyn Storage>,
        categorizer: Arc<Categorizer>,
        accounts: Arc<AppwriteClient>,
        cache: Option<Arc<RankingCache>>,
        max_candidates: usize,
    ) -> Self {
        Self {
            classifier: BatchClassifier::new(categorizer.clone()),
            registry: SkillRegistry::new(storage.clone(), categorizer.clone()),
            ranker: MatchRanker::new(storage.clone()),
            lifecycle: MatchLifecycle::new(storage.clone()),
            storage,
            categorizer,
            accounts,
            cache,
            max_candidates,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(skills::configure)
            .configure(matches::configure),
    );
}

pub(crate) fn validation_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
        retryable: false,
    })
}

/// Map an engine error onto an HTTP response
pub(crate) fn engine_error(err: &EngineError) -> HttpResponse {
    let (mut builder, error, status_code) = match err {
        EngineError::DuplicateMatch { .. } => (HttpResponse::Conflict(), "duplicate_match", 409),
        EngineError::InvalidStateTransition { .. } => {
            (HttpResponse::Conflict(), "invalid_state_transition", 409)
        }
        EngineError::UnauthorizedTransition { .. } => {
            (HttpResponse::Forbidden(), "unauthorized_transition", 403)
        }
        EngineError::MatchNotFound(_) => (HttpResponse::NotFound(), "match_not_found", 404),
        EngineError::SelfMatch => (HttpResponse::BadRequest(), "self_match", 400),
        EngineError::RegistryWrite { .. } => {
            (HttpResponse::ServiceUnavailable(), "registry_write_failed", 503)
        }
        EngineError::Storage(_) => (HttpResponse::ServiceUnavailable(), "storage_error", 503),
    };

    if status_code >= 500 {
        tracing::error!("Engine error: {}", err);
    } else {
        tracing::info!("Request refused: {}", err);
    }

    builder.json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
        retryable: err.is_retryable(),
    })
}

/// Map an account subsystem error onto an HTTP response
pub(crate) fn accounts_error(err: &AppwriteError) -> HttpResponse {
    match err {
        AppwriteError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "user_not_found".to_string(),
            message: message.clone(),
            status_code: 404,
            retryable: false,
        }),
        other => {
            tracing::error!("Account subsystem error: {}", other);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "accounts_unavailable".to_string(),
                message: other.to_string(),
                status_code: 502,
                retryable: true,
            })
        }
    }
}
