use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::score_breakdown;
use crate::models::{
    CreateMatchRequest, ErrorResponse, HealthResponse, MatchResponse, RankRequest, RankResponse, RespondRequest,
};
use crate::routes::{accounts_error, engine_error, validation_error, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_candidates))
        .route("/matches", web::post().to(create_match))
        .route("/matches", web::get().to(list_matches))
        .route("/matches/{match_id}", web::get().to(get_match))
        .route("/matches/{match_id}/respond", web::post().to(respond_to_match));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.storage.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.storage.name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Ranked candidates endpoint
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// { "userId": "string" }
/// ```
async fn rank_candidates(state: web::Data<AppState>, req: web::Json<RankRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    let user_id = &req.user_id;

    if let Some(cache) = &state.cache {
        match cache.get(user_id).await {
            Ok(Some(cached)) => {
                tracing::debug!("Serving cached ranking for {}", user_id);
                return HttpResponse::Ok().json(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Ranking cache read failed for {}: {}", user_id, e),
        }
    }

    let user = match state.accounts.get_user(user_id).await {
        Ok(user) => user,
        Err(e) => return accounts_error(&e),
    };

    let pool = match state.accounts.list_candidates(user_id, state.max_candidates).await {
        Ok(pool) => pool,
        Err(e) => return accounts_error(&e),
    };

    let candidates = match state.ranker.rank(&user, &pool).await {
        Ok(candidates) => candidates,
        Err(e) => return engine_error(&e),
    };

    let response = RankResponse {
        user_id: user_id.clone(),
        candidates,
        pool_size: pool.len(),
    };

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.put(&response).await {
            tracing::warn!("Failed to cache ranking for {}: {}", user_id, e);
        }
    }

    tracing::info!(
        "Returning {} ranked candidates for user {} (from {} in pool)",
        response.candidates.len(),
        user_id,
        response.pool_size
    );

    HttpResponse::Ok().json(response)
}

/// Propose a match
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// { "fromUserId": "string", "toUserId": "string" }
/// ```
///
/// The score is computed here from both users' current skill sets.
async fn create_match(state: web::Data<AppState>, req: web::Json<CreateMatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    let from = match state.accounts.get_user(&req.from_user_id).await {
        Ok(user) => user,
        Err(e) => return accounts_error(&e),
    };
    let to = match state.accounts.get_user(&req.to_user_id).await {
        Ok(user) => user,
        Err(e) => return accounts_error(&e),
    };

    let breakdown = score_breakdown(&from, &to);

    match state
        .lifecycle
        .create(&req.from_user_id, &req.to_user_id, breakdown.score)
        .await
    {
        Ok(record) => {
            invalidate_rankings(&state, &[&record.from_user_id, &record.to_user_id]).await;
            HttpResponse::Created().json(MatchResponse {
                record,
                breakdown: Some(breakdown),
            })
        }
        Err(e) => engine_error(&e),
    }
}

/// Answer a pending match
///
/// POST /api/v1/matches/{match_id}/respond
///
/// Request body:
/// ```json
/// { "userId": "string", "decision": "accept|reject" }
/// ```
async fn respond_to_match(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<RespondRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    let match_id = path.into_inner();

    match state.lifecycle.respond(match_id, &req.user_id, req.decision).await {
        Ok(record) => {
            invalidate_rankings(&state, &[&record.from_user_id, &record.to_user_id]).await;
            HttpResponse::Ok().json(MatchResponse {
                record,
                breakdown: None,
            })
        }
        Err(e) => engine_error(&e),
    }
}

/// GET /api/v1/matches/{match_id}
async fn get_match(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.lifecycle.get(path.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(MatchResponse {
            record,
            breakdown: None,
        }),
        Err(e) => engine_error(&e),
    }
}

/// Get matches for a user
///
/// GET /api/v1/matches?userId={userId}
async fn list_matches(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
                retryable: false,
            });
        }
    };

    match state.lifecycle.list_for_user(user_id).await {
        Ok(matches) => HttpResponse::Ok().json(serde_json::json!({
            "userId": user_id,
            "matches": matches,
            "count": matches.len(),
        })),
        Err(e) => engine_error(&e),
    }
}

async fn invalidate_rankings(state: &AppState, user_ids: &[&str]) {
    if let Some(cache) = &state.cache {
        if let Err(e) = cache.invalidate(user_ids).await {
            tracing::warn!("Failed to invalidate cached rankings: {}", e);
        }
    }
}
