use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;

use crate::models::{
    CategoriesResponse, CategorizeRequest, CategorizeResponse, CategorizedName, RegisterSkillsRequest,
    RegisterSkillsResponse, SkillListResponse,
};
use crate::routes::{engine_error, validation_error, AppState};

/// Configure all skill-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/skills/categories", web::get().to(list_categories))
        .route("/skills/categorize", web::post().to(categorize))
        .route("/skills", web::post().to(register_skills))
        .route("/skills", web::get().to(list_skills));
}

/// GET /api/v1/skills/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CategoriesResponse {
        lexicon_version: state.categorizer.lexicon_version().to_string(),
        categories: state.categorizer.categories(),
        acceptance_threshold: state.categorizer.settings().acceptance_threshold,
    })
}

/// Categorization preview
///
/// POST /api/v1/skills/categorize
///
/// Request body:
/// ```json
/// { "names": ["React", "Guitar"] }
/// ```
async fn categorize(state: web::Data<AppState>, req: web::Json<CategorizeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    let results = state
        .classifier
        .iter(&req.names)
        .zip(&req.names)
        .map(|(result, name)| CategorizedName {
            name: name.clone(),
            result,
        })
        .collect();

    HttpResponse::Ok().json(CategorizeResponse {
        lexicon_version: state.categorizer.lexicon_version().to_string(),
        results,
        stats: state.classifier.category_stats(&req.names),
    })
}

/// Register skills, creating entries for names not seen before
///
/// POST /api/v1/skills
async fn register_skills(
    state: web::Data<AppState>,
    req: web::Json<RegisterSkillsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors.to_string());
    }

    match state.registry.auto_create(&req.names).await {
        Ok(summary) => {
            tracing::info!(
                "Registered skills: {} created, {} existing",
                summary.created.len(),
                summary.existing.len()
            );
            HttpResponse::Ok().json(RegisterSkillsResponse { summary })
        }
        Err(e) => engine_error(&e),
    }
}

#[derive(Debug, Deserialize)]
struct ListSkillsQuery {
    category: Option<String>,
}

/// GET /api/v1/skills?category={category}
async fn list_skills(state: web::Data<AppState>, query: web::Query<ListSkillsQuery>) -> impl Responder {
    match state.registry.list(query.category.as_deref()).await {
        Ok(skills) => HttpResponse::Ok().json(SkillListResponse {
            count: skills.len(),
            skills,
        }),
        Err(e) => engine_error(&e),
    }
}
