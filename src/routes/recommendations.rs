use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;
use crate::config::RecommendationSettings;
use crate::core::{RankOptions, Recommender};
use crate::models::{ErrorResponse, ExplainRequest, HealthResponse, RecommendRequest, RecommendResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub limits: RecommendationSettings,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend))
        .route("/explain", web::post().to(explain));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "Event Recommendation Engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend events endpoint
///
/// POST /recommend
///
/// Request body:
/// ```json
/// {
///   "user_profile": {"interests": ["ai"], "skills": ["python"], "department": "CS"},
///   "past_events": [{"event_id": "p1", "category": "Technology", "rating": 5}],
///   "all_events": [{"event_id": "e1", "name": "...", "category": "...", "tags": ["..."]}],
///   "top_k": 5,
///   "order_by": "score"
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    let request_id = Uuid::new_v4();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request {}: {}", request_id, errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let RecommendRequest {
        user_profile,
        past_events,
        all_events,
        top_k,
        order_by,
    } = req.into_inner();

    if all_events.is_empty() {
        tracing::info!("Recommend request {} has an empty catalog", request_id);
        return HttpResponse::Ok().json(RecommendResponse::empty());
    }

    let options = RankOptions {
        top_k: state.limits.top_k(top_k),
        ordering: order_by.unwrap_or_default(),
    };

    tracing::info!(
        "Recommend request {}: {} events, {} past events, top_k {}",
        request_id,
        all_events.len(),
        past_events.len(),
        options.top_k
    );

    // Scoring is CPU-bound; keep it off the async workers
    let recommender = state.recommender.clone();
    let result = web::block(move || {
        recommender.recommend(&user_profile, all_events, &past_events, options, chrono::Utc::now())
    })
    .await;

    match result {
        Ok(result) => HttpResponse::Ok().json(RecommendResponse {
            recommendations: result.recommendations,
            method: Some(result.method),
            total_events: Some(result.total_events),
            past_events: Some(result.past_events),
        }),
        Err(e) => {
            tracing::error!("Recommend request {} failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Internal server error".to_string(),
                message: "Failed to generate recommendations".to_string(),
                status_code: 500,
            })
        }
    }
}

/// Explain recommendation endpoint
///
/// POST /explain
///
/// Request body:
/// ```json
/// {
///   "user_profile": {"interests": ["ai"], "department": "CS"},
///   "event": {"event_id": "e1", "category": "Technology", "tags": ["ai"]}
/// }
/// ```
async fn explain(
    state: web::Data<AppState>,
    req: web::Json<ExplainRequest>,
) -> impl Responder {
    let explanation = state.recommender.explain(&req.user_profile, &req.event);

    tracing::debug!(
        "Explained event {:?} with {} reasons",
        explanation.event_id,
        explanation.reasons.len()
    );

    HttpResponse::Ok().json(explanation)
}
