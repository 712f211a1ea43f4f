use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

/// Liveness probe. Never requires a token.
///
/// Answers `200` with `"status": "ok"` when the database responds and `503`
/// with `"status": "degraded"` when it does not. The active auth mode is
/// included so operators can tell a single-user deployment apart.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    let mode = state.mode().as_str();
    match state.tasks.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "mode": mode,
            "timestamp": Utc::now()
        })),
        Err(err) => {
            log::error!("health check failed: {}", err);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "mode": mode,
                "timestamp": Utc::now()
            }))
        }
    }
}
