use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

/// Health check payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let db_healthy = kredit_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(ApiResponse::ok(
        "Service health",
        HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        },
    ))
}

/// Mount health check routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
