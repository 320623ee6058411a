//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
///
/// Fails with `STORE_UNAVAILABLE` when the route store does not answer.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    state
        .deadline
        .run("health_check", state.routes.health_check())
        .await?;

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        store: "connected".to_string(),
    })))
}
