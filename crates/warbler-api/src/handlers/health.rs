//! Health check handler

use axum::{extract::State, Json};
use warbler_service::dto::HealthResponse;

use crate::state::AppState;

/// Liveness probe reporting the configured backends
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.config().storage.as_str(),
        state.session_backend(),
    ))
}
