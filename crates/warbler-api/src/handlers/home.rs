//! Home page

use axum::{extract::State, Json};
use warbler_service::{dto::TimelineResponse, MessageService};

use crate::extractors::CurrentSession;
use crate::response::ApiResult;
use crate::state::AppState;

/// Messages by the signed-in user and everyone they follow
///
/// GET /
pub async fn timeline(
    State(state): State<AppState>,
    session: CurrentSession,
) -> ApiResult<Json<TimelineResponse>> {
    let user_id = session.require_auth()?;
    let response = MessageService::new(state.service_context())
        .timeline(user_id)
        .await?;
    Ok(Json(response))
}
