//! Message handlers

use axum::{extract::State, Json};
use warbler_service::{
    dto::{CreateMessageRequest, MessageResponse},
    MessageService,
};

use crate::extractors::{CurrentSession, MessageIdPath, SnowflakePath, ValidatedForm};
use crate::response::{ApiError, ApiResult, Found};
use crate::state::AppState;

/// Post a message as the signed-in user
///
/// POST /messages/new
///
/// The form rejection is held until the session is checked, so anonymous
/// callers are redirected whatever they send.
pub async fn create_message(
    State(state): State<AppState>,
    session: CurrentSession,
    form: Result<ValidatedForm<CreateMessageRequest>, ApiError>,
) -> ApiResult<Found> {
    let author_id = session.require_auth()?;
    let ValidatedForm(request) = form?;
    MessageService::new(state.service_context())
        .create_message(author_id, request)
        .await?;
    Ok(Found::to(format!("/users/{author_id}")))
}

/// GET /messages/{message_id}
pub async fn get_message(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<MessageIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let message_id = path.message_id()?;
    let response = MessageService::new(state.service_context())
        .get_message(message_id)
        .await?;
    Ok(Json(response))
}

/// Delete a message; only its author may
///
/// POST /messages/{message_id}/delete
pub async fn delete_message(
    State(state): State<AppState>,
    session: CurrentSession,
    SnowflakePath(path): SnowflakePath<MessageIdPath>,
) -> ApiResult<Found> {
    let requester_id = session.require_auth()?;
    let message_id = path.message_id()?;
    MessageService::new(state.service_context())
        .delete_message(message_id, requester_id)
        .await?;
    Ok(Found::to(format!("/users/{requester_id}")))
}
