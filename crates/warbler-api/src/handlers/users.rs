//! User handlers
//!
//! Profiles, follower listings, and follow/unfollow.

use axum::{extract::State, Json};
use warbler_service::{
    dto::{CurrentUserResponse, FollowListResponse, ProfileResponse},
    FollowService, UserService,
};

use crate::extractors::{CurrentSession, SnowflakePath, UserIdPath};
use crate::response::{ApiResult, Found};
use crate::state::AppState;

/// The signed-in user's account
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    session: CurrentSession,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user_id = session.require_auth()?;
    let response = UserService::new(state.service_context())
        .get_current_user(user_id)
        .await?;
    Ok(Json(response))
}

/// Public profile; anonymous viewers are allowed
///
/// GET /users/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    session: CurrentSession,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = path.user_id()?;
    let response = UserService::new(state.service_context())
        .get_profile(session.context, user_id)
        .await?;
    Ok(Json(response))
}

/// Users following `user_id`
///
/// GET /users/{user_id}/followers
pub async fn list_followers(
    State(state): State<AppState>,
    session: CurrentSession,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<FollowListResponse>> {
    session.require_auth()?;
    let user_id = path.user_id()?;
    let response = FollowService::new(state.service_context())
        .get_followers(user_id)
        .await?;
    Ok(Json(response))
}

/// Users `user_id` follows
///
/// GET /users/{user_id}/following
pub async fn list_following(
    State(state): State<AppState>,
    session: CurrentSession,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<FollowListResponse>> {
    session.require_auth()?;
    let user_id = path.user_id()?;
    let response = FollowService::new(state.service_context())
        .get_following(user_id)
        .await?;
    Ok(Json(response))
}

/// POST /users/follow/{user_id}
pub async fn follow(
    State(state): State<AppState>,
    session: CurrentSession,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Found> {
    let me = session.require_auth()?;
    let user_id = path.user_id()?;
    FollowService::new(state.service_context())
        .follow(me, user_id)
        .await?;
    Ok(Found::to(format!("/users/{me}/following")))
}

/// POST /users/stop-following/{user_id}
pub async fn stop_following(
    State(state): State<AppState>,
    session: CurrentSession,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Found> {
    let me = session.require_auth()?;
    let user_id = path.user_id()?;
    FollowService::new(state.service_context())
        .unfollow(me, user_id)
        .await?;
    Ok(Found::to(format!("/users/{me}/following")))
}
