//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, home, messages, users};
use crate::state::AppState;

/// Create the router with every route
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/", get(home::timeline))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(message_routes())
}

/// Session routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// User and follow-graph routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/:user_id", get(users::get_profile))
        .route("/users/:user_id/followers", get(users::list_followers))
        .route("/users/:user_id/following", get(users::list_following))
        .route("/users/follow/:user_id", post(users::follow))
        .route("/users/stop-following/:user_id", post(users::stop_following))
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages/new", post(messages::create_message))
        .route("/messages/:message_id", get(messages::get_message))
        .route("/messages/:message_id/delete", post(messages::delete_message))
}
