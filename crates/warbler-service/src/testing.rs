//! Service context over in-memory backends for unit tests

use std::sync::Arc;

use warbler_cache::MemorySessionStore;
use warbler_common::SessionTokenService;
use warbler_core::{Snowflake, User, UserRepository};
use warbler_db::MemoryStore;

use crate::services::{ServiceContext, ServiceContextBuilder};

pub const SECRET: &str = "test-secret-key-that-is-long-enough";

pub fn context() -> ServiceContext {
    let store = Arc::new(MemoryStore::new());
    ServiceContextBuilder::new()
        .user_repo(store.clone())
        .follow_repo(store.clone())
        .message_repo(store)
        .session_store(Arc::new(MemorySessionStore::new()))
        .session_tokens(Arc::new(SessionTokenService::new(SECRET, 3600)))
        .build()
        .unwrap()
}

/// Insert a user directly, bypassing signup
pub async fn user(ctx: &ServiceContext, username: &str) -> Snowflake {
    let user = User::new(
        ctx.generate_id(),
        username.to_string(),
        format!("{username}@test.com"),
    );
    ctx.user_repo().create(&user, "unused").await.unwrap();
    user.id
}
