//! Test fixtures and response shapes

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const TEST_PASSWORD: &str = "hunter22";

/// Signup form body
#[derive(Debug, Clone, Serialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("warbler{suffix}"),
            email: format!("warbler{suffix}@example.com"),
            password: TEST_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowList {
    pub user: UserSummary,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub id: String,
    pub text: String,
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub user: UserSummary,
    pub messages: Vec<MessageBody>,
    pub following_count: i64,
    pub followers_count: i64,
    pub is_following: bool,
    pub is_followed_by: bool,
}

#[derive(Debug, Deserialize)]
pub struct Timeline {
    pub messages: Vec<MessageBody>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
