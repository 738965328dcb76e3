//! Response DTOs
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Public user fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub image_url: String,
    pub header_image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The signed-in user, including private fields
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// A user's followers or the users they follow
#[derive(Debug, Clone, Serialize)]
pub struct FollowListResponse {
    pub user: UserResponse,
    pub users: Vec<UserResponse>,
}

/// Profile page: the user, their recent messages, and the viewer's relationship
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub messages: Vec<MessageResponse>,
    pub following_count: i64,
    pub followers_count: i64,
    /// Viewer follows this user (false for anonymous viewers)
    pub is_following: bool,
    /// This user follows the viewer (false for anonymous viewers)
    pub is_followed_by: bool,
}

// ============================================================================
// Message Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Home page feed
#[derive(Debug, Clone, Serialize)]
pub struct TimelineResponse {
    pub messages: Vec<MessageResponse>,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Result of signup or login: a signed session token for the client
#[derive(Debug, Clone, Serialize)]
pub struct SessionGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: CurrentUserResponse,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub sessions: &'static str,
}

impl HealthResponse {
    pub fn healthy(storage: &'static str, sessions: &'static str) -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            storage,
            sessions,
        }
    }
}
