//! Request DTOs
//!
//! Bodies arrive as HTML form posts, so optional fields may be present but
//! empty; those are treated as absent.

use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Deserialize an optional string, mapping blank input to `None`
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Account creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 30, message = "Username must be 1-30 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Message Requests
// ============================================================================

/// New message form. Length rules are applied by `MessageService` because the
/// maximum is configurable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    pub text: String,
}
