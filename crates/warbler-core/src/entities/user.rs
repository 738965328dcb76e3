//! User entity - a Warbler account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Image shown when a user has not set a profile picture
pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";

/// Image shown when a user has not set a profile header
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";

/// User entity. The credential hash never lives here; repositories keep it
/// alongside the row and hand it out through `get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        Self {
            id,
            username,
            email,
            image_url: None,
            header_image_url: None,
            bio: None,
            location: None,
            created_at: Utc::now(),
        }
    }

    /// Set the profile image, ignoring blank values
    #[must_use]
    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url.filter(|url| !url.trim().is_empty());
        self
    }

    /// Profile image or the default picture
    pub fn image_url_or_default(&self) -> &str {
        self.image_url.as_deref().unwrap_or(DEFAULT_IMAGE_URL)
    }

    /// Header image or the default hero image
    pub fn header_image_url_or_default(&self) -> &str {
        self.header_image_url
            .as_deref()
            .unwrap_or(DEFAULT_HEADER_IMAGE_URL)
    }
}
