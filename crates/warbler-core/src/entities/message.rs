//! Message entity - a short post ("warble") owned by its author

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum message length in characters unless configured otherwise
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 140;

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub text: String,
    pub author_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message
    pub fn new(id: Snowflake, author_id: Snowflake, text: String) -> Self {
        Self {
            id,
            text,
            author_id,
            created_at: Utc::now(),
        }
    }

    /// Validate message text against the configured maximum length.
    ///
    /// Whitespace-only text counts as empty. Length is measured in characters.
    pub fn validate_text(text: &str, max_length: usize) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyContent);
        }

        if text.chars().count() > max_length {
            return Err(DomainError::ContentTooLong { max: max_length });
        }

        Ok(())
    }

    /// Check if the given user wrote this message
    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}
