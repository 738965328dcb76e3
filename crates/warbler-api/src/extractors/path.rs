//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use warbler_core::Snowflake;

use crate::response::ApiError;

/// Path extractor that reports malformed parameters as `ApiError`
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(SnowflakePath(inner))
    }
}

/// Path parameters with user_id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}

/// Path parameters with message_id
#[derive(Debug, serde::Deserialize)]
pub struct MessageIdPath {
    pub message_id: String,
}

impl MessageIdPath {
    pub fn message_id(&self) -> Result<Snowflake, ApiError> {
        self.message_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid message_id format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        let path = UserIdPath {
            user_id: "1234".to_string(),
        };
        assert_eq!(path.user_id().unwrap(), Snowflake::new(1234));

        let path = MessageIdPath {
            message_id: "abc".to_string(),
        };
        assert!(matches!(path.message_id(), Err(ApiError::InvalidPath(_))));
    }
}
