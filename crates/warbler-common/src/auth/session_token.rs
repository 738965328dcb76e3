//! Signed session tokens
//!
//! A token is an HS256 JWT naming the user (`sub`) and the server-side
//! session (`sid`). The token alone is not enough to authenticate: the
//! session must still exist in the session store.

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use warbler_core::{Session, Snowflake};

use crate::config::MAX_SESSION_TTL_SECONDS;
use crate::error::AppError;

/// JWT claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: String,
    /// Session ID
    pub sid: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// # Errors
    /// Returns `AppError::InvalidToken` if the subject is not a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.sid
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl SessionTokenService {
    /// `ttl_seconds` is clamped to between one second and ten years
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: ttl_seconds.clamp(1, MAX_SESSION_TTL_SECONDS),
        }
    }

    /// Lifetime of newly created sessions
    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign a token for the given session; it expires with the session
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, session: &Session) -> Result<String, AppError> {
        let claims = SessionClaims {
            sub: session.user_id.to_string(),
            sid: session.id.clone(),
            iat: session.created_at.timestamp(),
            exp: session.expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode session token: {e}")))
    }

    /// Verify signature and expiry, returning the claims
    ///
    /// # Errors
    /// Returns `TokenExpired` for expired tokens and `InvalidToken` otherwise
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for SessionTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
