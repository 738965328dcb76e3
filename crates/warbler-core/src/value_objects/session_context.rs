//! Per-request authentication state

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Who is making the current request.
///
/// Derived once per inbound request from its session token and threaded
/// explicitly into every operation that needs an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionContext {
    #[default]
    Anonymous,
    Authenticated(Snowflake),
}

impl SessionContext {
    /// The bound user, if any
    #[inline]
    pub fn current_user_id(&self) -> Option<Snowflake> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user_id) => Some(*user_id),
        }
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Return the bound user or fail with `Unauthenticated`
    pub fn require_auth(&self) -> Result<Snowflake, DomainError> {
        self.current_user_id().ok_or(DomainError::Unauthenticated)
    }
}

impl From<Option<Snowflake>> for SessionContext {
    fn from(user_id: Option<Snowflake>) -> Self {
        user_id.map_or(Self::Anonymous, Self::Authenticated)
    }
}
