//! Session entity - a server-side login binding

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A stored login session binding one client to one user.
///
/// Created on login or signup, removed on logout, and ignored once
/// `expires_at` has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session that lives for `ttl` from now
    pub fn new(id: String, user_id: Snowflake, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check expiry against an explicit instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Seconds until expiry, zero once expired
    pub fn remaining_seconds(&self) -> u64 {
        let remaining = (self.expires_at - Utc::now()).num_seconds();
        u64::try_from(remaining).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_not_expired() {
        let session = Session::new("s1".to_string(), Snowflake::new(1), Duration::hours(1));
        assert!(!session.is_expired());
        assert!(session.remaining_seconds() > 3500);
    }

    #[test]
    fn test_expired_session() {
        let session = Session::new("s1".to_string(), Snowflake::new(1), Duration::seconds(-5));
        assert!(session.is_expired());
        assert_eq!(session.remaining_seconds(), 0);
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let session = Session::new("s1".to_string(), Snowflake::new(1), Duration::minutes(10));
        assert!(!session.is_expired_at(session.expires_at - Duration::seconds(1)));
        assert!(session.is_expired_at(session.expires_at));
    }

    #[test]
    fn test_session_serde() {
        let session = Session::new("abc".to_string(), Snowflake::new(42), Duration::days(7));
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"user_id\":\"42\""));
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
