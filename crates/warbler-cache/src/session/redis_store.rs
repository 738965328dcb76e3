//! Redis-backed login sessions
//!
//! Each session is a JSON value under `session:{id}` that Redis expires on its
//! own.

use async_trait::async_trait;
use tracing::{debug, instrument};

use warbler_core::{RepoResult, Session, SessionStore};

use crate::pool::RedisPool;

const SESSION_PREFIX: &str = "session:";

/// Session store shared by every server instance pointing at the same Redis
#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn create(&self, session: &Session) -> RepoResult<()> {
        let ttl = session.remaining_seconds().max(1);
        self.pool
            .put_json(&Self::key(&session.id), session, ttl)
            .await?;

        debug!(session_id = %session.id, ttl, "Stored session");
        Ok(())
    }

    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>> {
        let session: Option<Session> = self.pool.get_json(&Self::key(session_id)).await?;
        // Redis TTLs have second granularity
        Ok(session.filter(|s| !s.is_expired()))
    }

    #[instrument(skip(self))]
    async fn revoke(&self, session_id: &str) -> RepoResult<bool> {
        let deleted = self.pool.delete(&Self::key(session_id)).await?;
        if deleted {
            debug!("Revoked session");
        }
        Ok(deleted)
    }
}
