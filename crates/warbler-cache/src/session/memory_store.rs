//! In-process login sessions
//!
//! Sessions live in a `DashMap` keyed by session id. Expired sessions are
//! dropped when looked up, and every insert sweeps the rest.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use warbler_core::{RepoResult, Session, SessionStore};

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, including expired ones not yet swept
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every expired session, returning how many were removed
    pub fn sweep_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before.saturating_sub(self.sessions.len())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &Session) -> RepoResult<()> {
        let swept = self.sweep_expired();
        if swept > 0 {
            debug!(swept, "Swept expired sessions");
        }

        self.sessions.insert(session.id.clone(), session.clone());
        debug!(session_id = %session.id, user_id = %session.user_id, "Stored session");
        Ok(())
    }

    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>> {
        // Clone out so no shard guard is held during removal
        let Some(session) = self.sessions.get(session_id).map(|s| s.value().clone()) else {
            return Ok(None);
        };

        if session.is_expired() {
            self.sessions.remove_if(session_id, |_, s| s.is_expired());
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<bool> {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            debug!(session_id = %session_id, "Revoked session");
        }
        Ok(removed)
    }
}
