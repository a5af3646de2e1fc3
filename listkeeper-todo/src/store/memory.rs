//! In-memory session store

use super::{ttl_delta, SessionData, SessionId, SessionStore, StoredSession};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use dashmap::DashMap;
use std::time::Duration;
use tracing::{debug, trace};

/// Session store backed by a concurrent hash map
///
/// All sessions are lost when the process exits.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, StoredSession>,
    ttl: TimeDelta,
}

impl InMemorySessionStore {
    /// Create an empty store whose sessions expire after `ttl` of inactivity
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: ttl_delta(ttl),
        }
    }

    /// Number of sessions currently held, expired or not
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no sessions are held
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>> {
        let now = Utc::now();
        // The map guard must be released before removing the entry
        match self.sessions.get(id) {
            None => return Ok(None),
            Some(stored) if !stored.is_expired(self.ttl, now) => {
                trace!("Loaded session {} from memory", id);
                return Ok(Some(stored.data.clone()));
            }
            Some(_) => {}
        }

        debug!("Session {} expired", id);
        self.sessions.remove(id);
        Ok(None)
    }

    async fn save(&self, id: &SessionId, data: SessionData) -> Result<()> {
        self.sessions.insert(*id, StoredSession::new(data));
        trace!("Saved session {} to memory", id);
        Ok(())
    }

    async fn destroy(&self, id: &SessionId) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| !stored.is_expired(self.ttl, now));
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!("Purged {} expired sessions", removed);
        }
        Ok(removed)
    }
}
