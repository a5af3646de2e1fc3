//! Session storage
//!
//! A session holds every list a visitor has created plus the one-shot flash
//! messages shown on the next page. Sessions live behind the [`SessionStore`]
//! trait so the web layer never touches a concrete backend.
//!
//! Two backends are provided:
//!
//! - [`InMemorySessionStore`]: a concurrent map, lost on restart
//! - [`FileSessionStore`]: one YAML file per session in a directory

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

use crate::error::{Result, TodoError};
use crate::types::Lists;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use ulid::Ulid;

/// Opaque identifier of one visitor session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Ulid);

impl SessionId {
    /// Generate a fresh random session id
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        Ulid::from_string(s.trim())
            .map(Self)
            .map_err(|e| TodoError::session(format!("invalid session id '{s}': {e}")))
    }
}

/// One-shot status messages carried to the next rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Flash {
    /// Queue a success message, replacing any earlier one
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Queue an error message, replacing any earlier one
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Remove and return all queued messages
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }

    /// True when no message is queued
    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}

/// Everything stored for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub lists: Lists,
    #[serde(default)]
    pub flash: Flash,
}

/// Session data together with the time it was last written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredSession {
    pub data: SessionData,
    pub last_seen: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(data: SessionData) -> Self {
        Self {
            data,
            last_seen: Utc::now(),
        }
    }

    pub fn is_expired(&self, ttl: TimeDelta, now: DateTime<Utc>) -> bool {
        now - self.last_seen > ttl
    }
}

/// Convert a configured TTL, saturating instead of failing on huge values
pub(crate) fn ttl_delta(ttl: Duration) -> TimeDelta {
    TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
}

/// Pluggable storage for session data
///
/// Implementations treat sessions idle for longer than their TTL as absent.
#[async_trait]
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Load a live session, or `None` if it does not exist or has expired
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>>;

    /// Create or replace a session and refresh its idle timer
    async fn save(&self, id: &SessionId, data: SessionData) -> Result<()>;

    /// Remove a session if present
    async fn destroy(&self, id: &SessionId) -> Result<()>;

    /// Drop every expired session, returning how many were removed
    async fn purge_expired(&self) -> Result<usize>;
}
