//! File-backed session store
//!
//! Each session is written as `<session id>.session.yaml` in a base directory.
//! Files survive server restarts, which is handy during development.
//!
//! Writes go to a `.tmp_<ulid>` file in the same directory which is then
//! renamed over the session file, so readers never see a partial session.

use super::{ttl_delta, SessionData, SessionId, SessionStore, StoredSession};
use crate::error::{Result, TodoError};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, trace, warn};
use ulid::Ulid;

const SESSION_FILE_SUFFIX: &str = ".session.yaml";
const TEMP_FILE_PREFIX: &str = ".tmp_";

/// Session store writing one YAML file per session
#[derive(Debug)]
pub struct FileSessionStore {
    /// Directory holding the session files
    base_dir: PathBuf,
    ttl: TimeDelta,
}

impl FileSessionStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed
    pub async fn new(base_dir: impl Into<PathBuf>, ttl: Duration) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await.map_err(|e| {
            TodoError::session(format!(
                "Failed to create session directory '{}': {}",
                base_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            base_dir,
            ttl: ttl_delta(ttl),
        })
    }

    /// Directory holding the session files
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, id: &SessionId) -> PathBuf {
        self.base_dir.join(format!("{id}{SESSION_FILE_SUFFIX}"))
    }

    async fn read_stored(&self, path: &Path) -> Result<Option<StoredSession>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSession = serde_yaml_ng::from_str(&content).map_err(|e| {
            TodoError::session(format!(
                "Failed to parse session file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Some(stored))
    }

    /// Write to a temp file then rename it over `path`
    async fn atomic_write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let tmp = self
            .base_dir
            .join(format!("{TEMP_FILE_PREFIX}{}", Ulid::new()));
        let written = match fs::write(&tmp, data).await {
            Ok(()) => fs::rename(&tmp, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = self.remove_file(&tmp).await {
                warn!("Failed to remove temp file '{}': {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// True when the file was last written more than one TTL ago
    async fn is_stale(&self, path: &Path, now: DateTime<Utc>) -> Result<bool> {
        let modified: DateTime<Utc> = fs::metadata(path).await?.modified()?.into();
        Ok(now - modified > self.ttl)
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>> {
        let path = self.session_path(id);
        let Some(stored) = self.read_stored(&path).await? else {
            return Ok(None);
        };

        if stored.is_expired(self.ttl, Utc::now()) {
            debug!("Session {} expired, removing '{}'", id, path.display());
            self.remove_file(&path).await?;
            return Ok(None);
        }

        trace!("Loaded session {} from '{}'", id, path.display());
        Ok(Some(stored.data))
    }

    async fn save(&self, id: &SessionId, data: SessionData) -> Result<()> {
        let path = self.session_path(id);
        let content = serde_yaml_ng::to_string(&StoredSession::new(data))?;

        self.atomic_write(&path, content.as_bytes()).await.map_err(|e| {
            TodoError::session(format!(
                "Failed to write session file '{}': {}",
                path.display(),
                e
            ))
        })?;

        trace!("Saved session {} to '{}'", id, path.display());
        Ok(())
    }

    async fn destroy(&self, id: &SessionId) -> Result<()> {
        self.remove_file(&self.session_path(id)).await
    }

    async fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut removed = 0;
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_session_file = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    name.ends_with(SESSION_FILE_SUFFIX) && !name.starts_with(TEMP_FILE_PREFIX)
                });
            if !is_session_file {
                continue;
            }

            match self.read_stored(&path).await {
                Ok(Some(stored)) if stored.is_expired(self.ttl, now) => {
                    self.remove_file(&path).await?;
                    removed += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    // Only files nobody has written for a whole TTL are dropped
                    match self.is_stale(&path, now).await {
                        Ok(true) => {
                            warn!(
                                "Removing unreadable session file '{}': {}",
                                path.display(),
                                e
                            );
                            self.remove_file(&path).await?;
                            removed += 1;
                        }
                        Ok(false) => {
                            debug!(
                                "Keeping recently written session file '{}': {}",
                                path.display(),
                                e
                            );
                        }
                        Err(TodoError::Io(io)) if io.kind() == ErrorKind::NotFound => {}
                        Err(stat_err) => return Err(stat_err),
                    }
                }
            }
        }

        if removed > 0 {
            debug!("Purged {} expired session files", removed);
        }
        Ok(removed)
    }
}
