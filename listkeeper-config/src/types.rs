//! Typed server configuration

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default TCP port
pub const DEFAULT_PORT: u16 = 4567;

/// Default name of the session cookie
pub const DEFAULT_COOKIE_NAME: &str = "listkeeper.session";

/// Default idle lifetime of a session: one day
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Default directory for the file session store
pub const DEFAULT_SESSION_DIR: &str = ".listkeeper/sessions";

/// Which session store backend to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    /// Sessions live in process memory
    #[default]
    Memory,
    /// Sessions are written as YAML files under `session_dir`
    File,
}

/// Settings for the Listkeeper web server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port; 0 picks a free port
    pub port: u16,
    /// Name of the cookie carrying the session id
    pub cookie_name: String,
    /// Seconds of inactivity after which a session is discarded
    pub session_ttl_secs: u64,
    /// Session store backend
    pub session_store: SessionStoreKind,
    /// Directory used by the file session store
    pub session_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_store: SessionStoreKind::default(),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle lifetime of a session
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid_value("host", "must not be empty"));
        }

        if self.cookie_name.is_empty() {
            return Err(ConfigError::invalid_value(
                "cookie_name",
                "must not be empty",
            ));
        }

        // Cookie names are RFC 6265 tokens
        if let Some(bad) = self
            .cookie_name
            .chars()
            .find(|c| !c.is_ascii_graphic() || "()<>@,;:\\\"/[]?={}".contains(*c))
        {
            return Err(ConfigError::invalid_value(
                "cookie_name",
                format!("contains invalid character '{bad}'"),
            ));
        }

        if self.session_ttl_secs == 0 {
            return Err(ConfigError::invalid_value(
                "session_ttl_secs",
                "must be greater than zero",
            ));
        }

        if self.session_store == SessionStoreKind::File
            && self.session_dir.as_os_str().is_empty()
        {
            return Err(ConfigError::invalid_value(
                "session_dir",
                "must be set when session_store is 'file'",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:4567");
        assert_eq!(config.session_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.session_store, SessionStoreKind::Memory);
    }

    #[test]
    fn test_rejects_bad_cookie_names() {
        for name in ["", "my session", "a;b", "a=b", "naïve"] {
            let config = ServerConfig {
                cookie_name: name.to_string(),
                ..ServerConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let config = ServerConfig {
            session_ttl_secs: 0,
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("session_ttl_secs"));
    }

    #[test]
    fn test_file_store_needs_directory() {
        let config = ServerConfig {
            session_store: SessionStoreKind::File,
            session_dir: PathBuf::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
