//! Listkeeper configuration management using Figment
//!
//! # Sources
//!
//! Configuration is merged from, in increasing precedence:
//!
//! 1. built-in defaults
//! 2. `listkeeper.{toml,yaml,yml,json}` in the user configuration directory
//!    (for example `~/.config/listkeeper/`)
//! 3. `listkeeper.{toml,yaml,yml,json}` in the current directory
//! 4. a file passed explicitly with [`ConfigProvider::with_file`]
//! 5. `LISTKEEPER_*` environment variables
//! 6. command line overrides passed with [`ConfigProvider::with_overrides`]
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8080
//! cookie_name = "listkeeper.session"
//! session_ttl_secs = 3600
//! session_store = "file"
//! session_dir = "/var/lib/listkeeper/sessions"
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use listkeeper_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("Listening on {}", config.bind_address());
//! # Ok::<(), listkeeper_config::ConfigError>(())
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{ServerConfig, SessionStoreKind};

/// Re-exported so callers can build override providers
pub use figment;

/// Load configuration from every default source
pub fn load_configuration() -> ConfigResult<ServerConfig> {
    ConfigProvider::new().load()
}
