//! Configuration provider using Figment

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::{ConfigError, ConfigResult};
use crate::types::ServerConfig;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use listkeeper_common::Pretty;
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// Prefix of environment variables read into the configuration
pub const ENV_PREFIX: &str = "LISTKEEPER_";

/// Loads [`ServerConfig`] from every source in precedence order
///
/// No caching is performed; each call to [`ConfigProvider::load`] reads the
/// sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    /// File given on the command line, merged after discovered files
    explicit_file: Option<PathBuf>,
    /// Values from command line flags, merged last
    overrides: Option<Figment>,
}

impl ConfigProvider {
    /// Create a provider using the default discovery directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom file discovery
    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Also load `path`, which must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Merge a figment provider over every other source
    pub fn with_overrides<T: figment::Provider>(mut self, provider: T) -> Self {
        let overrides = self.overrides.take().unwrap_or_default().merge(provider);
        self.overrides = Some(overrides);
        self
    }

    /// Load and validate the server configuration
    pub fn load(&self) -> ConfigResult<ServerConfig> {
        debug!("Loading server configuration");

        let config: ServerConfig = self.build_figment()?.extract()?;
        config.validate()?;

        info!(
            "Loaded configuration: bind {} with {:?} session store",
            config.bind_address(),
            config.session_store
        );
        debug!("Resolved configuration: {}", Pretty(&config));
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. Discovered configuration files
    /// 3. The explicit configuration file, if any
    /// 4. `LISTKEEPER_` environment variables
    /// 5. Command line overrides
    pub fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

        for config_file in self.discovery.discover_all() {
            trace!("Merging config file: {}", config_file.path.display());
            figment = figment.merge(Self::file_provider(&config_file));
        }

        if let Some(path) = &self.explicit_file {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            let format = ConfigFormat::from_path(path)
                .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.clone() })?;
            figment = figment.merge(Self::file_provider(&ConfigFile {
                path: path.clone(),
                format,
            }));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        if let Some(overrides) = &self.overrides {
            figment = figment.merge(overrides.clone());
        }

        Ok(figment)
    }

    fn file_provider(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}
