//! Configuration file discovery
//!
//! Files named `listkeeper.{toml,yaml,yml,json}` are looked up in the user's
//! configuration directory and then in the current directory. Later files
//! override earlier ones when merged.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Base name of every configuration file
pub const CONFIG_FILE_STEM: &str = "listkeeper";

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }
}

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Full path to the configuration file
    pub path: PathBuf,
    /// Detected format of the file
    pub format: ConfigFormat,
}

/// Finds configuration files in a fixed list of directories
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    /// Directories searched in ascending precedence
    search_dirs: Vec<PathBuf>,
}

impl FileDiscovery {
    /// Search the user configuration directory, then the current directory
    pub fn new() -> Self {
        let mut search_dirs = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            search_dirs.push(config_dir.join(CONFIG_FILE_STEM));
        }
        if let Ok(current_dir) = std::env::current_dir() {
            search_dirs.push(current_dir);
        }
        Self { search_dirs }
    }

    /// Search exactly the given directories, lowest precedence first
    pub fn with_directories(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// All existing configuration files, lowest precedence first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let files: Vec<ConfigFile> = self
            .search_dirs
            .iter()
            .flat_map(|dir| self.search_directory(dir))
            .collect();

        debug!("Discovered {} configuration files", files.len());
        files
    }

    fn search_directory(&self, dir: &Path) -> Vec<ConfigFile> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        if !dir.is_dir() {
            warn!("Path exists but is not a directory: {}", dir.display());
            return Vec::new();
        }

        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
            .filter(|candidate| candidate.is_file())
            .filter_map(|path| {
                let format = ConfigFormat::from_path(&path)?;
                trace!("Found config: {} ({:?})", path.display(), format);
                Some(ConfigFile { path, format })
            })
            .collect()
    }
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}
