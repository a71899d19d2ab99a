//! Configuration management for xgo

pub mod schema;

pub use schema::Config;

use crate::error::{XgoError, XgoResult};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Environment variable overriding the dependency cache directory
pub const CACHE_DIR_ENV: &str = "XGO_CACHE_DIR";

/// Name of the cache directory under the system temp dir
const CACHE_DIR_NAME: &str = "xgo-cache";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("xgo")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is absent
    pub async fn load(&self) -> XgoResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> XgoResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| XgoError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| XgoError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the dependency cache directory.
///
/// `XGO_CACHE_DIR` wins over the config file, which wins over
/// `<tmp>/xgo-cache`.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(dir) = env::var_os(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    config
        .cache
        .dir
        .clone()
        .unwrap_or_else(|| env::temp_dir().join(CACHE_DIR_NAME))
}
