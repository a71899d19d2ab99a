//! Configuration schema for xgo
//!
//! Configuration is stored at `~/.config/xgo/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Container engine settings
    pub engine: EngineConfig,

    /// Cross compilation image settings
    pub image: ImageConfig,

    /// Dependency cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Container engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine executable (must accept docker-compatible arguments)
    pub binary: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }
}

/// Official image distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Prefix the Go release is appended to
    pub dist_prefix: String,

    /// Go release used when `--go` is not given
    pub default_release: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            dist_prefix: "karalabe/xgo-".to_string(),
            default_release: "latest".to_string(),
        }
    }
}

impl ImageConfig {
    /// Image reference for a Go release
    pub fn for_release(&self, release: &str) -> String {
        format!("{}{}", self.dist_prefix, release)
    }
}

/// Dependency cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory (defaults to `<tmp>/xgo-cache`)
    pub dir: Option<PathBuf>,
}
