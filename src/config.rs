//! Optional TOML configuration
//!
//! Settings are read from `config.toml` in the platform config directory
//! (`~/.config/swapi-explorer/` on Linux) or from a file given on the command
//! line. Every key is optional:
//!
//! ```toml
//! [api]
//! base_url = "https://swapi.dev/api"
//! timeout_secs = 30
//!
//! [cache]
//! dir = "/var/tmp/swapi"
//! ttl_days = 7
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::FileCacheStore;
use crate::data::{DEFAULT_TIMEOUT_SECS, DEFAULT_TTL_DAYS, SWAPI_BASE_URL};

/// Fallback cache directory when no home directory is available
const FALLBACK_CACHE_DIR: &str = "data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Where and how records are fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Where records are cached and for how long
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory, defaults to the platform cache directory
    pub dir: Option<PathBuf>,

    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

fn default_base_url() -> String {
    SWAPI_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_ttl_days() -> i64 {
    DEFAULT_TTL_DAYS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            ttl_days: default_ttl_days(),
        }
    }
}

impl Config {
    /// Platform config file location, if a home directory exists
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "swapi-explorer")?;
        Some(project_dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Loads and validates a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "cache.ttl_days must not be negative, got {}",
                self.cache.ttl_days
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Cache directory: configured, platform default, then `./data`
    pub fn cache_dir(&self) -> PathBuf {
        self.cache
            .dir
            .clone()
            .or_else(FileCacheStore::default_dir)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
    }

    /// Freshness window for cached records
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.cache.ttl_days)
    }

    /// HTTP request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
