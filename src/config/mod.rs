//! Configuration management for newsdesk.
//!
//! Configuration is read from `~/.config/newsdesk/config.toml` unless a path
//! is given explicitly. If the default file doesn't exist, one is created
//! with comments.

pub mod interval;

pub use interval::{format_interval, parse_interval, MAX_INTERVAL};

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub news: NewsConfig,
    pub identity: IdentityConfig,
    pub shutdown: ShutdownConfig,
}

/// Remote headline endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub endpoint: String,
    /// Two-letter region code sent as `country`.
    pub country: String,
    pub api_key: String,
    /// Refresh period, e.g. "30s" or "5m".
    pub refresh_interval: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2/top-headlines".to_string(),
            country: "in".to_string(),
            api_key: String::new(),
            refresh_interval: "30s".to_string(),
        }
    }
}

impl NewsConfig {
    pub fn refresh_period(&self) -> Result<Duration, ConfigError> {
        parse_interval(&self.refresh_interval).map_err(|reason| ConfigError::Invalid {
            field: "news.refresh_interval",
            reason,
        })
    }
}

/// Anonymous identity service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub base_url: String,
    pub app_id: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://realm.mongodb.com".to_string(),
            app_id: "application-0-vjtmd".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Upper bound on the wait for the teardown flush.
    pub flush_timeout: String,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            flush_timeout: "5s".to_string(),
        }
    }
}

impl ShutdownConfig {
    pub fn flush_timeout(&self) -> Result<Duration, ConfigError> {
        parse_interval(&self.flush_timeout).map_err(|reason| ConfigError::Invalid {
            field: "shutdown.flush_timeout",
            reason,
        })
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With no explicit path the default location is used, and created with
    /// commented defaults if missing. An explicit path must exist. Missing
    /// fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::from_toml(&content, config_path)
    }

    fn from_toml(content: &str, path: PathBuf) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse { path, source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields that serde can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.news.refresh_period()?;
        self.shutdown.flush_timeout()?;
        Ok(())
    }

    /// Get the default config file path: `~/.config/newsdesk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdesk").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# newsdesk configuration
#
# Intervals accept a unit suffix: "30s", "5m", "1h", "1d", or raw seconds.

[news]
# Top-headlines endpoint
endpoint = "https://newsapi.org/v2/top-headlines"

# Region code sent with every request
country = "in"

# API credential; the NEWS_API_KEY environment variable overrides it
api_key = ""

# How often the headline list is refreshed
refresh_interval = "30s"

[identity]
# Anonymous login service
base_url = "https://realm.mongodb.com"
app_id = "application-0-vjtmd"

[shutdown]
# How long to wait for the final refresh on exit
flush_timeout = "5s"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
