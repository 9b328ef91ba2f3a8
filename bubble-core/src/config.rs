//! Application configuration management.
//!
//! Handles loading, saving, and accessing client configuration: the target
//! Bubble app domain, the Data API bearer token, environment selection
//! (live vs. version-test), and logging preferences. Configuration is
//! persisted as TOML on disk, with environment variable overrides for
//! credentials.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{BubbleError, BubbleResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bubble app domain (e.g., "myapp.bubbleapps.io" or a custom domain).
    #[serde(default)]
    pub domain: String,

    /// Data API bearer token, generated in the app's API settings.
    #[serde(default)]
    pub api_key: String,

    /// Target the development database (`version-test`) instead of live.
    #[serde(default)]
    pub is_dev: bool,

    /// Request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses the platform default.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output for the log file.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            api_key: String::new(),
            is_dev: false,
            timeout_ms: default_api_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ApiConfig {
    /// Check that the values required for any request are present.
    pub fn validate(&self) -> BubbleResult<()> {
        if self.domain.trim().is_empty() {
            return Err(BubbleError::MissingConfig("api.domain".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(BubbleError::MissingConfig("api.api_key".into()));
        }
        Ok(())
    }

    /// Origin (scheme + host) derived from the configured domain.
    pub fn origin(&self) -> String {
        AppConfig::sanitize_domain(&self.domain)
    }
}

impl AppConfig {
    /// Load configuration from the default config file path, falling back
    /// to defaults when no file exists. Environment overrides are applied
    /// in both cases.
    pub fn load_default() -> BubbleResult<Self> {
        let path = Self::default_config_path()?;
        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> BubbleResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file path.
    pub fn save_default(&self) -> BubbleResult<()> {
        let path = Self::default_config_path()?;
        self.save_to_file(&path)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> BubbleResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| BubbleError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> BubbleResult<PathBuf> {
        let config_dir = Platform::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Apply `BUBBLE_API_KEY`, `BUBBLE_DOMAIN`, and `BUBBLE_DEV` environment
    /// overrides on top of whatever was loaded from disk.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("BUBBLE_API_KEY") {
            if !key.trim().is_empty() {
                self.api.api_key = key;
            }
        }
        if let Ok(domain) = std::env::var("BUBBLE_DOMAIN") {
            if !domain.trim().is_empty() {
                self.api.domain = domain;
            }
        }
        if let Ok(dev) = std::env::var("BUBBLE_DEV") {
            self.api.is_dev = matches!(dev.trim(), "1" | "true" | "yes");
        }
    }

    /// Check whether the Data API connection is configured.
    pub fn is_configured(&self) -> bool {
        self.api.validate().is_ok()
    }

    /// Sanitize and normalize an app domain into an origin.
    ///
    /// Ensures the domain has a scheme (https unless one is given) and
    /// strips surrounding quotes and trailing slashes.
    pub fn sanitize_domain(domain: &str) -> String {
        let trimmed = domain.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}
