//! Configuration management for the catalog browsers.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory settings
    pub data: DataConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Remote catalog settings
    pub catalog: CatalogConfig,

    /// Browsing behaviour
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Local movie catalog settings
    #[serde(default)]
    pub movies: MoviesConfig,
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root data directory path
    pub root_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to data directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Remote catalog (Jikan) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Jikan API base URL
    pub base_url: String,

    /// Minimum spacing between two outbound requests, in milliseconds
    pub min_interval_ms: u64,

    /// Number of items requested per page
    pub page_size: u32,

    /// User agent sent with every request
    pub user_agent: String,

    /// Transport timeout in seconds (None = wait indefinitely)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Browsing behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// How long a closed detail view keeps its selection, in milliseconds
    pub selection_linger_ms: u64,
}

/// Local movie catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoviesConfig {
    /// JSON catalog file (None = bundled catalog)
    pub catalog_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            selection_linger_ms: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                root_dir: "data".to_string(),
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: true,
                json_format: false,
            },
            catalog: CatalogConfig {
                base_url: "https://api.jikan.moe/v4".to_string(),
                min_interval_ms: 1000,
                page_size: 24,
                user_agent: concat!("catalog-browser/", env!("CARGO_PKG_VERSION")).to_string(),
                timeout_seconds: None,
            },
            browser: BrowserConfig::default(),
            movies: MoviesConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Get the path for the data directory
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.root_dir)
    }

    /// Get the path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        let log_path = Path::new(&self.logging.log_dir);
        if log_path.is_absolute() {
            log_path.to_path_buf()
        } else {
            self.data_dir().join(log_path)
        }
    }

    /// Minimum spacing enforced by the request gate
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.catalog.min_interval_ms)
    }

    /// Transport timeout for catalog requests, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.catalog.timeout_seconds.map(Duration::from_secs)
    }

    /// Delay between closing the detail view and dropping the selection
    pub fn selection_linger(&self) -> Duration {
        Duration::from_millis(self.browser.selection_linger_ms)
    }

    /// Movie catalog file, if one is configured
    pub fn movie_catalog_path(&self) -> Option<PathBuf> {
        let path = PathBuf::from(self.movies.catalog_path.as_ref()?);
        if path.is_absolute() {
            Some(path)
        } else {
            Some(self.data_dir().join(path))
        }
    }
}
