//! Shared library for the catalog browser workspace.
//!
//! This crate provides common functionality used by both browser binaries:
//! - Configuration management
//! - Logging infrastructure
//! - File path utilities
//! - Display language preference and translations

pub mod config;
pub mod i18n;
pub mod logging;
pub mod paths;
pub mod preferences;

// Re-export commonly used types
pub use config::Config;
pub use i18n::{Language, Translations};
pub use logging::LogConfig;
pub use paths::DataPaths;
pub use preferences::PreferenceStore;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
