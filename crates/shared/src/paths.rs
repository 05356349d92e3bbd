//! File path utilities for the browser data directory.
//!
//! Centralizes where the few files the browsers touch live: logs, the
//! language preference file, and user-supplied movie catalogs.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// File path manager for data files
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths with the given root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the persisted preferences file (display language)
    pub fn preferences_file(&self) -> PathBuf {
        self.root.join("preferences.toml")
    }

    /// Get logs directory
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Get the directory scanned for user movie catalogs
    pub fn catalogs_dir(&self) -> PathBuf {
        self.root.join("catalogs")
    }

    /// Get a named movie catalog file
    ///
    /// Fails when the name has no letters or digits to build a file name from.
    pub fn movie_catalog(&self, name: &str) -> Result<PathBuf> {
        let slug = Self::catalog_slug(name);
        if slug.is_empty() {
            bail!("Catalog name {:?} has no usable characters", name);
        }
        Ok(self.catalogs_dir().join(format!("{}.json", slug)))
    }

    /// Create all necessary directories
    pub fn create_dirs(&self) -> std::io::Result<()> {
        for dir in [self.root.clone(), self.logs_dir(), self.catalogs_dir()] {
            std::fs::create_dir_all(&dir)?;
        }

        Ok(())
    }

    /// File-name slug for a catalog name
    ///
    /// Every run of letters or digits (any script) becomes one lowercase word;
    /// everything else separates words.
    pub fn catalog_slug(name: &str) -> String {
        name.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_")
    }
}
