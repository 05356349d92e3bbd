//! Persisted user preferences.
//!
//! Holds the single key the browsers remember between runs: the selected
//! display language.

use crate::i18n::Language;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    language: Language,
}

/// File-backed preference store
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Create a store backed by the given TOML file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the stored language
    ///
    /// A missing or unreadable file yields the default language.
    pub fn language(&self) -> Language {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No stored preferences");
            return Language::default();
        }

        match self.read() {
            Ok(prefs) => prefs.language,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read preferences, using default language"
                );
                Language::default()
            }
        }
    }

    /// Store the language
    pub fn set_language(&self, language: Language) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(&Preferences { language })
            .context("Failed to serialize preferences")?;

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))?;

        info!(language = %language, "Language preference saved");
        Ok(())
    }

    /// Switch to the other language and persist it
    pub fn toggle_language(&self) -> Result<Language> {
        let language = self.language().toggled();
        self.set_language(language)?;
        Ok(language)
    }

    fn read(&self) -> Result<Preferences> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences: {}", self.path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences: {}", self.path.display()))
    }
}
