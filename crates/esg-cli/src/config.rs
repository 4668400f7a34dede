//! User settings - storage location and the default-report registry.
//!
//! Settings are serialized to TOML and stored in the user's config
//! directory. A missing file means defaults; a malformed file is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use esg_model::{DefaultRegistry, Report};
use esg_store::DEFAULT_KEY_PREFIX;
use serde::{Deserialize, Serialize};

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where and how report data is stored.
    pub storage: StorageSettings,

    /// Default-report registry. Empty means the built-in registry.
    pub reports: Vec<Report>,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding stored report data.
    pub data_dir: Option<PathBuf>,

    /// Prefix of every storage key.
    pub key_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read settings {}", path.display()));
            }
        };
        toml::from_str(&content).with_context(|| format!("parse settings {}", path.display()))
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        fs::write(path, content).with_context(|| format!("write settings {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Directory holding stored report data.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("reports")))
            .unwrap_or_else(|| PathBuf::from("esg-reports"))
    }

    /// The default-report registry these settings describe.
    pub fn registry(&self) -> Result<DefaultRegistry> {
        if self.reports.is_empty() {
            return Ok(DefaultRegistry::builtin());
        }
        DefaultRegistry::new(self.reports.clone()).context("invalid [[reports]] registry")
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "EsgReporting", "esg-report")
}
