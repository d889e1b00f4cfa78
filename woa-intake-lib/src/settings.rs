//! Path configuration: command-line flags over the saved settings file.
//!
//! The settings file is `~/.config/woa-intake/settings.toml` (platform config
//! dir) with an optional `[paths]` table:
//!
//! ```toml
//! [paths]
//! table = "/data/Game Compatibility Form.csv"
//! catalog_dir = "/src/works-on-woa/src/content/games"
//! reports_dir = "/src/works-on-woa/src/content/user_reports_games"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SettingsError;

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("woa-intake").join("settings.toml")
}

/// Optional paths, from either the command line or the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathSettings {
    #[serde(default)]
    pub table: Option<PathBuf>,
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    #[serde(default)]
    pub reports_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    paths: PathSettings,
}

impl PathSettings {
    /// Load `[paths]` from the default settings file. A missing file is empty.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load `[paths]` from `path`. A missing file is empty.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        let file: SettingsFile = toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(file.paths)
    }

    /// Fill any unset path from `fallback`.
    pub fn or(self, fallback: PathSettings) -> Self {
        Self {
            table: self.table.or(fallback.table),
            catalog_dir: self.catalog_dir.or(fallback.catalog_dir),
            reports_dir: self.reports_dir.or(fallback.reports_dir),
        }
    }

    pub fn require_table(&self) -> Result<PathBuf, SettingsError> {
        self.table
            .clone()
            .ok_or(SettingsError::Missing("table", "table"))
    }

    pub fn require_catalog_dir(&self) -> Result<PathBuf, SettingsError> {
        self.catalog_dir
            .clone()
            .ok_or(SettingsError::Missing("catalog_dir", "catalog-dir"))
    }

    pub fn require_reports_dir(&self) -> Result<PathBuf, SettingsError> {
        self.reports_dir
            .clone()
            .ok_or(SettingsError::Missing("reports_dir", "reports-dir"))
    }
}

/// Everything the batch driver needs to know about where things live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// The submission CSV, rewritten in place as rows are processed.
    pub table: PathBuf,
    /// One `<slug>.md` per game.
    pub catalog_dir: PathBuf,
    /// `<slug>_NNNN.md` user reports.
    pub reports_dir: PathBuf,
}

impl IntakeConfig {
    pub fn new(
        table: impl Into<PathBuf>,
        catalog_dir: impl Into<PathBuf>,
        reports_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            table: table.into(),
            catalog_dir: catalog_dir.into(),
            reports_dir: reports_dir.into(),
        }
    }

    /// Build a config from settings that must name all three paths.
    pub fn from_settings(settings: &PathSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            table: settings.require_table()?,
            catalog_dir: settings.require_catalog_dir()?,
            reports_dir: settings.require_reports_dir()?,
        })
    }
}
