//! Document types for the catalog and report stores.
//!
//! Field order in the structs is the order fields appear in the rendered
//! front matter, so keep it stable when adding fields.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Upscaling ───────────────────────────────────────────────────────────────

/// The nested `auto_super_resolution` block shared by both document kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSuperResolution {
    #[serde(default)]
    pub compatibility: String,
    #[serde(rename = "fps boost", default)]
    pub fps_boost: String,
}

impl AutoSuperResolution {
    /// Build the block from the raw compatibility cell and the raw boost value.
    pub fn new(compatibility: impl Into<String>, fps_boost: &str) -> Self {
        Self {
            compatibility: compatibility.into(),
            fps_boost: format_fps_boost(fps_boost),
        }
    }
}

/// Render a boost percentage as `"<value>% Boost"`, or empty when no value was given.
pub fn format_fps_boost(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        String::new()
    } else {
        format!("{value}% Boost")
    }
}

// ── Catalog entry ───────────────────────────────────────────────────────────

/// Front matter of a game's catalog entry, stored as `<slug>.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub compatibility: String,
    #[serde(default)]
    pub device_configuration: String,
    #[serde(default)]
    pub date_tested: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub compatibility_details: String,
    #[serde(default)]
    pub auto_super_resolution: AutoSuperResolution,
}

/// Split a comma-separated categories cell into a list.
///
/// Whitespace around each category is trimmed and empty pieces are dropped,
/// so `"Action, RPG,"` becomes `["Action", "RPG"]`.
pub fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Report entry ────────────────────────────────────────────────────────────

/// Front matter of a user report against an existing game, stored as `<slug>_NNNN.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub game: String,
    #[serde(default)]
    pub compatibility: String,
    #[serde(default)]
    pub device_configuration: String,
    #[serde(default)]
    pub date_tested: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub compatibility_details: String,
    #[serde(default)]
    pub auto_super_resolution: AutoSuperResolution,
    #[serde(default)]
    pub reporter: String,
}

// ── Catalog listing ─────────────────────────────────────────────────────────

/// A game already present in the catalog directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// File stem as it appears on disk (e.g., `halo_infinite`).
    pub slug: String,
    /// Display title: the stem as listed, or the front-matter `name` once
    /// loaded with [`CatalogEntry::with_display_name`].
    pub title: String,
    pub path: PathBuf,
}

/// Lenient view of an existing catalog file, used only to recover its display name.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatalogHeader {
    #[serde(default)]
    pub name: Option<String>,
}
