//! Declarative menu settings loaded from JSON.
//!
//! Hooks are code and cannot live in a file; everything else a caller can
//! configure can:
//!
//! ```json
//! {
//!   "labels": { "copy": "Copy text" },
//!   "show_inspect_element": false,
//!   "roster": "grouped"
//! }
//! ```
//!
//! `roster` is either a preset name or an inline roster array.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CtxMenuError;
use crate::models::Roster;
use crate::options::ContextMenuOptions;

/// Default preset when settings do not name one.
pub const DEFAULT_PRESET: &str = "flat";

/// Roster selection in a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RosterSetting {
    Preset(String),
    Inline(Roster),
}

impl Default for RosterSetting {
    fn default() -> Self {
        Self::Preset(DEFAULT_PRESET.to_string())
    }
}

impl RosterSetting {
    /// Resolve to a concrete roster.
    pub fn resolve(&self) -> Result<Roster, CtxMenuError> {
        match self {
            Self::Preset(name) => Roster::preset(name)
                .ok_or_else(|| CtxMenuError::config(format!("Unknown roster preset: {name}"))),
            Self::Inline(roster) => Ok(roster.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub labels: HashMap<String, String>,
    pub show_inspect_element: Option<bool>,
    pub roster: RosterSetting,
}

impl MenuSettings {
    /// Load settings from a file. A missing or empty file yields defaults.
    pub fn load(path: &Path) -> Result<Self, CtxMenuError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            CtxMenuError::storage(format!("Failed to read settings file: {e}"), None)
        })?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self = serde_json::from_str(&contents).map_err(|e| {
            CtxMenuError::config(format!("Invalid settings file {}: {e}", path.display()))
        })?;

        tracing::debug!(
            path = %path.display(),
            labels = settings.labels.len(),
            "Loaded menu settings"
        );
        Ok(settings)
    }

    /// Load from the default location, if the platform has one.
    pub fn load_default() -> Result<Self, CtxMenuError> {
        match default_settings_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Apply these settings on top of existing options, keeping their hooks.
    pub fn apply_to(
        &self,
        options: ContextMenuOptions,
    ) -> Result<ContextMenuOptions, CtxMenuError> {
        let mut options = options.roster(self.roster.resolve()?).labels(self.labels.clone());
        if let Some(show) = self.show_inspect_element {
            options = options.show_inspect_element(show);
        }
        Ok(options)
    }

    /// Build options with no hooks from these settings.
    pub fn into_options(self) -> Result<ContextMenuOptions, CtxMenuError> {
        self.apply_to(ContextMenuOptions::new())
    }
}

/// `<config dir>/ctxmenu/settings.json`.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ctxmenu").join("settings.json"))
}
