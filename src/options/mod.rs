//! Centralized simulation and camera options with TOML preset support.
//!
//! All tweakable settings (playback, physics thresholds, camera control,
//! keybindings) are consolidated here. Options serialize to/from TOML so a
//! session can start from a preset file.

mod camera;
mod keybindings;
mod simulation;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use simulation::{SimulationOptions, MAX_TIME_SCALE, MIN_TIME_SCALE};

use crate::error::OrreryError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Playback and physics parameters.
    pub simulation: SimulationOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, OrreryError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Io`] if the file cannot be read, or
    /// [`OrreryError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, OrreryError> {
        let content = std::fs::read_to_string(path).map_err(OrreryError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::OptionsParse`] if serialization fails, or
    /// [`OrreryError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrreryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrreryError::Io)?;
        }
        std::fs::write(path, content).map_err(OrreryError::Io)
    }
}
