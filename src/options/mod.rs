//! Centralized rig/camera/motion options with TOML preset support.
//!
//! All tweakable settings (camera smoothing, rig framing constants, device
//! profiles, pool sizing, decoration drift) are consolidated here. Options
//! serialize to/from TOML for presets stored in `assets/presets/`.

mod camera;
mod device;
mod drift;
mod pool;
mod rig;

use std::path::Path;

pub use camera::CameraOptions;
pub use device::{DeviceOptions, ProfileParams};
pub use drift::DriftOptions;
pub use pool::PoolOptions;
pub use rig::RigOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PondError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[rig]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and smoothing.
    pub camera: CameraOptions,
    /// Rig framing constants.
    pub rig: RigOptions,
    /// Device profile parameters.
    pub device: DeviceOptions,
    /// Vector pool sizing.
    #[schemars(skip)]
    pub pool: PoolOptions,
    /// Floating decoration motion.
    pub drift: DriftOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PondError> {
        let content = std::fs::read_to_string(path).map_err(PondError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, PondError> {
        toml::from_str(content)
            .map_err(|e| PondError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PondError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PondError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PondError::Io)?;
        }
        std::fs::write(path, content).map_err(PondError::Io)?;
        log::info!("Saved options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
