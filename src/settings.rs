//! Game settings and preferences
//!
//! Read from a JSON file next to the binary (or `$SURVIVAL_SETTINGS`).
//! Missing fields take their defaults, so a file only needs the keys it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Whether decorative trees are drawn at all
    pub fn trees_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Whether trees are drawn as filled canopies instead of a single glyph
    pub fn tree_canopies(&self) -> bool {
        matches!(self, QualityPreset::High)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; a random one is picked when absent
    pub seed: Option<u64>,
    /// Step the simulation at a fixed 120 Hz instead of once per frame
    pub fixed_step: bool,
    /// Frame rate the front-end paces itself to
    pub target_fps: u32,
    /// Drawing detail
    pub quality: QualityPreset,
    /// Show FPS counter
    pub show_fps: bool,
    /// World units covered by one terminal column
    pub cell_width: f32,
    /// World units covered by one terminal row
    pub cell_height: f32,
    /// Where the terminal front-end writes its log
    pub log_file: Option<PathBuf>,
    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            fixed_step: false,
            target_fps: 60,
            quality: QualityPreset::Medium,
            show_fps: true,
            // Terminal cells are roughly twice as tall as they are wide
            cell_width: 12.0,
            cell_height: 24.0,
            log_file: Some(PathBuf::from("survival-waves.log")),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Environment variable that overrides the settings path
    pub const PATH_ENV: &'static str = "SURVIVAL_SETTINGS";
    /// Settings file looked up in the working directory
    pub const DEFAULT_PATH: &'static str = "survival-waves.json";

    /// Path the settings are read from
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH))
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid("target_fps must be at least 1".into()));
        }
        if self.cell_width <= 0.0 || self.cell_height <= 0.0 {
            return Err(SettingsError::Invalid("cell size must be positive".into()));
        }
        self.tuning.validate().map_err(SettingsError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "seed": 7, "tuning": { "player_speed": 250.0 } }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tuning.player_speed, 250.0);
        assert_eq!(settings.tuning.bullet_speed, 700.0);
        assert_eq!(settings.target_fps, 60);
    }

    #[test]
    fn json_round_trip() {
        let settings = Settings {
            quality: QualityPreset::High,
            seed: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn rejects_bad_tuning() {
        let err = Settings::from_json(r#"{ "tuning": { "bullet_ttl": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn rejects_world_that_cannot_be_built() {
        let json = r#"{ "tuning": { "player_radius": -10.0, "world_width": 0.0 } }"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Settings::load_from(Path::new("/nonexistent/survival.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn preset_detail() {
        assert!(QualityPreset::Medium.trees_enabled());
        assert!(!QualityPreset::Medium.tree_canopies());
        assert!(!QualityPreset::Low.trees_enabled());
        assert!(QualityPreset::High.tree_canopies());
    }
}
