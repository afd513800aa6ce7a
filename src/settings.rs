//! Controller settings with persistence
//!
//! Settings are saved to `~/.config/vantage/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vantage_core::TimeConfig;
use vantage_game::{MovementConfig, SwayConfig};
use vantage_physics::CharacterBodyConfig;

/// All controller settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub movement: MovementConfig,
    pub sway: SwayConfig,
    pub body: BodySettings,
    pub time: TimeConfig,
    pub gameplay: GameplaySettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vantage"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to load settings: {:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse a settings file; missing sections and fields take their defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)
    }

    /// Write settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Player capsule dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    /// Standing capsule height
    pub height: f32,
    /// Capsule radius
    pub radius: f32,
    /// Tallest ledge stepped over automatically
    pub step_height: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        let body = CharacterBodyConfig::default();
        Self {
            height: body.height,
            radius: body.radius,
            step_height: body.step_height,
        }
    }
}

impl BodySettings {
    pub fn to_config(&self) -> CharacterBodyConfig {
        CharacterBodyConfig {
            height: self.height,
            radius: self.radius,
            step_height: self.step_height,
            ..Default::default()
        }
    }
}

/// Gameplay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Reach of the focus ray in meters
    pub interact_range: f32,
    /// Rest position of the held item relative to the eye
    pub held_item_offset: Vec3,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            interact_range: 3.0,
            held_item_offset: Vec3::new(0.3, -0.25, -0.5),
        }
    }
}
