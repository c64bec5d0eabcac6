//! Game configuration
//!
//! Gameplay and terrain settings with sensible defaults, loadable from a
//! TOML file. A missing file is not an error for the demo binary; it just
//! falls back to `Default`.

use std::path::Path;

use combat_engine::combat::ArmorProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value fails a structural requirement
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Top-level game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Terrain grid settings
    pub terrain: TerrainConfig,

    /// Fixed seed for damage rolls; omit for an entropy seed
    pub rng_seed: Option<u64>,
}

/// Gameplay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Tank drive speed (units per time unit)
    pub tank_speed: f32,

    /// Tank turn rate in radians per command
    pub turn_rate: f32,

    /// Ammo round muzzle speed
    pub round_speed: f32,

    /// Ammo round lifetime before it expires in flight
    pub round_lifetime: f32,

    /// Armor ratings applied to every spawned tank
    pub armor: ArmorConfig,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            tank_speed: 6.0,
            turn_rate: 0.05,
            round_speed: 40.0,
            round_lifetime: 8.0,
            armor: ArmorConfig::default(),
        }
    }
}

/// Per-zone armor ratings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorConfig {
    /// Frontal armor rating
    pub front: i32,
    /// Top-deck armor rating
    pub upper: i32,
    /// Side armor rating
    pub lateral: i32,
    /// Rear armor rating
    pub rear: i32,
}

impl Default for ArmorConfig {
    fn default() -> Self {
        let profile = ArmorProfile::default();
        Self {
            front: profile.front,
            upper: profile.upper,
            lateral: profile.lateral,
            rear: profile.rear,
        }
    }
}

impl From<&ArmorConfig> for ArmorProfile {
    fn from(config: &ArmorConfig) -> Self {
        Self {
            front: config.front,
            upper: config.upper,
            lateral: config.lateral,
            rear: config.rear,
        }
    }
}

/// Terrain grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Tiles per grid side; must be a power of two
    pub grid_side: usize,

    /// World-space size of one tile edge
    pub tile_size: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_side: 8,
            tile_size: 16.0,
        }
    }
}

impl GameConfig {
    /// Load a config file, rejecting structurally invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural requirements the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.terrain.grid_side.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "terrain.grid_side must be a power of two, got {}",
                self.terrain.grid_side
            )));
        }
        if self.gameplay.round_lifetime <= 0.0 {
            return Err(ConfigError::Invalid(
                "gameplay.round_lifetime must be positive".into(),
            ));
        }
        Ok(())
    }
}
