//! Game configuration
//!
//! Everything tunable lives in one immutable [`GameConfig`], built once at
//! startup and shared by the session, layout and save coordinator.
//! Missing fields in a config file fall back to the defaults in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::economy::Item;

/// Play field geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Left edge of the tile column
    pub tile_x: f32,
    /// Vertical position new tiles start at (above the visible field)
    pub spawn_y: f32,
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_W,
            height: SCREEN_H,
            tile_x: TILE_X,
            spawn_y: SPAWN_Y,
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
        }
    }
}

impl FieldConfig {
    /// A tile whose top edge is below this line has been missed
    pub fn bottom(&self) -> f32 {
        self.height
    }
}

/// Difficulty curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_fall_speed: f32,
    pub speed_per_score: f32,
    pub spawn_interval_base: f32,
    pub spawn_interval_min: f32,
    pub spawn_accel_per_score: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_fall_speed: BASE_FALL_SPEED,
            speed_per_score: SPEED_PER_SCORE,
            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_accel_per_score: SPAWN_ACCEL_PER_SCORE,
        }
    }
}

impl Tuning {
    /// Tile fall speed (pixels/s) at the given score
    pub fn fall_speed(&self, score: u32) -> f32 {
        self.base_fall_speed + score as f32 * self.speed_per_score
    }

    /// Seconds between spawns at the given score, floored at the minimum
    pub fn spawn_interval(&self, score: u32) -> f32 {
        (self.spawn_interval_base - score as f32 * self.spawn_accel_per_score)
            .max(self.spawn_interval_min)
    }
}

/// Shop prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemCosts {
    pub skip: u32,
    pub shield: u32,
}

impl Default for ItemCosts {
    fn default() -> Self {
        Self {
            skip: COST_SKIP,
            shield: COST_SHIELD,
        }
    }
}

impl ItemCosts {
    pub fn cost(&self, item: Item) -> u32 {
        match item {
            Item::Skip => self.skip,
            Item::Shield => self.shield,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub tuning: Tuning,
    pub costs: ItemCosts,
    /// Lives at the start of a run, clamped to 1..=MAX_LIVES
    pub starting_lives: u8,
    /// Save file used by the native build
    pub save_path: PathBuf,
    /// LocalStorage key used by the web build
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            tuning: Tuning::default(),
            costs: ItemCosts::default(),
            starting_lives: MAX_LIVES,
            save_path: PathBuf::from(SAVE_FILE),
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load a config file, falling back to defaults if it is missing or invalid
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break session invariants
    pub fn sanitized(mut self) -> Self {
        self.starting_lives = self.starting_lives.clamp(1, MAX_LIVES);
        let tuning = &mut self.tuning;
        if tuning.spawn_interval_min <= 0.0 {
            tuning.spawn_interval_min = SPAWN_INTERVAL_MIN;
        }
        if tuning.spawn_interval_base < tuning.spawn_interval_min {
            tuning.spawn_interval_base = tuning.spawn_interval_min;
        }
        tuning.spawn_accel_per_score = tuning.spawn_accel_per_score.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curves() {
        let tuning = Tuning::default();
        assert_eq!(tuning.fall_speed(0), 60.0);
        assert_eq!(tuning.fall_speed(10), 90.0);
        assert_eq!(tuning.spawn_interval(0), 2.0);
        assert!((tuning.spawn_interval(3) - 1.91).abs() < 1e-5);
        assert_eq!(tuning.spawn_interval(50), 0.5);
        assert_eq!(tuning.spawn_interval(1000), 0.5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{"costs": {"shield": 20}}"#).unwrap();
        assert_eq!(config.costs.shield, 20);
        assert_eq!(config.costs.skip, COST_SKIP);
        assert_eq!(config.field, FieldConfig::default());
        assert_eq!(config.starting_lives, MAX_LIVES);
    }

    #[test]
    fn test_sanitize_clamps_lives_and_interval() {
        let config = GameConfig::from_json(
            r#"{"starting_lives": 9, "tuning": {"spawn_interval_base": 0.1}}"#,
        )
        .unwrap();
        assert_eq!(config.starting_lives, MAX_LIVES);
        assert_eq!(config.tuning.spawn_interval_base, SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(&dir.path().join("nope.json"));
        assert_eq!(config, GameConfig::default());
    }
}
