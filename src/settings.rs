//! Engine tuning
//!
//! Every knob both engines read lives here, loadable from a JSON file.
//! Missing fields fall back to the defaults below.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Maze game knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeTuning {
    /// Side length of the first maze of a new game
    pub start_size: usize,
    /// Side length after a reset
    pub reset_size: usize,
    /// Score that must be exceeded before the ladder can appear
    pub ladder_min_score: u32,
}

impl Default for MazeTuning {
    fn default() -> Self {
        Self {
            start_size: 3,
            reset_size: 2,
            ladder_min_score: 5,
        }
    }
}

/// A placeable body type (selected with the number keys)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPreset {
    pub mass: f64,
    pub radius: f64,
}

/// One level of the orbit game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub number: u32,
    /// Planets that must be kept alive at once
    pub target_planets: usize,
    /// Seconds the target must be held
    pub survive_time: f64,
}

impl LevelSpec {
    pub const fn new(number: u32, target_planets: usize, survive_time: f64) -> Self {
        Self {
            number,
            target_planets,
            survive_time,
        }
    }
}

/// Default level table
pub const DEFAULT_LEVELS: [LevelSpec; 10] = [
    LevelSpec::new(1, 1, 5.0),
    LevelSpec::new(2, 2, 5.0),
    LevelSpec::new(3, 3, 5.0),
    LevelSpec::new(4, 5, 10.0),
    LevelSpec::new(5, 7, 10.0),
    LevelSpec::new(6, 9, 10.0),
    LevelSpec::new(7, 12, 15.0),
    LevelSpec::new(8, 15, 15.0),
    LevelSpec::new(9, 18, 15.0),
    LevelSpec::new(10, 20, 30.0),
];

/// Orbit game knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceTuning {
    /// Gravitational constant
    pub g: f64,
    pub star_mass: f64,
    pub star_radius: f64,
    pub star_pos: DVec2,
    /// Bodies farther than this from the star are lost
    pub escape_radius: f64,
    /// Planet-planet gravity multiplier at difficulty 0
    pub base_gravity_multiplier: f64,
    pub gravity_multiplier_step: f64,
    /// Score lost when a planet falls into the star, at difficulty 0
    pub base_collision_penalty: i64,
    pub collision_penalty_step: i64,
    /// Trail points kept per body
    pub trail_length: usize,
    pub placement_score: i64,
    /// Seconds between survival bonuses
    pub bonus_interval: f64,
    pub bonus_score: i64,
    /// Rogue spawn interval at difficulty 0 (seconds)
    pub rogue_base_interval: f64,
    /// Interval never shrinks by more than this many seconds
    pub rogue_interval_floor_steps: u32,
    /// Level index from which rogue bodies appear
    pub rogue_min_level: usize,
    pub rogue_distance: (i32, i32),
    pub rogue_speed: (f64, f64),
    pub rogue_mass: (f64, f64),
    pub rogue_radius: (i32, i32),
    /// Presets for keys 1, 2, 3
    pub presets: [BodyPreset; 3],
    /// Preset active before any key is pressed
    pub initial_preset: BodyPreset,
    pub levels: Vec<LevelSpec>,
}

impl Default for SpaceTuning {
    fn default() -> Self {
        Self {
            g: 6.67430e-11,
            star_mass: 1e14,
            star_radius: 10.0,
            star_pos: DVec2::new(400.0, 300.0),
            escape_radius: 1000.0,
            base_gravity_multiplier: 80.0,
            gravity_multiplier_step: 10.0,
            base_collision_penalty: 10,
            collision_penalty_step: 10,
            trail_length: 100,
            placement_score: 10,
            bonus_interval: 10.0,
            bonus_score: 10,
            rogue_base_interval: 20.0,
            rogue_interval_floor_steps: 15,
            rogue_min_level: 3,
            rogue_distance: (400, 600),
            rogue_speed: (1.0, 2.0),
            rogue_mass: (1e5, 1e8),
            rogue_radius: (5, 8),
            presets: [
                BodyPreset {
                    mass: 1e-50,
                    radius: 5.0,
                },
                BodyPreset {
                    mass: 1e5,
                    radius: 10.0,
                },
                BodyPreset {
                    mass: 1e10,
                    radius: 15.0,
                },
            ],
            initial_preset: BodyPreset {
                mass: 1e10,
                radius: 5.0,
            },
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl SpaceTuning {
    /// Planet-planet gravity multiplier for a difficulty
    pub fn gravity_multiplier(&self, difficulty: usize) -> f64 {
        self.base_gravity_multiplier + difficulty as f64 * self.gravity_multiplier_step
    }

    /// Score lost per star crash for a difficulty
    pub fn collision_penalty(&self, difficulty: usize) -> i64 {
        self.base_collision_penalty + difficulty as i64 * self.collision_penalty_step
    }

    /// Seconds between rogue spawns for a difficulty
    pub fn rogue_interval(&self, difficulty: usize) -> f64 {
        let steps = (difficulty as u32).min(self.rogue_interval_floor_steps);
        self.rogue_base_interval - steps as f64
    }
}

/// All engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub maze: MazeTuning,
    pub space: SpaceTuning,
}

impl Settings {
    /// Reject values the engines cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.maze.start_size == 0 || self.maze.reset_size == 0 {
            return Err(SettingsError::Invalid("maze sizes must be at least 1".into()));
        }
        let space = &self.space;
        if space.star_mass <= 0.0 || space.star_radius <= 0.0 {
            return Err(SettingsError::Invalid("star mass and radius must be positive".into()));
        }
        if space.escape_radius <= space.star_radius {
            return Err(SettingsError::Invalid("escape radius must exceed the star radius".into()));
        }
        if space.levels.is_empty() {
            return Err(SettingsError::Invalid("level table is empty".into()));
        }
        let presets_ok = space
            .presets
            .iter()
            .chain(std::iter::once(&space.initial_preset))
            .all(|p| p.mass > 0.0 && p.radius > 0.0);
        if !presets_ok {
            return Err(SettingsError::Invalid("preset mass and radius must be positive".into()));
        }
        if space.rogue_mass.0 <= 0.0 || space.rogue_radius.0 <= 0 || space.rogue_distance.0 <= 0 {
            return Err(SettingsError::Invalid(
                "rogue mass, radius and distance must be positive".into(),
            ));
        }
        if space.rogue_distance.0 > space.rogue_distance.1
            || space.rogue_speed.0 > space.rogue_speed.1
            || space.rogue_mass.0 > space.rogue_mass.1
            || space.rogue_radius.0 > space.rogue_radius.1
        {
            return Err(SettingsError::Invalid("rogue ranges must be ordered low..high".into()));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
