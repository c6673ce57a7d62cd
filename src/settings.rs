//! Game settings and balance
//!
//! Every tunable the simulation reads lives here so the arena can be
//! reconfigured without touching engine code. Loaded from JSON; missing
//! fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Arena width (x extent)
    pub width: f32,
    /// Arena height (y extent, y grows downward)
    pub height: f32,
    /// Host tick rate, also drives fixed-step clocks
    pub ticks_per_second: u32,
    /// Seed for the simulation RNG
    pub seed: u64,

    // === Shells ===
    pub gravity: f32,
    /// Logical time per tick
    pub dt: f32,
    pub refl_ort: f32,
    pub refl_par: f32,

    // === Cannons ===
    pub min_pow: f32,
    pub max_pow: f32,
    pub charge_step: f32,
    /// Distance moved per directional key press
    pub move_step: f32,
    /// Cannon centers stay this far from every edge
    pub cannon_margin: f32,
    pub cannon_radius: f32,
    pub enemy_start_pow: f32,
    pub enemy_shot_speed: f32,
    /// Max per-axis random step for enemy repositioning
    pub enemy_jitter: i32,
    pub enemy_cooldown_ms: u64,
    /// Let the enemy fire on its own once the player goes quiet
    pub enemy_auto_fire: bool,

    // === Missions ===
    /// Moving targets per mission (static targets match this count)
    pub n_targets: usize,
    pub max_target_radius: i32,
    pub bomb_speed: f32,
    pub bomb_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,
            seed: 0,

            gravity: GRAVITY,
            dt: 1.0,
            refl_ort: REFL_ORT,
            refl_par: REFL_PAR,

            min_pow: MIN_POW,
            max_pow: MAX_POW,
            charge_step: CHARGE_STEP,
            move_step: MOVE_STEP,
            cannon_margin: CANNON_MARGIN,
            cannon_radius: CANNON_RADIUS,
            enemy_start_pow: ENEMY_START_POW,
            enemy_shot_speed: ENEMY_SHOT_SPEED,
            enemy_jitter: ENEMY_JITTER,
            enemy_cooldown_ms: ENEMY_COOLDOWN_MS,
            enemy_auto_fire: false,

            n_targets: N_TARGETS,
            max_target_radius: MAX_TARGET_RADIUS,
            bomb_speed: BOMB_SPEED,
            bomb_radius: BOMB_RADIUS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check that the arena and balance values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::invalid(
                "width/height",
                format!("arena must be positive, got {}x{}", self.width, self.height),
            ));
        }
        if self.cannon_margin < 0.0
            || self.width < 2.0 * self.cannon_margin
            || self.height < 2.0 * self.cannon_margin
        {
            return Err(ConfigError::invalid(
                "cannon_margin",
                format!(
                    "margin {} does not fit a {}x{} arena",
                    self.cannon_margin, self.width, self.height
                ),
            ));
        }
        if self.n_targets == 0 {
            return Err(ConfigError::invalid("n_targets", "need at least one target"));
        }
        if self.min_pow > self.max_pow {
            return Err(ConfigError::invalid(
                "min_pow",
                format!("min_pow {} exceeds max_pow {}", self.min_pow, self.max_pow),
            ));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::invalid("ticks_per_second", "must be positive"));
        }
        for (field, value) in [("refl_ort", self.refl_ort), ("refl_par", self.refl_par)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")));
            }
        }
        if self.enemy_jitter < 0 {
            return Err(ConfigError::invalid("enemy_jitter", "must not be negative"));
        }
        if self.max_target_radius < 1 {
            return Err(ConfigError::invalid("max_target_radius", "must be at least 1"));
        }
        // Bombs must fall to leave the arena, shells must move to settle
        for (field, value) in [("bomb_speed", self.bomb_speed), ("dt", self.dt)] {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, format!("{value} must be positive")));
            }
        }
        for (field, value) in [("gravity", self.gravity), ("charge_step", self.charge_step)] {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, format!("{value} must not be negative")));
            }
        }
        Ok(())
    }

    /// Duration of one tick in milliseconds
    pub fn ms_per_tick(&self) -> u64 {
        1000 / u64::from(self.ticks_per_second.max(1))
    }
}
