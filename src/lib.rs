//! Cannon Arena - a 2D artillery game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, cannons, missions)
//! - `platform`: Host-facing input and clock contracts
//! - `render`: Draw-command hand-off for whatever renders the arena
//! - `settings`: Data-driven game balance and arena bounds

pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;
pub use sim::SimulationManager;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Reference arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Host tick rate
    pub const TICKS_PER_SECOND: u32 = 15;

    /// Gravity added to shell vertical velocity each tick
    pub const GRAVITY: f32 = 2.0;
    /// Normal restitution on wall bounce
    pub const REFL_ORT: f32 = 0.8;
    /// Tangential friction on wall bounce
    pub const REFL_PAR: f32 = 0.9;
    /// Shells slower than this (units/tick) near the floor are dead
    pub const REST_SPEED: f32 = 2.0;
    pub const SHELL_RADIUS: f32 = 20.0;

    /// Player cannon charge bounds
    pub const MIN_POW: f32 = 10.0;
    pub const MAX_POW: f32 = 50.0;
    pub const CHARGE_STEP: f32 = 2.0;

    /// Enemy cannon
    pub const ENEMY_START_POW: f32 = 35.0;
    pub const ENEMY_SHOT_SPEED: f32 = 35.0;
    pub const ENEMY_JITTER: i32 = 30;
    pub const ENEMY_COOLDOWN_MS: u64 = 2000;

    /// Cannon movement
    pub const MOVE_STEP: f32 = 5.0;
    pub const CANNON_MARGIN: f32 = 30.0;
    /// Collision radius used for bomb hits on the player cannon
    pub const CANNON_RADIUS: f32 = 15.0;
    /// Barrel half-width for drawing
    pub const BARREL_HALF_WIDTH: f32 = 5.0;

    /// Bombs fall straight down
    pub const BOMB_SPEED: f32 = 5.0;
    pub const BOMB_RADIUS: f32 = 10.0;

    /// Targets
    pub const MAX_TARGET_RADIUS: i32 = 30;
    pub const TARGET_ACCEL: f32 = 0.1;
    pub const TARGET_MAX_DRIFT: i32 = 2;
    pub const N_TARGETS: usize = 4;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Drop the fractional part of both components (toward zero)
#[inline]
pub fn trunc_vec(v: Vec2) -> Vec2 {
    Vec2::new(v.x.trunc(), v.y.trunc())
}
