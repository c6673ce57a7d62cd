//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Time only through the injected clock
//! - No rendering or platform dependencies beyond the input contract

pub mod body;
pub mod bomb;
pub mod cannon;
pub mod collision;
pub mod manager;
pub mod projectile;
pub mod score;
pub mod state;
pub mod target;
pub mod tick;

pub use body::{Body, Color, Shape};
pub use bomb::Bomb;
pub use cannon::{
    Cannon, CannonConfig, CannonState, ChargedShot, EnemyCannon, FirePolicy, FixedSpeedShot,
    PlayerCannon,
};
pub use collision::{Hit, circles_collide};
pub use manager::{Lifecycle, SimulationManager};
pub use projectile::{Ballistics, Projectile};
pub use score::ScoreTable;
pub use state::{EventLog, GameEvent, MAX_PENDING_EVENTS, World};
pub use target::{Drift, DriftMode, Motion, Target};
pub use tick::{new_mission, radius_bounds, tick};
