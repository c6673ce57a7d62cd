//! Targets
//!
//! A target is a round body with a pluggable motion policy. Static targets
//! never move; drifting targets roll a fresh movement mode every tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Color, Shape, random_color};
use crate::consts::{TARGET_ACCEL, TARGET_MAX_DRIFT};
use crate::render::DrawCommand;

/// How a drifting target moves on a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftMode {
    /// Position integrates the current velocity
    Linear,
    /// Velocity integrates the acceleration first, then position
    Accelerating,
}

impl DriftMode {
    /// Even odds between the two modes
    pub fn roll(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            DriftMode::Accelerating
        } else {
            DriftMode::Linear
        }
    }
}

/// Velocity and constant acceleration of a drifting target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub vel: Vec2,
    pub accel: Vec2,
}

impl Drift {
    /// Whole-unit velocity in -2..=2 on each axis, standard acceleration
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut component = || rng.random_range(-TARGET_MAX_DRIFT..=TARGET_MAX_DRIFT) as f32;
        Self {
            vel: Vec2::new(component(), component()),
            accel: Vec2::splat(TARGET_ACCEL),
        }
    }

    pub fn step(&mut self, pos: &mut Vec2, mode: DriftMode) {
        if mode == DriftMode::Accelerating {
            self.vel += self.accel;
        }
        *pos += self.vel;
    }
}

/// Motion policy attached to a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Stationary,
    Drifting(Drift),
}

/// A target to shoot at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    pub shape: Shape,
    pub color: Color,
    pub motion: Motion,
}

impl Target {
    pub fn new(pos: Vec2, radius: f32, motion: Motion) -> Self {
        Self {
            pos,
            radius,
            shape: Shape::Circle,
            color: [1.0; 4],
            motion,
        }
    }

    /// Random position fully inside `bounds`, random shape and color
    pub fn spawn(rng: &mut impl Rng, bounds: Vec2, radius: i32, motion: Motion) -> Self {
        let mut coord = |extent: f32| {
            let hi = (extent as i32 - radius).max(radius);
            rng.random_range(radius..=hi) as f32
        };
        let pos = Vec2::new(coord(bounds.x), coord(bounds.y));
        Self {
            pos,
            radius: radius as f32,
            shape: Shape::random(rng),
            color: random_color(rng),
            motion,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Drifting(_))
    }

    /// Apply this target's motion policy for one tick
    pub fn advance(&mut self, rng: &mut impl Rng) {
        if let Motion::Drifting(drift) = &mut self.motion {
            let mode = DriftMode::roll(rng);
            drift.step(&mut self.pos, mode);
        }
    }
}

impl Body for Target {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn draw(&self) -> DrawCommand {
        self.shape.draw(self.pos, self.radius, self.color)
    }
}
