//! Cannon shells
//!
//! Shells fly under gravity and bounce inelastically off all four arena
//! edges until they settle on the floor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Color, Shape};
use crate::consts::{REST_SPEED, SHELL_RADIUS};
use crate::render::DrawCommand;

/// Physical constants a shell is advanced against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    /// Arena extent; y grows downward, the floor is at `bounds.y`
    pub bounds: Vec2,
    pub gravity: f32,
    pub dt: f32,
    /// Restitution normal to the wall
    pub refl_ort: f32,
    /// Friction along the wall
    pub refl_par: f32,
}

impl Ballistics {
    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self {
            bounds: Vec2::new(settings.width, settings.height),
            gravity: settings.gravity,
            dt: settings.dt,
            refl_ort: settings.refl_ort,
            refl_par: settings.refl_par,
        }
    }
}

/// A fired shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub shape: Shape,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, color: Color, shape: Shape) -> Self {
        Self {
            pos,
            vel,
            radius: SHELL_RADIUS,
            color,
            shape,
            alive: true,
        }
    }

    /// One tick of flight: gravity, integrate, bounce, then check for rest
    pub fn advance(&mut self, ballistics: &Ballistics) {
        self.vel.y += ballistics.gravity;
        self.pos += self.vel * ballistics.dt;
        self.check_corners(ballistics);

        let settled = self.vel.length_squared() < REST_SPEED * REST_SPEED
            && self.pos.y > ballistics.bounds.y - 2.0 * self.radius;
        if settled {
            self.alive = false;
        }
    }

    /// Reflect off the arena edges, one axis at a time
    ///
    /// Crossing an edge clamps the shell back inside, flips and damps the
    /// normal velocity by `refl_ort`, and damps the tangential velocity by
    /// `refl_par`.
    pub fn check_corners(&mut self, ballistics: &Ballistics) {
        let extent = ballistics.bounds.to_array();
        for axis in 0..2 {
            let other = 1 - axis;
            let low = self.radius;
            let high = extent[axis] - self.radius;
            let clamped = if self.pos[axis] < low {
                low
            } else if self.pos[axis] > high {
                high
            } else {
                continue;
            };
            self.pos[axis] = clamped;
            self.vel[axis] = -(self.vel[axis] * ballistics.refl_ort);
            self.vel[other] *= ballistics.refl_par;
        }
    }
}

impl Body for Projectile {
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
