//! Falling bombs
//!
//! Bombs drift at a constant velocity with no gravity and no bouncing. They
//! are gone once they pass the bottom edge or hit the player cannon.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Color, colors};
use crate::render::DrawCommand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alive: bool,
}

impl Bomb {
    /// A red bomb falling straight down at `speed` per tick
    pub fn falling(pos: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, speed),
            radius,
            color: colors::RED,
            alive: true,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Past the bottom edge of an arena `height` tall
    pub fn below(&self, height: f32) -> bool {
        self.pos.y > height
    }
}

impl Body for Bomb {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn draw(&self) -> DrawCommand {
        DrawCommand::Circle {
            center: self.pos,
            radius: self.radius,
            color: self.color,
        }
    }
}
