//! Render hand-off
//!
//! The engine never draws. Each tick it can describe the arena as a flat
//! list of draw commands plus the score lines, and the host turns those into
//! pixels however it likes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::body::{Body, Color, colors};
use crate::sim::score::ScoreTable;
use crate::sim::state::World;

/// One primitive to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Polygon from explicit vertices. `outline` is the stroke width, None
    /// means filled.
    Polygon {
        points: Vec<Vec2>,
        color: Color,
        outline: Option<f32>,
    },
    /// Filled axis-aligned quad
    Quad { points: [Vec2; 4], color: Color },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Circle { color, .. }
            | DrawCommand::Polygon { color, .. }
            | DrawCommand::Quad { color, .. } => *color,
        }
    }
}

/// A line of HUD text at a screen position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
}

/// Everything the host needs to draw one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub score_lines: Vec<ScoreLine>,
}

/// Score display: destroyed, used, and total (in red), stacked 30 units apart
pub fn score_lines(score: &ScoreTable) -> Vec<ScoreLine> {
    let rows = [
        (format!("Destroyed: {}", score.destroyed), colors::WHITE),
        (format!("Balls used: {}", score.used), colors::WHITE),
        (format!("Total: {}", score.score()), colors::RED),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (text, color))| ScoreLine {
            text,
            pos: Vec2::new(10.0, 10.0 + 30.0 * i as f32),
            color,
        })
        .collect()
}

/// Describe the whole arena: shells, targets, bombs, then both cannons
pub fn build_frame(world: &World) -> Frame {
    let bodies = world
        .shells
        .iter()
        .chain(&world.enemy_shells)
        .map(|s| s.draw())
        .chain(world.targets.iter().map(|t| t.draw()))
        .chain(world.bombs.iter().map(|b| b.draw()));
    let mut commands: Vec<DrawCommand> = bodies.collect();
    commands.push(world.player.draw());
    commands.push(world.enemy.cannon.draw());
    Frame {
        commands,
        score_lines: score_lines(&world.score),
    }
}
