//! Shared traits and primitives for arena bodies

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::render::DrawCommand;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const BLUE: Color = [0.0, 0.0, 1.0, 1.0];
}

/// Random opaque color with 8-bit channel resolution
pub fn random_color(rng: &mut impl Rng) -> Color {
    let mut channel = || rng.random_range(0..=255u8) as f32 / 255.0;
    [channel(), channel(), channel(), 1.0]
}

/// Visual outline of a body. Collision always uses the bounding circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Circle,
    Triangle,
    Square,
}

impl Shape {
    /// Map a side count in 0..=4 to a shape: 3 is a triangle, 4 a square,
    /// anything else a circle
    pub fn from_sides(sides: u32) -> Self {
        match sides {
            3 => Shape::Triangle,
            4 => Shape::Square,
            _ => Shape::Circle,
        }
    }

    /// Roll a side count uniformly in 0..=4, so circles come up 3 times in 5
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::from_sides(rng.random_range(0..=4))
    }

    /// Build the draw command for this shape centered at `center`
    pub fn draw(self, center: Vec2, radius: f32, color: Color) -> DrawCommand {
        match self {
            Shape::Circle => DrawCommand::Circle {
                center,
                radius,
                color,
            },
            Shape::Triangle => DrawCommand::Polygon {
                points: regular_polygon(center, radius, 3),
                color,
                outline: Some(radius),
            },
            Shape::Square => DrawCommand::Quad {
                points: square(center, radius),
                color,
            },
        }
    }
}

/// Vertices of an N-gon at angles 2π·i/N, offsets truncated to whole units
pub fn regular_polygon(center: Vec2, radius: f32, sides: u32) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / sides as f32;
    (0..sides)
        .map(|i| {
            let theta = i as f32 * step;
            let offset = crate::trunc_vec(crate::polar_to_cartesian(radius, theta));
            center + offset
        })
        .collect()
}

/// Axis-aligned square with half-extent `radius`, clockwise from top-left
pub fn square(center: Vec2, radius: f32) -> [Vec2; 4] {
    [
        center + Vec2::new(-radius, -radius),
        center + Vec2::new(radius, -radius),
        center + Vec2::new(radius, radius),
        center + Vec2::new(-radius, radius),
    ]
}

/// Anything with a position and a bounding circle
pub trait Body {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// Draw commands for this body
    fn draw(&self) -> DrawCommand;

    /// Circle-circle overlap test, touching counts as a hit
    fn collides_with(&self, other: &dyn Body) -> bool {
        super::collision::circles_collide(self.pos(), self.radius(), other.pos(), other.radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_shape_from_sides() {
        assert_eq!(Shape::from_sides(0), Shape::Circle);
        assert_eq!(Shape::from_sides(2), Shape::Circle);
        assert_eq!(Shape::from_sides(3), Shape::Triangle);
        assert_eq!(Shape::from_sides(4), Shape::Square);
    }

    #[test]
    fn test_triangle_vertices() {
        let points = regular_polygon(Vec2::new(100.0, 100.0), 20.0, 3);
        assert_eq!(points.len(), 3);
        // First vertex sits on the +x axis
        assert_eq!(points[0], Vec2::new(120.0, 100.0));
        // sin(120°) * 20 = 17.32 -> 17
        assert_eq!(points[1].y, 117.0);
        assert_eq!(points[2].y, 83.0);
        assert!(points.iter().all(|p| p.x == p.x.trunc()));
    }

    #[test]
    fn test_square_vertices() {
        let points = square(Vec2::new(50.0, 50.0), 10.0);
        assert_eq!(points[0], Vec2::new(40.0, 40.0));
        assert_eq!(points[2], Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_random_color_is_opaque() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let c = random_color(&mut rng);
            assert_eq!(c[3], 1.0);
            assert!(c[..3].iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }
}
