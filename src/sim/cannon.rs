//! Cannons: charge-and-fire controllers that produce shells
//!
//! A [`Cannon`] owns its position, aim and charge state. How a shot leaves
//! the barrel is a [`FirePolicy`]: the player's shell speed follows the
//! charge, the enemy fires a fixed-speed shell straight at its aim point.
//! [`EnemyCannon`] wraps a cannon with its random repositioning and the
//! cooldown-gated auto-fire.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Color, Shape, colors, random_color};
use super::projectile::Projectile;
use crate::consts::BARREL_HALF_WIDTH;
use crate::render::DrawCommand;
use crate::settings::Settings;
use crate::{polar_to_cartesian, trunc_vec};

/// Aim, charge and placement of a cannon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannonState {
    pub pos: Vec2,
    /// Barrel direction in radians, y grows downward
    pub angle: f32,
    /// Current charge
    pub pow: f32,
    pub min_pow: f32,
    pub max_pow: f32,
    /// Charging
    pub active: bool,
    pub color: Color,
    /// Clock time of the last shot, None before the first one
    pub last_fired_ms: Option<u64>,
}

impl CannonState {
    pub fn direction(&self) -> Vec2 {
        polar_to_cartesian(1.0, self.angle)
    }
}

/// Fresh construction parameters for one cannon
#[derive(Debug, Clone, PartialEq)]
pub struct CannonConfig {
    pub pos: Vec2,
    pub start_pow: f32,
    pub min_pow: f32,
    pub max_pow: f32,
    pub color: Color,
    pub bounds: Vec2,
    pub margin: f32,
    pub radius: f32,
}

impl CannonConfig {
    /// Left edge, vertically centered, red
    pub fn player(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.cannon_margin, (settings.height / 2.0).floor()),
            start_pow: settings.min_pow,
            min_pow: settings.min_pow,
            max_pow: settings.max_pow,
            color: colors::RED,
            bounds: Vec2::new(settings.width, settings.height),
            margin: settings.cannon_margin,
            radius: settings.cannon_radius,
        }
    }

    /// Right edge, vertically centered, blue, starts part-charged
    pub fn enemy(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(
                settings.width - settings.cannon_margin,
                (settings.height / 2.0).floor(),
            ),
            start_pow: settings.enemy_start_pow,
            color: colors::BLUE,
            ..Self::player(settings)
        }
    }
}

/// Decides the launch velocity of a shell
pub trait FirePolicy {
    fn launch_velocity(&self, state: &CannonState) -> Vec2;
}

/// Speed equals the current charge
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargedShot;

impl FirePolicy for ChargedShot {
    fn launch_velocity(&self, state: &CannonState) -> Vec2 {
        state.direction() * state.pow
    }
}

/// Same speed every time, regardless of charge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpeedShot {
    pub speed: f32,
}

impl FirePolicy for FixedSpeedShot {
    fn launch_velocity(&self, state: &CannonState) -> Vec2 {
        state.direction() * self.speed
    }
}

/// A cannon with a pluggable fire policy
#[derive(Debug, Clone, PartialEq)]
pub struct Cannon<F> {
    pub state: CannonState,
    pub fire: F,
    bounds: Vec2,
    margin: f32,
    radius: f32,
}

impl<F: FirePolicy> Cannon<F> {
    pub fn new(config: CannonConfig, fire: F) -> Self {
        let min_pow = config.min_pow.min(config.max_pow);
        Self {
            state: CannonState {
                pos: config.pos,
                angle: 0.0,
                pow: config.start_pow.clamp(min_pow, config.max_pow),
                min_pow,
                max_pow: config.max_pow,
                active: false,
                color: config.color,
                last_fired_ms: None,
            },
            fire,
            bounds: config.bounds,
            margin: config.margin,
            radius: config.radius,
        }
    }

    /// Start charging
    pub fn activate(&mut self) {
        self.state.active = true;
    }

    /// Add charge while active, never past `max_pow`
    pub fn gain(&mut self, inc: f32) {
        if self.state.active {
            self.state.pow = (self.state.pow + inc).min(self.state.max_pow);
        }
    }

    /// Fire a shell and return to idle at minimum charge
    ///
    /// Launch velocity is truncated to whole units.
    pub fn strike(&mut self, now_ms: u64, rng: &mut impl Rng) -> Projectile {
        let vel = trunc_vec(self.fire.launch_velocity(&self.state));
        let shell = Projectile::new(self.state.pos, vel, random_color(rng), Shape::random(rng));
        self.state.pow = self.state.min_pow;
        self.state.active = false;
        self.state.last_fired_ms = Some(now_ms);
        shell
    }

    /// Point the barrel at `target`
    pub fn set_angle(&mut self, target: Vec2) {
        let d = target - self.state.pos;
        self.state.angle = d.y.atan2(d.x);
    }

    /// Move vertically, keeping the center `margin` away from top and bottom
    pub fn vertical_move(&mut self, inc: f32) {
        let (lo, hi) = (self.margin, self.bounds.y - self.margin);
        self.state.pos.y = (self.state.pos.y + inc).clamp(lo, hi);
    }

    /// Move horizontally, keeping the center `margin` away from both sides
    pub fn horizontal_move(&mut self, inc: f32) {
        let (lo, hi) = (self.margin, self.bounds.x - self.margin);
        self.state.pos.x = (self.state.pos.x + inc).clamp(lo, hi);
    }

    /// Barrel quad: half-width 5 across the aim, length equal to the charge
    pub fn barrel(&self) -> [Vec2; 4] {
        let s = &self.state;
        let side = trunc_vec(polar_to_cartesian(
            BARREL_HALF_WIDTH,
            s.angle - std::f32::consts::FRAC_PI_2,
        ));
        let length = trunc_vec(polar_to_cartesian(s.pow, s.angle));
        [
            s.pos + side,
            s.pos + side + length,
            s.pos + length - side,
            s.pos - side,
        ]
    }
}

impl<F: FirePolicy> Body for Cannon<F> {
    fn pos(&self) -> Vec2 {
        self.state.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn draw(&self) -> DrawCommand {
        DrawCommand::Polygon {
            points: self.barrel().to_vec(),
            color: self.state.color,
            outline: None,
        }
    }
}

/// The player's cannon
pub type PlayerCannon = Cannon<ChargedShot>;

/// AI cannon: pursues the player with its aim and jitters around when the
/// player moves
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyCannon {
    pub cannon: Cannon<FixedSpeedShot>,
    /// Max per-axis random step
    pub jitter: i32,
    pub cooldown_ms: u64,
}

impl EnemyCannon {
    pub fn new(settings: &Settings) -> Self {
        Self {
            cannon: Cannon::new(
                CannonConfig::enemy(settings),
                FixedSpeedShot {
                    speed: settings.enemy_shot_speed,
                },
            ),
            jitter: settings.enemy_jitter.max(0),
            cooldown_ms: settings.enemy_cooldown_ms,
        }
    }

    pub fn activate(&mut self) {
        self.cannon.activate();
    }

    pub fn strike(&mut self, now_ms: u64, rng: &mut impl Rng) -> Projectile {
        self.cannon.strike(now_ms, rng)
    }

    /// Random step on both axes, clamped to the arena margin
    pub fn cannon_movement(&mut self, rng: &mut impl Rng) {
        let dy = rng.random_range(-self.jitter..=self.jitter) as f32;
        self.cannon.vertical_move(dy);
        let dx = rng.random_range(-self.jitter..=self.jitter) as f32;
        self.cannon.horizontal_move(dx);
    }

    /// Turn the barrel toward the player. Returns the new angle.
    pub fn aim_at_user(&mut self, user: Vec2) -> f32 {
        self.cannon.set_angle(user);
        self.cannon.state.angle
    }

    /// Fire if the player has been quiet for the full cooldown
    ///
    /// The cooldown also runs from the enemy's own last shot, so a quiet
    /// player gets one shell per cooldown period rather than one per tick.
    pub fn shoot(
        &mut self,
        last_player_shot_ms: u64,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Option<Projectile> {
        let reference = self
            .cannon
            .state
            .last_fired_ms
            .map_or(last_player_shot_ms, |own| own.max(last_player_shot_ms));
        if now_ms.saturating_sub(reference) >= self.cooldown_ms {
            Some(self.strike(now_ms, rng))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> PlayerCannon {
        Cannon::new(CannonConfig::player(&Settings::default()), ChargedShot)
    }

    #[test]
    fn test_default_placement() {
        let settings = Settings::default();
        let p = player();
        let e = EnemyCannon::new(&settings);
        assert_eq!(p.state.pos, Vec2::new(30.0, 300.0));
        assert_eq!(e.cannon.state.pos, Vec2::new(770.0, 300.0));
        assert_eq!(p.state.pow, 10.0);
        assert_eq!(e.cannon.state.pow, 35.0);
    }

    #[test]
    fn test_gain_requires_active() {
        let mut c = player();
        c.gain(2.0);
        assert_eq!(c.state.pow, 10.0);
        c.activate();
        c.gain(2.0);
        assert_eq!(c.state.pow, 12.0);
    }

    #[test]
    fn test_gain_caps_at_max() {
        let mut c = player();
        c.activate();
        for _ in 0..100 {
            c.gain(3.0);
        }
        assert_eq!(c.state.pow, 50.0);
    }

    #[test]
    fn test_strike_resets_and_scales_by_power() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut c = player();
        c.set_angle(c.state.pos + Vec2::new(0.0, -40.0));
        c.activate();
        for _ in 0..5 {
            c.gain(2.0);
        }
        let shell = c.strike(1234, &mut rng);
        // pow 20, straight up
        assert_eq!(shell.vel, Vec2::new(0.0, -20.0));
        assert_eq!(shell.pos, c.state.pos);
        assert!(!c.state.active);
        assert_eq!(c.state.pow, c.state.min_pow);
        assert_eq!(c.state.last_fired_ms, Some(1234));
    }

    #[test]
    fn test_set_angle_uses_screen_coordinates() {
        let mut c = player();
        c.set_angle(c.state.pos + Vec2::new(0.0, 10.0));
        assert!((c.state.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_moves_clamped_to_margin() {
        let mut c = player();
        c.horizontal_move(-5.0);
        assert_eq!(c.state.pos.x, 30.0);
        for _ in 0..200 {
            c.vertical_move(5.0);
        }
        assert_eq!(c.state.pos.y, 570.0);
        for _ in 0..200 {
            c.horizontal_move(5.0);
        }
        assert_eq!(c.state.pos.x, 770.0);
    }

    #[test]
    fn test_enemy_shot_aims_at_player() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut e = EnemyCannon::new(&settings);
        let angle = e.aim_at_user(Vec2::new(30.0, 300.0));
        assert!((angle.abs() - std::f32::consts::PI).abs() < 1e-6);
        let shell = e.strike(0, &mut rng);
        assert_eq!(shell.vel, Vec2::new(-35.0, 0.0));
        assert_eq!(e.cannon.state.pow, settings.min_pow);
    }

    #[test]
    fn test_enemy_movement_stays_in_arena() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut e = EnemyCannon::new(&settings);
        for _ in 0..500 {
            e.cannon_movement(&mut rng);
            let p = e.cannon.state.pos;
            assert!((30.0..=770.0).contains(&p.x));
            assert!((30.0..=570.0).contains(&p.y));
        }
    }

    #[test]
    fn test_enemy_auto_fire_cooldown() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut e = EnemyCannon::new(&settings);
        assert!(e.shoot(0, 1999, &mut rng).is_none());
        assert!(e.shoot(0, 2000, &mut rng).is_some());
        // Own shot restarts the cooldown
        assert!(e.shoot(0, 2500, &mut rng).is_none());
        assert!(e.shoot(0, 4000, &mut rng).is_some());
        // A fresh player shot also holds fire
        assert!(e.shoot(5000, 6000, &mut rng).is_none());
        assert!(e.shoot(5000, 7000, &mut rng).is_some());
    }

    #[test]
    fn test_barrel_length_tracks_power() {
        let c = player();
        let barrel = c.barrel();
        // angle 0: side offset is (0, -5), length (10, 0)
        assert_eq!(barrel[0], Vec2::new(30.0, 295.0));
        assert_eq!(barrel[1], Vec2::new(40.0, 295.0));
        assert_eq!(barrel[2], Vec2::new(40.0, 305.0));
        assert_eq!(barrel[3], Vec2::new(30.0, 305.0));
    }

    proptest! {
        #[test]
        fn prop_charge_never_exceeds_max(steps in 0usize..60, inc in 0.0f32..20.0) {
            let mut c = player();
            c.activate();
            for _ in 0..steps {
                c.gain(inc);
                prop_assert!(c.state.pow <= c.state.max_pow);
            }
        }

        #[test]
        fn prop_strike_direction_matches_angle(
            theta in -3.1f32..3.1, charges in 0usize..25, seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut c = player();
            c.state.angle = theta;
            c.activate();
            for _ in 0..charges {
                c.gain(2.0);
            }
            let pow = c.state.pow;
            let shell = c.strike(0, &mut rng);
            let expected = polar_to_cartesian(pow, theta);
            prop_assert!((shell.vel.x - expected.x).abs() < 1.0);
            prop_assert!((shell.vel.y - expected.y).abs() < 1.0);
            prop_assert!(!c.state.active);
            prop_assert_eq!(c.state.pow, c.state.min_pow);
        }
    }
}
