//! World state and core simulation types
//!
//! Everything a tick reads or mutates lives in [`World`]. It is owned by a
//! single manager and only touched from its tick procedure.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bomb::Bomb;
use super::cannon::{Cannon, CannonConfig, ChargedShot, EnemyCannon, PlayerCannon};
use super::projectile::{Ballistics, Projectile};
use super::score::ScoreTable;
use super::target::Target;
use crate::settings::Settings;

/// Something that happened during a tick, for the host to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh wave of targets and bombs was spawned
    MissionStarted { index: u32, targets: usize },
    /// A player shell destroyed a target
    TargetDestroyed { pos: Vec2, radius: f32 },
    /// The player fired a shell with this launch velocity
    ShotFired { vel: Vec2 },
    /// The enemy fired, either alongside the player or on its own
    EnemyShotFired { vel: Vec2, auto: bool },
    /// A bomb reached the player cannon
    CannonHit { pos: Vec2 },
}

/// Most events kept between drains; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Bounded FIFO of undrained events
///
/// Hosts that never drain still run in constant memory: once full, each
/// push evicts the oldest event.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    queue: VecDeque<GameEvent>,
    dropped: u64,
}

impl EventLog {
    pub fn push(&mut self, event: GameEvent) {
        if self.queue.len() >= MAX_PENDING_EVENTS {
            self.queue.pop_front();
            self.dropped += 1;
        }
        self.queue.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Events evicted unread since the log was created
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.queue.iter()
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub ballistics: Ballistics,
    pub player: PlayerCannon,
    pub enemy: EnemyCannon,
    /// Player shells
    pub shells: Vec<Projectile>,
    /// Enemy shells, index-paired with `shells` for removal
    pub enemy_shells: Vec<Projectile>,
    pub targets: Vec<Target>,
    pub bombs: Vec<Bomb>,
    pub score: ScoreTable,
    /// Missions generated so far
    pub missions: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Where the pointer was last pressed
    pub aim_point: Option<Vec2>,
    /// Events since the last drain, capped at [`MAX_PENDING_EVENTS`]
    pub events: EventLog,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Empty arena with both cannons in their start positions
    ///
    /// No mission is spawned yet; see [`super::tick::new_mission`].
    pub fn new(settings: Settings) -> Self {
        Self {
            ballistics: Ballistics::from_settings(&settings),
            player: Cannon::new(CannonConfig::player(&settings), ChargedShot),
            enemy: EnemyCannon::new(&settings),
            shells: Vec::new(),
            enemy_shells: Vec::new(),
            targets: Vec::new(),
            bombs: Vec::new(),
            score: ScoreTable::default(),
            missions: 0,
            time_ticks: 0,
            aim_point: None,
            events: EventLog::default(),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        }
    }

    pub fn bounds(&self) -> Vec2 {
        self.ballistics.bounds
    }

    /// Inside the play surface, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        let b = self.bounds();
        (0.0..=b.x).contains(&point.x) && (0.0..=b.y).contains(&point.y)
    }

    /// A mission is cleared once every target and player shell is gone
    pub fn mission_cleared(&self) -> bool {
        self.targets.is_empty() && self.shells.is_empty()
    }

    /// Take the accumulated events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
