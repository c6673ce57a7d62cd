//! Simulation lifecycle
//!
//! [`SimulationManager`] is what a host constructs and drives: it owns the
//! [`World`] and the injected clock, and runs one tick per `process` call
//! between an explicit `start` and `stop`.

use serde::{Deserialize, Serialize};

use super::score::ScoreTable;
use super::state::{GameEvent, World};
use super::tick::{new_mission, tick};
use crate::error::ConfigError;
use crate::platform::input::TickInput;
use crate::platform::time::{Clock, SystemClock};
use crate::render::{Frame, build_frame};
use crate::settings::Settings;

/// Where the manager is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Constructed, no mission yet
    Ready,
    /// Ticking
    Running,
    /// Quit was requested or `stop` was called
    Stopped,
}

pub struct SimulationManager<C: Clock = SystemClock> {
    world: World,
    clock: C,
    lifecycle: Lifecycle,
}

impl<C: Clock> SimulationManager<C> {
    /// Build a manager over validated settings and a tick source
    pub fn new(settings: Settings, clock: C) -> Result<Self, ConfigError> {
        settings.validate()?;
        log::info!(
            "Arena {}x{}, {} targets per side, seed {}",
            settings.width,
            settings.height,
            settings.n_targets,
            settings.seed
        );
        Ok(Self {
            world: World::new(settings),
            clock,
            lifecycle: Lifecycle::Ready,
        })
    }

    /// Spawn the first mission and begin accepting ticks
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Ready {
            log::warn!("start() ignored in {:?}", self.lifecycle);
            return;
        }
        new_mission(&mut self.world);
        self.lifecycle = Lifecycle::Running;
        log::info!("Simulation started");
    }

    /// Run one tick. Returns true once the session should end.
    ///
    /// Before `start` this does nothing and returns false; after `stop` it
    /// keeps returning true.
    pub fn process(&mut self, input: &TickInput) -> bool {
        match self.lifecycle {
            Lifecycle::Ready => false,
            Lifecycle::Stopped => true,
            Lifecycle::Running => {
                self.clock.advance();
                let done = tick(&mut self.world, input, self.clock.now_ms());
                if done {
                    self.stop();
                }
                done
            }
        }
    }

    pub fn stop(&mut self) {
        if self.lifecycle != Lifecycle::Stopped {
            self.lifecycle = Lifecycle::Stopped;
            log::info!(
                "Simulation stopped after {} ticks, score {}",
                self.world.time_ticks,
                self.world.score.score()
            );
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Draw commands and score lines for the current state
    pub fn frame(&self) -> Frame {
        build_frame(&self.world)
    }

    /// Events since the previous drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }

    pub fn score(&self) -> ScoreTable {
        self.world.score
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct state access, for hosts that script scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}
