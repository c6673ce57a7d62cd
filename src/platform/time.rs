//! Tick sources
//!
//! The engine only reads time for cooldown comparisons, so the clock is
//! injected: wall time for a live host, fixed steps for replays and tests.

use std::time::Instant;

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since the clock was created
    fn now_ms(&self) -> u64;

    /// Called once at the start of every tick
    fn advance(&mut self) {}
}

/// Wall-clock time from [`Instant`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Deterministic clock that moves forward a fixed step per tick
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    now: u64,
    step_ms: u64,
}

impl FixedStepClock {
    pub fn new(step_ms: u64) -> Self {
        Self { now: 0, step_ms }
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn advance(&mut self) {
        self.now = self.now.saturating_add(self.step_ms);
    }
}
