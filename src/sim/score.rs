//! Score keeping

use serde::{Deserialize, Serialize};

/// Destroyed targets against shells spent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Targets destroyed by player shells
    pub destroyed: u32,
    /// Player shells fired
    pub used: u32,
    /// Bombs that reached the player cannon (does not affect the score)
    pub hits_taken: u32,
}

impl ScoreTable {
    /// Destroyed minus used. Goes negative when the player misses a lot.
    pub fn score(&self) -> i64 {
        i64::from(self.destroyed) - i64::from(self.used)
    }

    /// Score floored at zero, used for difficulty scaling
    pub fn progress(&self) -> u32 {
        self.destroyed.saturating_sub(self.used)
    }
}
