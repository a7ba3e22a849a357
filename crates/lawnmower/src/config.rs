use crate::error::{LawnError, Result};
use serde::{Deserialize, Serialize};

/// Consecutive in-place turns tolerated before `too_many_turns` applies.
pub const TURN_LIMIT: usize = 3;

/// Reward constants handed out by [`crate::GridWorld::step_action`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub exceeded: f32,
    pub obstacle_collision: f32,
    pub all_mowed: f32,
    pub mowed: f32,
    /// Moving onto a cell that was already mowed.
    pub not_mowed: f32,
    /// Turning without leaving the current cell.
    pub turn_in_place: f32,
    pub too_many_turns: f32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            exceeded: -100.0,
            obstacle_collision: -100.0,
            all_mowed: 100.0,
            mowed: 10.0,
            not_mowed: -1.0,
            turn_in_place: -1.0,
            too_many_turns: -10.0,
        }
    }
}

/// Per-episode parameters, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub obstacle_number: usize,
    pub max_steps: usize,
    #[serde(default)]
    pub rewards: Rewards,
}

impl Config {
    #[must_use]
    pub fn new(width: usize, height: usize, obstacle_number: usize, max_steps: usize) -> Self {
        Self {
            width,
            height,
            obstacle_number,
            max_steps,
            rewards: Rewards::default(),
        }
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = rewards;
        self
    }

    /// Number of cells inside the obstacle border, `None` if it overflows `usize`.
    #[must_use]
    pub fn interior_cells(&self) -> Option<usize> {
        self.width
            .saturating_sub(2)
            .checked_mul(self.height.saturating_sub(2))
    }

    /// Checks the grid is large enough and leaves the mower a free cell.
    ///
    /// # Errors
    ///
    /// Returns [`LawnError::Configuration`] naming the violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(LawnError::Configuration(format!(
                "grid must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = self.width.checked_mul(self.height);
        let Some(interior) = cells.and(self.interior_cells()) else {
            return Err(LawnError::Configuration(format!(
                "grid too large: {}x{}",
                self.width, self.height
            )));
        };
        let capacity = interior - 1;
        if self.obstacle_number > capacity {
            return Err(LawnError::Configuration(format!(
                "{} obstacles do not fit a {}x{} grid (at most {capacity})",
                self.obstacle_number, self.width, self.height
            )));
        }
        Ok(())
    }
}
