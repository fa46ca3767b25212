//! Merge streak tracking and rewards.
//!
//! A streak counts consecutive completed moves that produced at least one
//! merge; the "perfect" streak counts consecutive moves with two or more
//! merges. A move with zero merges resets both. Discrete rewards fire on
//! exact streak values only - a streak that passes 15 earns nothing
//! further, because the counter only ever increments by one and each tier
//! is keyed by equality.

use serde::{Deserialize, Serialize};

/// One row of the streak reward table.
#[derive(Clone, Copy, Debug)]
pub struct StreakTier {
    /// Exact streak value that triggers this tier.
    pub streak: u32,
    /// Bonus points awarded.
    pub points: u32,
    /// Whether this tier also grants a random power-up.
    pub random_power_up: bool,
}

/// Discrete streak rewards, keyed by exact streak value.
pub const STREAK_TIERS: [StreakTier; 5] = [
    StreakTier { streak: 3, points: 50, random_power_up: false },
    StreakTier { streak: 5, points: 150, random_power_up: false },
    StreakTier { streak: 7, points: 300, random_power_up: false },
    StreakTier { streak: 10, points: 500, random_power_up: true },
    StreakTier { streak: 15, points: 1000, random_power_up: false },
];

/// Current and best streak counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive moves with at least one merge.
    pub current_merge_streak: u32,
    /// Best merge streak ever reached.
    pub best_merge_streak: u32,
    /// Consecutive moves with two or more merges.
    pub current_perfect_streak: u32,
    /// Best perfect streak ever reached.
    pub best_perfect_streak: u32,
}

/// What one streak update produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakUpdate {
    /// The merge streak after the update.
    pub streak: u32,
    /// Bonus points from the reward table, 0 if no tier was hit.
    pub reward_points: u32,
    /// True if the hit tier also grants a random power-up.
    pub random_power_up: bool,
    /// True if either best counter improved.
    pub best_changed: bool,
}

impl StreakState {
    /// Create zeroed streak counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore counters with persisted bests and zeroed currents.
    #[must_use]
    pub fn with_bests(best_merge: u32, best_perfect: u32) -> Self {
        Self {
            best_merge_streak: best_merge,
            best_perfect_streak: best_perfect,
            ..Self::default()
        }
    }

    /// Update the counters for one completed move.
    ///
    /// `merge_count` is the number of merges that move produced.
    pub fn apply(&mut self, merge_count: usize) -> StreakUpdate {
        if merge_count == 0 {
            self.current_merge_streak = 0;
            self.current_perfect_streak = 0;
            return StreakUpdate::default();
        }

        self.current_merge_streak += 1;
        if merge_count >= 2 {
            self.current_perfect_streak += 1;
        } else {
            self.current_perfect_streak = 0;
        }

        let mut best_changed = false;
        if self.current_merge_streak > self.best_merge_streak {
            self.best_merge_streak = self.current_merge_streak;
            best_changed = true;
        }
        if self.current_perfect_streak > self.best_perfect_streak {
            self.best_perfect_streak = self.current_perfect_streak;
            best_changed = true;
        }

        let mut update = StreakUpdate {
            streak: self.current_merge_streak,
            best_changed,
            ..StreakUpdate::default()
        };

        if let Some(tier) = STREAK_TIERS
            .iter()
            .find(|tier| tier.streak == self.current_merge_streak)
        {
            update.reward_points = tier.points;
            update.random_power_up = tier.random_power_up;
        }

        update
    }

    /// Reset the current counters, keeping the bests. Called on new game.
    pub fn reset_current(&mut self) {
        self.current_merge_streak = 0;
        self.current_perfect_streak = 0;
    }
}
