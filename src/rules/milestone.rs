//! Tile-value milestones and score-threshold power-up grants.
//!
//! Two reward families share this state. Tile milestones pay a one-time
//! bonus the first time a listed value appears from a merge. Score
//! thresholds grant power-up charges as the score climbs, guarded by a
//! single monotone watermark: three one-time thresholds, then one hint
//! for every further 1000 points crossed. The watermark advances whether
//! or not the grant landed, so the same score delta can never pay twice.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::powerup::{PowerUpInventory, PowerUpKind};

/// One row of the tile-milestone reward table.
#[derive(Clone, Copy, Debug)]
pub struct MilestoneTier {
    /// Merged tile value that triggers this tier.
    pub value: u32,
    /// Bonus points awarded.
    pub points: u32,
    /// Whether the tier is confetti-worthy (cosmetic).
    pub confetti: bool,
}

/// Tile-value milestone rewards, each paid at most once per session.
pub const MILESTONE_TIERS: [MilestoneTier; 7] = [
    MilestoneTier { value: 128, points: 100, confetti: false },
    MilestoneTier { value: 256, points: 200, confetti: false },
    MilestoneTier { value: 512, points: 500, confetti: false },
    MilestoneTier { value: 1024, points: 1000, confetti: true },
    MilestoneTier { value: 2048, points: 5000, confetti: true },
    MilestoneTier { value: 4096, points: 10000, confetti: true },
    MilestoneTier { value: 8192, points: 20000, confetti: true },
];

/// One one-time score threshold.
#[derive(Clone, Copy, Debug)]
pub struct ScoreThreshold {
    /// Score at which the grant fires.
    pub score: u32,
    /// The power-up granted.
    pub grant: PowerUpKind,
}

/// One-time score thresholds, in ascending order.
pub const SCORE_THRESHOLDS: [ScoreThreshold; 3] = [
    ScoreThreshold { score: 1000, grant: PowerUpKind::Hint },
    ScoreThreshold { score: 2500, grant: PowerUpKind::Undo },
    ScoreThreshold { score: 5000, grant: PowerUpKind::Remove },
];

/// Past the one-time thresholds, one hint per this many points crossed.
pub const REPEAT_HINT_INTERVAL: u32 = 1000;

/// Which milestones a session has already rewarded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneState {
    /// Tile values already rewarded, sorted ascending.
    reached: Vec<u32>,
    /// Last score value a threshold grant was settled at.
    watermark: u32,
}

impl MilestoneState {
    /// Create fresh milestone state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile values already rewarded this session.
    #[must_use]
    pub fn reached(&self) -> &[u32] {
        &self.reached
    }

    /// The score-threshold watermark.
    #[must_use]
    pub fn watermark(&self) -> u32 {
        self.watermark
    }

    /// Check one merged tile value against the milestone table.
    ///
    /// Returns the tier the first time a listed value shows up; later
    /// occurrences of the same value return `None`.
    pub fn check_tile(&mut self, value: u32) -> Option<MilestoneTier> {
        let tier = *MILESTONE_TIERS.iter().find(|tier| tier.value == value)?;
        if self.reached.contains(&value) {
            return None;
        }
        self.reached.push(value);
        self.reached.sort_unstable();
        Some(tier)
    }

    /// Run the score-threshold grants for a new score value.
    ///
    /// Returns the kinds actually granted (grants blocked by a full
    /// counter are omitted, but still advance the watermark).
    pub fn check_score(
        &mut self,
        score: u32,
        inventory: &mut PowerUpInventory,
    ) -> SmallVec<[PowerUpKind; 2]> {
        let mut granted = SmallVec::new();

        for threshold in &SCORE_THRESHOLDS {
            if score >= threshold.score && self.watermark < threshold.score {
                if inventory.grant(threshold.grant) {
                    granted.push(threshold.grant);
                }
                self.watermark = threshold.score;
            }
        }

        if score >= self.watermark + REPEAT_HINT_INTERVAL
            && score / REPEAT_HINT_INTERVAL > self.watermark / REPEAT_HINT_INTERVAL
        {
            if inventory.grant(PowerUpKind::Hint) {
                granted.push(PowerUpKind::Hint);
            }
            self.watermark = (score / REPEAT_HINT_INTERVAL) * REPEAT_HINT_INTERVAL;
        }

        granted
    }

    /// Forget everything. Called on new game.
    pub fn reset(&mut self) {
        self.reached.clear();
        self.watermark = 0;
    }
}
