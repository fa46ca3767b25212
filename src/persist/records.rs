//! The shapes and keys of persisted state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{Board, SpecialKind};

/// Storage keys for the session's durables.
pub mod keys {
    /// Best score across sessions (`u32`).
    pub const BEST_SCORE: &str = "best_score";
    /// Power-up inventory (`PowerUpInventory`).
    pub const POWER_UPS: &str = "power_ups";
    /// Best streak pair (`StreakBests`).
    pub const STREAK_BESTS: &str = "streak_bests";
    /// Tile milestones reached this session (`MilestoneState`).
    pub const MILESTONES: &str = "milestones";
    /// Board snapshot of the best game (`GhostSnapshot`).
    pub const GHOST_DATA: &str = "ghost_data";
    /// Whether the ghost overlay is enabled (`bool`).
    pub const GHOST_ENABLED: &str = "ghost_enabled";
    /// Lifetime special-tile counters (`CollectedSpecials`).
    pub const COLLECTED_SPECIALS: &str = "collected_specials";
}

/// The board frozen at the moment a new best score was set.
///
/// The ghost overlay renders this behind the live board; the core only
/// records and serves it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostSnapshot {
    /// The board at the new best.
    pub board: Board,
    /// The best score at capture time.
    pub score: u32,
    /// Moves made when the snapshot was taken.
    pub move_count: u32,
    /// Capture time, UTC.
    pub timestamp: DateTime<Utc>,
}

/// Best streak counters, persisted as a pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakBests {
    /// Best consecutive-merge streak.
    pub merge: u32,
    /// Best streak of moves with two or more merges.
    pub perfect: u32,
}

/// Lifetime counters of special tiles consumed by merges.
///
/// Informational only; never reset by a new game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedSpecials {
    /// Merges that consumed a lightning tag.
    pub lightning: u32,
    /// Merges that consumed a star tag.
    pub star: u32,
    /// Merges that consumed a diamond tag.
    pub diamond: u32,
}

impl CollectedSpecials {
    /// Count one merge that triggered `kind`.
    pub fn bump(&mut self, kind: SpecialKind) {
        match kind {
            SpecialKind::Lightning => self.lightning += 1,
            SpecialKind::Star => self.star += 1,
            SpecialKind::Diamond => self.diamond += 1,
        }
    }

    /// The counter for a kind.
    #[must_use]
    pub fn get(&self, kind: SpecialKind) -> u32 {
        match kind {
            SpecialKind::Lightning => self.lightning,
            SpecialKind::Star => self.star,
            SpecialKind::Diamond => self.diamond,
        }
    }
}
