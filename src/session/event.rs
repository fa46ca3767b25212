//! Structured reports the session hands back to its caller.
//!
//! The engine never renders or notifies anything mid-algorithm; each
//! phase returns the events that occurred so a renderer can replay them
//! afterward. Together with `GameSession::tiles` this is enough to
//! reconstruct the full visual diff without any game logic on the
//! renderer's side.

use serde::{Deserialize, Serialize};

use crate::board::SpecialKind;
use crate::core::Coord;
use crate::engine::{MergeRecord, SpawnedTile};
use crate::powerup::PowerUpKind;

/// A reward or transition the caller may want to surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A streak tier paid out.
    StreakReward {
        /// The streak value that hit the tier.
        streak: u32,
        /// Bonus points awarded.
        points: u32,
    },
    /// The streak-10 tier granted a random power-up.
    StreakPowerUp {
        /// The kind granted.
        kind: PowerUpKind,
    },
    /// A tile value milestone paid out for the first time.
    TileMilestone {
        /// The merged value that hit the milestone.
        value: u32,
        /// Bonus points awarded.
        points: u32,
        /// Whether the milestone is confetti-worthy (cosmetic).
        confetti: bool,
    },
    /// A score threshold granted a power-up.
    ScorePowerUp {
        /// The kind granted.
        kind: PowerUpKind,
    },
    /// The score passed the previous best; a ghost snapshot was recorded.
    NewBestScore {
        /// The new best.
        score: u32,
    },
    /// The win tile appeared for the first time this session.
    Win,
    /// No move can change the board anymore.
    GameOver,
}

/// What `resolve_move` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveStatus {
    /// The board changed; a spawn is now pending.
    Moved(MoveReport),
    /// The direction changed nothing; no state was touched.
    NoChange,
    /// A previous move's spawn has not happened yet; the move is
    /// rejected, not queued.
    SpawnPending,
}

/// The merge half of a completed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Every merge, with final values, bonuses, and consumed tags.
    pub merges: Vec<MergeRecord>,
    /// Total score gained during resolution, rewards included.
    pub score_delta: u32,
    /// Rewards and transitions, in the order they occurred.
    pub events: Vec<GameEvent>,
}

/// The spawn half of a completed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnReport {
    /// The tile placed, or `None` if the board had no room.
    pub tile: Option<SpawnedTile>,
    /// The merge streak after this move.
    pub streak: u32,
    /// Rewards and transitions, in the order they occurred.
    pub events: Vec<GameEvent>,
}

/// One occupied cell, as the renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    /// Where the tile sits.
    pub coord: Coord,
    /// The tile's value.
    pub value: u32,
    /// The special tag on the tile, if any.
    pub special: Option<SpecialKind>,
}
