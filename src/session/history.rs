//! Undo history.
//!
//! A bounded stack of pre-move snapshots. The undo power-up pops the most
//! recent; the oldest entry falls off once the stack is past its limit.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Board, SpecialTileMap};

/// A full copy of the restorable session state, taken before a move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The board before the move.
    pub board: Board,
    /// The special-tile map before the move.
    pub specials: SpecialTileMap,
    /// The score before the move.
    pub score: u32,
}

/// Bounded stack of pre-move snapshots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveHistory {
    snapshots: VecDeque<Snapshot>,
    limit: usize,
}

impl MoveHistory {
    /// Create an empty history holding at most `limit` snapshots.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Push a snapshot, evicting the oldest once past the limit.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == self.limit {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if nothing can be undone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot. Called on new game.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
