//! The hint heuristic.
//!
//! Simulates all four directional transforms on disposable copies of the
//! board and its tag map, never touching live state, and suggests the
//! direction whose result looks best: open cells are worth 10 each and
//! remaining adjacent equal pairs 50 each. Ties keep the first candidate
//! in scan order (up, down, left, right).

use crate::board::{Board, SpecialTileMap};
use crate::core::Direction;
use crate::engine::movement;

/// Heuristic weight of one empty cell after the candidate move.
pub const EMPTY_CELL_WEIGHT: u32 = 10;

/// Heuristic weight of one adjacent equal pair after the candidate move.
pub const MERGE_PAIR_WEIGHT: u32 = 50;

/// Suggest the best direction, or `None` if no direction changes anything.
#[must_use]
pub fn suggest(board: &Board, specials: &SpecialTileMap) -> Option<Direction> {
    let mut best: Option<(Direction, u32)> = None;

    for direction in Direction::ALL {
        let mut scratch = *board;
        let mut scratch_tags = specials.clone();
        let outcome = movement::apply(&mut scratch, &mut scratch_tags, direction);
        if !outcome.moved {
            continue;
        }

        let score = EMPTY_CELL_WEIGHT * scratch.empty_cells().len() as u32
            + MERGE_PAIR_WEIGHT * scratch.adjacent_equal_pairs();

        // Strict improvement only: first seen wins on ties
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((direction, score));
        }
    }

    best.map(|(direction, _)| direction)
}
