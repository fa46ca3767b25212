//! The four directional move transforms.
//!
//! A move processes each lane (column for up/down, row for left/right)
//! independently: compact tiles toward the movement edge, run a single
//! merge sweep from the edge inward, then compact once more to close the
//! gaps merges left behind. The sweep never revisits a merged output, so
//! each tile participates in at most one merge per move.
//!
//! The transform mutates the board and the special-tile map in lockstep
//! and returns a structured record of every merge; it never touches the
//! score or notifies anything. The session applies scoring afterward from
//! the records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, SpecialKind, SpecialTileMap, GRID_SIZE};
use crate::core::{Coord, Direction};
use crate::rules::effect;

/// One merge that happened during a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRecord {
    /// Where the merged tile landed, before the final compaction.
    pub coord: Coord,
    /// The merged tile's final value, after any star multiplier.
    pub value: u32,
    /// Bonus points from special effects, on top of the tile value.
    pub bonus: u32,
    /// Tags collapsed from the two merging tiles, edge-side tile first.
    pub tags: SmallVec<[SpecialKind; 2]>,
}

/// What one directional transform did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True if any tile changed position or any merge occurred.
    pub moved: bool,
    /// Every merge, in lane order then edge-to-inward order within a lane.
    pub merges: Vec<MergeRecord>,
}

/// Apply a directional move to the board and its special-tile map.
pub fn apply(
    board: &mut Board,
    specials: &mut SpecialTileMap,
    direction: Direction,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();

    for lane in 0..GRID_SIZE {
        let coords = lane_coords(direction, lane);

        if compact(board, specials, &coords) {
            outcome.moved = true;
        }

        merge_sweep(board, specials, &coords, &mut outcome);

        // Close gaps the merges opened
        compact(board, specials, &coords);
    }

    outcome
}

/// The cells of one lane, ordered from the movement edge inward.
fn lane_coords(direction: Direction, lane: usize) -> [Coord; GRID_SIZE] {
    std::array::from_fn(|k| match direction {
        Direction::Up => Coord::new(k, lane),
        Direction::Down => Coord::new(GRID_SIZE - 1 - k, lane),
        Direction::Left => Coord::new(lane, k),
        Direction::Right => Coord::new(lane, GRID_SIZE - 1 - k),
    })
}

/// Slide every tile in a lane toward index 0, carrying its tag along.
/// Returns true if anything moved.
fn compact(board: &mut Board, specials: &mut SpecialTileMap, coords: &[Coord; GRID_SIZE]) -> bool {
    let mut changed = false;
    let mut write = 0;
    for read in 0..GRID_SIZE {
        let value = board.get(coords[read]);
        if value == 0 {
            continue;
        }
        if read != write {
            board.set(coords[write], value);
            board.set(coords[read], 0);
            specials.relocate(coords[read], coords[write]);
            changed = true;
        }
        write += 1;
    }
    changed
}

/// One edge-to-inward sweep merging adjacent equal pairs.
///
/// After a pair merges at `k`, the next comparison starts at `k + 1`
/// (now empty), so the merged output is never merged again this move.
fn merge_sweep(
    board: &mut Board,
    specials: &mut SpecialTileMap,
    coords: &[Coord; GRID_SIZE],
    outcome: &mut MoveOutcome,
) {
    for k in 0..GRID_SIZE - 1 {
        let target = coords[k];
        let source = coords[k + 1];
        let value = board.get(target);
        if value == 0 || board.get(source) != value {
            continue;
        }

        let tags = specials.collapse(target, source);
        let resolved = effect::resolve(value * 2, &tags);
        board.set(target, resolved.value);
        board.set(source, 0);

        outcome.moved = true;
        outcome.merges.push(MergeRecord {
            coord: target,
            value: resolved.value,
            bonus: resolved.bonus,
            tags,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(board: &mut Board, direction: Direction) -> MoveOutcome {
        let mut specials = SpecialTileMap::new();
        apply(board, &mut specials, direction)
    }

    #[test]
    fn test_simple_merge_left() {
        let mut board = Board::from_rows([
            [2, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let outcome = plain(&mut board, Direction::Left);

        assert!(outcome.moved);
        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(outcome.merges[0].coord, Coord::new(0, 0));
        assert_eq!(outcome.merges[0].value, 4);
        assert_eq!(outcome.merges[0].bonus, 0);
        assert_eq!(board.get(Coord::new(0, 0)), 4);
        assert_eq!(board.get(Coord::new(0, 1)), 0);
    }

    #[test]
    fn test_no_double_merge() {
        let mut board = Board::from_rows([
            [2, 2, 2, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let outcome = plain(&mut board, Direction::Left);

        assert_eq!(outcome.merges.len(), 2);
        assert_eq!(board.rows()[0], [4, 4, 0, 0]);
    }

    #[test]
    fn test_merged_output_not_remerged() {
        // 4 | 2 2 -> 4 4, not 8
        let mut board = Board::from_rows([
            [4, 2, 2, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let outcome = plain(&mut board, Direction::Left);

        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(board.rows()[0], [4, 4, 0, 0]);
    }

    #[test]
    fn test_merge_prefers_movement_edge() {
        // Three equal tiles merge the pair nearest the movement edge
        let mut board = Board::from_rows([
            [2, 2, 2, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        plain(&mut board, Direction::Right);

        // Rightward: the two right tiles merge
        assert_eq!(board.rows()[0], [0, 0, 2, 4]);
    }

    #[test]
    fn test_all_directions() {
        let start = Board::from_rows([
            [2, 0, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [2, 0, 0, 2],
        ]);

        let mut up = start;
        plain(&mut up, Direction::Up);
        assert_eq!(*up.rows(), [[4, 0, 0, 4], [0; 4], [0; 4], [0; 4]]);

        let mut down = start;
        plain(&mut down, Direction::Down);
        assert_eq!(*down.rows(), [[0; 4], [0; 4], [0; 4], [4, 0, 0, 4]]);

        let mut left = start;
        plain(&mut left, Direction::Left);
        assert_eq!(*left.rows(), [[4, 0, 0, 0], [0; 4], [0; 4], [4, 0, 0, 0]]);

        let mut right = start;
        plain(&mut right, Direction::Right);
        assert_eq!(*right.rows(), [[0, 0, 0, 4], [0; 4], [0; 4], [0, 0, 0, 4]]);
    }

    #[test]
    fn test_slide_without_merge() {
        let mut board = Board::from_rows([
            [0, 0, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let outcome = plain(&mut board, Direction::Left);

        assert!(outcome.moved);
        assert!(outcome.merges.is_empty());
        assert_eq!(board.get(Coord::new(0, 0)), 2);
    }

    #[test]
    fn test_blocked_move_reports_no_change() {
        let mut board = Board::from_rows([
            [2, 4, 8, 16],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let before = board;
        let outcome = plain(&mut board, Direction::Left);

        assert!(!outcome.moved);
        assert!(outcome.merges.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_gap_then_merge() {
        let mut board = Board::from_rows([
            [2, 0, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let outcome = plain(&mut board, Direction::Left);

        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(board.rows()[0], [4, 0, 0, 0]);
    }

    #[test]
    fn test_lanes_are_independent() {
        let mut board = Board::from_rows([
            [2, 4, 0, 0],
            [2, 4, 0, 0],
            [4, 2, 0, 0],
            [4, 2, 0, 0],
        ]);
        let outcome = plain(&mut board, Direction::Up);

        assert_eq!(outcome.merges.len(), 4);
        assert_eq!(*board.rows(), [[4, 8, 0, 0], [8, 4, 0, 0], [0; 4], [0; 4]]);
    }

    #[test]
    fn test_special_tag_slides_with_tile() {
        let mut board = Board::from_rows([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [2, 0, 0, 0],
        ]);
        let mut specials = SpecialTileMap::new();
        specials.tag(Coord::new(3, 0), SpecialKind::Diamond);

        apply(&mut board, &mut specials, Direction::Up);

        assert_eq!(specials.kind_at(Coord::new(0, 0)), Some(SpecialKind::Diamond));
        assert_eq!(specials.len(), 1);
    }

    #[test]
    fn test_merge_collapses_tags_and_applies_effects() {
        let mut board = Board::from_rows([
            [2, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let mut specials = SpecialTileMap::new();
        specials.tag(Coord::new(0, 0), SpecialKind::Lightning);
        specials.tag(Coord::new(0, 1), SpecialKind::Lightning);

        let outcome = apply(&mut board, &mut specials, Direction::Left);

        let merge = &outcome.merges[0];
        assert_eq!(merge.value, 4);
        assert_eq!(merge.bonus, 100);
        assert_eq!(
            &merge.tags[..],
            &[SpecialKind::Lightning, SpecialKind::Lightning]
        );
        // One tag survives on the merged tile
        assert_eq!(specials.kind_at(Coord::new(0, 0)), Some(SpecialKind::Lightning));
        assert_eq!(specials.len(), 1);
    }

    #[test]
    fn test_star_merge_multiplies_value() {
        let mut board = Board::from_rows([
            [4, 4, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let mut specials = SpecialTileMap::new();
        specials.tag(Coord::new(0, 1), SpecialKind::Star);

        let outcome = apply(&mut board, &mut specials, Direction::Left);

        assert_eq!(outcome.merges[0].value, 16);
        assert_eq!(outcome.merges[0].bonus, 100);
        assert_eq!(board.get(Coord::new(0, 0)), 16);
    }

    #[test]
    fn test_tag_survives_post_merge_compaction() {
        // The merged tile slides again after merging; its tag must follow
        let mut board = Board::from_rows([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [2, 0, 0, 0],
            [2, 0, 0, 0],
        ]);
        let mut specials = SpecialTileMap::new();
        specials.tag(Coord::new(2, 0), SpecialKind::Star);

        // Down: tiles compact to rows 2-3, merge at row 3
        apply(&mut board, &mut specials, Direction::Down);

        assert_eq!(board.get(Coord::new(3, 0)), 8);
        assert_eq!(specials.kind_at(Coord::new(3, 0)), Some(SpecialKind::Star));
    }

    #[test]
    fn test_specials_stay_consistent() {
        let mut board = Board::from_rows([
            [2, 2, 4, 4],
            [0, 2, 0, 2],
            [4, 0, 4, 0],
            [2, 4, 2, 4],
        ]);
        let mut specials = SpecialTileMap::new();
        specials.tag(Coord::new(0, 0), SpecialKind::Lightning);
        specials.tag(Coord::new(2, 2), SpecialKind::Diamond);

        for direction in Direction::ALL {
            apply(&mut board, &mut specials, direction);
            assert!(
                specials.is_consistent_with(&board),
                "tags must sit on non-empty cells after {}",
                direction
            );
        }
    }
}
