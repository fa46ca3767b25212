//! The 4x4 tile grid.
//!
//! `Board` is pure data plus read-only queries. It is mutated only by the
//! movement engine, the tile spawner, and the remove power-up; every
//! non-zero cell holds a power of two >= 2.

use serde::{Deserialize, Serialize};

use crate::core::Coord;

/// Board side length.
pub const GRID_SIZE: usize = 4;

/// Total cell count.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A 4x4 grid of tile values. `0` denotes an empty cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from explicit rows. Intended for tests and for
    /// restoring saved positions.
    #[must_use]
    pub const fn from_rows(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// The raw rows, top to bottom.
    #[must_use]
    pub const fn rows(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Value at a cell. `0` means empty.
    #[must_use]
    pub fn get(&self, coord: Coord) -> u32 {
        self.cells[coord.row][coord.col]
    }

    /// Set the value at a cell.
    pub fn set(&mut self, coord: Coord, value: u32) {
        self.cells[coord.row][coord.col] = value;
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, u32)> + '_ {
        (0..GRID_SIZE).flat_map(move |row| {
            (0..GRID_SIZE).map(move |col| {
                let coord = Coord::new(row, col);
                (coord, self.get(coord))
            })
        })
    }

    /// All empty cells, in stable row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells()
            .filter(|&(_, value)| value == 0)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// True if no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells().all(|(_, value)| value != 0)
    }

    /// Fraction of cells that hold a tile, in `[0, 1]`.
    #[must_use]
    pub fn fill_fraction(&self) -> f64 {
        let filled = self.cells().filter(|&(_, value)| value != 0).count();
        filled as f64 / CELL_COUNT as f64
    }

    /// True if any cell holds exactly `value`. Used for the win check.
    #[must_use]
    pub fn has_value(&self, value: u32) -> bool {
        self.cells().any(|(_, v)| v == value)
    }

    /// Count of adjacent equal non-zero pairs (right and down neighbors).
    ///
    /// This is the merge-potential term of the hint heuristic.
    #[must_use]
    pub fn adjacent_equal_pairs(&self) -> u32 {
        let mut pairs = 0;
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = self.cells[row][col];
                if value == 0 {
                    continue;
                }
                if col + 1 < GRID_SIZE && self.cells[row][col + 1] == value {
                    pairs += 1;
                }
                if row + 1 < GRID_SIZE && self.cells[row + 1][col] == value {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    /// True iff at least one move can still change the board: an empty
    /// cell exists or some adjacent pair shares a value. This is the
    /// terminal test - `false` means game over.
    #[must_use]
    pub fn can_move(&self) -> bool {
        if !self.is_full() {
            return true;
        }
        self.adjacent_equal_pairs() > 0
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row_idx, row) in self.cells.iter().enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            for (col_idx, value) in row.iter().enumerate() {
                if col_idx > 0 {
                    write!(f, " ")?;
                }
                if *value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert_eq!(board.empty_cells().len(), CELL_COUNT);
        assert!(!board.is_full());
        assert_eq!(board.fill_fraction(), 0.0);
        assert!(board.can_move());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = Board::from_rows([
            [2, 0, 4, 0],
            [0, 2, 2, 2],
            [2, 2, 2, 2],
            [2, 2, 2, 0],
        ]);

        assert_eq!(
            board.empty_cells(),
            vec![
                Coord::new(0, 1),
                Coord::new(0, 3),
                Coord::new(1, 0),
                Coord::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_fill_fraction() {
        let board = Board::from_rows([
            [2, 4, 8, 16],
            [2, 4, 8, 16],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert_eq!(board.fill_fraction(), 0.5);
    }

    #[test]
    fn test_has_value() {
        let board = Board::from_rows([
            [2, 0, 0, 0],
            [0, 0, 2048, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert!(board.has_value(2048));
        assert!(board.has_value(2));
        assert!(!board.has_value(1024));
    }

    #[test]
    fn test_adjacent_equal_pairs() {
        let board = Board::from_rows([
            [2, 2, 0, 0],
            [4, 0, 0, 0],
            [4, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        // One horizontal 2-pair, one vertical 4-pair
        assert_eq!(board.adjacent_equal_pairs(), 2);
    }

    #[test]
    fn test_can_move_with_merge_only() {
        // Full board, single vertical pair
        let board = Board::from_rows([
            [2, 4, 8, 16],
            [32, 64, 128, 256],
            [32, 8, 16, 2],
            [4, 2, 4, 8],
        ]);
        assert!(board.is_full());
        assert!(board.can_move());
    }

    #[test]
    fn test_game_over_board() {
        // Full board, no equal adjacent pair anywhere
        let board = Board::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(board.is_full());
        assert!(!board.can_move());
    }

    #[test]
    fn test_display_alignment() {
        let board = Board::from_rows([
            [2, 0, 0, 0],
            [0, 16, 0, 0],
            [0, 0, 256, 0],
            [0, 0, 0, 2048],
        ]);
        let text = format!("{}", board);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("2048"));
    }
}
