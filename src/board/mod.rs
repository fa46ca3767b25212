//! Board data model: the 4x4 grid and its special-tile tags.

pub mod grid;
pub mod special;

pub use grid::{Board, CELL_COUNT, GRID_SIZE};
pub use special::{SpecialKind, SpecialTileMap, TaggedTile};
