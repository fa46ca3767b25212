//! Special-tile tags.
//!
//! A sparse map from board coordinate to special-tile kind. The map is
//! kept in lockstep with the grid: tags relocate when their tile slides,
//! collapse when their tile merges, and disappear when their tile is
//! removed. A tag never exists on an empty cell.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::Coord;

/// The three special-tile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKind {
    /// Flat bonus points on merge.
    Lightning,
    /// Multiplies the merged value and adds bonus points.
    Star,
    /// Bonus points proportional to the merged value.
    Diamond,
}

impl SpecialKind {
    /// All kinds, in effect-resolution order.
    pub const ALL: [SpecialKind; 3] = [
        SpecialKind::Lightning,
        SpecialKind::Star,
        SpecialKind::Diamond,
    ];
}

impl std::fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpecialKind::Lightning => "lightning",
            SpecialKind::Star => "star",
            SpecialKind::Diamond => "diamond",
        };
        write!(f, "{}", name)
    }
}

/// A tagged cell, used as the serialized form of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedTile {
    /// Where the tag sits.
    pub coord: Coord,
    /// Which special kind the tile carries.
    pub kind: SpecialKind,
}

/// Sparse mapping from coordinate to special-tile kind.
///
/// Serializes as a list of tagged cells so the JSON form has no
/// non-string map keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TaggedTile>", into = "Vec<TaggedTile>")]
pub struct SpecialTileMap {
    tags: FxHashMap<Coord, SpecialKind>,
}

impl SpecialTileMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of special tiles on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if no cell carries a tag.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The kind at a cell, if any.
    #[must_use]
    pub fn kind_at(&self, coord: Coord) -> Option<SpecialKind> {
        self.tags.get(&coord).copied()
    }

    /// Tag a cell with a kind, replacing any existing tag.
    pub fn tag(&mut self, coord: Coord, kind: SpecialKind) {
        self.tags.insert(coord, kind);
    }

    /// Remove and return the tag at a cell.
    pub fn remove(&mut self, coord: Coord) -> Option<SpecialKind> {
        self.tags.remove(&coord)
    }

    /// Move a tag with its sliding tile. No-op if `from` carries no tag.
    pub fn relocate(&mut self, from: Coord, to: Coord) {
        if let Some(kind) = self.tags.remove(&from) {
            self.tags.insert(to, kind);
        }
    }

    /// Collapse the tags of two merging cells.
    ///
    /// Collects the target-side tag first, then the source-side tag,
    /// deletes both, and re-tags the merge target with the first collected
    /// tag only. Returns the collected tags in collapse order; their
    /// effects all still apply even though at most one tag survives.
    pub fn collapse(&mut self, target: Coord, source: Coord) -> SmallVec<[SpecialKind; 2]> {
        let mut collected = SmallVec::new();
        if let Some(kind) = self.tags.remove(&target) {
            collected.push(kind);
        }
        if let Some(kind) = self.tags.remove(&source) {
            collected.push(kind);
        }
        if let Some(&first) = collected.first() {
            self.tags.insert(target, first);
        }
        collected
    }

    /// Iterate all tagged cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, SpecialKind)> + '_ {
        self.tags.iter().map(|(&coord, &kind)| (coord, kind))
    }

    /// Drop every tag.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// True if every tagged coordinate holds a non-zero tile.
    #[must_use]
    pub fn is_consistent_with(&self, board: &Board) -> bool {
        self.tags.keys().all(|&coord| board.get(coord) != 0)
    }
}

impl From<Vec<TaggedTile>> for SpecialTileMap {
    fn from(tiles: Vec<TaggedTile>) -> Self {
        let mut map = Self::new();
        for tile in tiles {
            map.tag(tile.coord, tile.kind);
        }
        map
    }
}

impl From<SpecialTileMap> for Vec<TaggedTile> {
    fn from(map: SpecialTileMap) -> Self {
        let mut tiles: Vec<TaggedTile> = map
            .tags
            .into_iter()
            .map(|(coord, kind)| TaggedTile { coord, kind })
            .collect();
        tiles.sort_by_key(|tile| tile.coord);
        tiles
    }
}
