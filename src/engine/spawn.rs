//! Random tile spawning.
//!
//! After a move resolves, one new tile appears on a uniformly chosen
//! empty cell: a 2 most of the time, a 4 otherwise. The new tile may
//! carry a special tag when the spawn gates hold, decided by a single
//! cumulative roll against the per-kind rates.

use serde::{Deserialize, Serialize};

use crate::board::{Board, SpecialKind, SpecialTileMap};
use crate::core::{Coord, GameConfig, GameRng, SpecialTuning};

/// A tile placed by the spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// The cell the tile appeared on.
    pub coord: Coord,
    /// 2 or 4.
    pub value: u32,
    /// The special tag attached to the tile, if the roll produced one.
    pub special: Option<SpecialKind>,
}

/// Place one random tile on an empty cell.
///
/// Returns `None` on a full board. The fill fraction the special-tile
/// gate reads is measured before the new tile is placed.
pub fn spawn_random_tile(
    board: &mut Board,
    specials: &mut SpecialTileMap,
    move_count: u32,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Option<SpawnedTile> {
    let empty = board.empty_cells();
    let coord = *rng.choose(&empty)?;

    let value = if rng.roll() < config.four_tile_chance { 4 } else { 2 };

    let eligible = specials.len() < config.special.max_on_board
        && move_count > config.special.min_moves
        && board.fill_fraction() < config.special.max_fill;
    let special = if eligible {
        roll_special(&config.special, rng.roll())
    } else {
        None
    };

    board.set(coord, value);
    if let Some(kind) = special {
        specials.tag(coord, kind);
    }

    Some(SpawnedTile {
        coord,
        value,
        special,
    })
}

/// Map one uniform draw in `[0, 1)` to a special kind.
///
/// The per-kind rates are consumed cumulatively; a draw past their sum
/// spawns a plain tile.
fn roll_special(tuning: &SpecialTuning, draw: f64) -> Option<SpecialKind> {
    if draw < tuning.lightning_rate {
        Some(SpecialKind::Lightning)
    } else if draw < tuning.lightning_rate + tuning.star_rate {
        Some(SpecialKind::Star)
    } else if draw < tuning.lightning_rate + tuning.star_rate + tuning.diamond_rate {
        Some(SpecialKind::Diamond)
    } else {
        None
    }
}
