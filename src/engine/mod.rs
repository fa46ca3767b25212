//! Board mutation: the directional move/merge transforms and tile spawning.

pub mod movement;
pub mod spawn;

pub use movement::{apply, MergeRecord, MoveOutcome};
pub use spawn::{spawn_random_tile, SpawnedTile};
