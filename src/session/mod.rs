//! The session layer: one owner for all mutable game state, driven
//! through the two-phase move protocol.

pub mod event;
pub mod game;
pub mod history;

pub use event::{GameEvent, MoveReport, MoveStatus, SpawnReport, TileView};
pub use game::{Declined, GameSession};
pub use history::{MoveHistory, Snapshot};
