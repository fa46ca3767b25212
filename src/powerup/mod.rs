//! Consumable power-ups: charge counters and the hint heuristic.
//!
//! Undo and remove mutate session state directly, so they live on the
//! session; the pieces here are the state they share.

pub mod hint;
pub mod inventory;

pub use inventory::{PowerUpCounter, PowerUpInventory, PowerUpKind};
