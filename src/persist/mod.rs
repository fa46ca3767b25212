//! Cross-session persistence: the store trait and the persisted records.

pub mod records;
pub mod store;

pub use records::{keys, CollectedSpecials, GhostSnapshot, StreakBests};
pub use store::{load_json, save_json, MemoryStore, StateStore};
