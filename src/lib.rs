//! # neon2048
//!
//! Core engine for a 2048 variant with special tiles, merge streaks, and
//! consumable power-ups. The crate owns the board mutation and scoring
//! logic; rendering, input, and animation timing belong to the host.
//!
//! ## Design Principles
//!
//! 1. **One owner for mutable state**: every piece of game state lives in
//!    a `GameSession`; no globals, no background timers, no concurrent
//!    writers.
//!
//! 2. **Events over callbacks**: the move algorithms return structured
//!    records of what happened. A renderer replays them after the fact;
//!    nothing renders mid-algorithm.
//!
//! 3. **Explicit two-phase moves**: `resolve_move` merges, then the host
//!    calls `spawn_next_tile` after its animation delay. The ordering is
//!    part of the contract and testable without a clock.
//!
//! 4. **Deterministic**: all randomness flows through one seeded
//!    `GameRng`; same seed and inputs, same game.
//!
//! ## Modules
//!
//! - `core`: coordinates, directions, RNG, configuration
//! - `board`: the 4x4 grid and its special-tile tags
//! - `engine`: directional move transforms and tile spawning
//! - `rules`: special-tile effects, streaks, milestones
//! - `powerup`: charge counters and the hint heuristic
//! - `session`: the game session and its reports
//! - `persist`: the blob store and persisted records

pub mod board;
pub mod core;
pub mod engine;
pub mod persist;
pub mod powerup;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Coord, Direction, GameConfig, GameRng, GameRngState, PowerUpAllowance, PowerUpTuning,
    SpecialTuning,
};

pub use crate::board::{Board, SpecialKind, SpecialTileMap, TaggedTile, CELL_COUNT, GRID_SIZE};

pub use crate::engine::{MergeRecord, MoveOutcome, SpawnedTile};

pub use crate::rules::{
    MilestoneState, MilestoneTier, StreakState, StreakTier, StreakUpdate, MILESTONE_TIERS,
    STREAK_TIERS,
};

pub use crate::powerup::{PowerUpCounter, PowerUpInventory, PowerUpKind};

pub use crate::session::{
    Declined, GameEvent, GameSession, MoveHistory, MoveReport, MoveStatus, Snapshot, SpawnReport,
    TileView,
};

pub use crate::persist::{
    keys, CollectedSpecials, GhostSnapshot, MemoryStore, StateStore, StreakBests,
};
