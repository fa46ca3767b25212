//! Core engine types: coordinates, directions, RNG, configuration.
//!
//! This module contains the fundamental building blocks shared by every
//! other module. Nothing here knows about merge rules or scoring.

pub mod config;
pub mod coord;
pub mod direction;
pub mod rng;

pub use config::{GameConfig, PowerUpAllowance, PowerUpTuning, SpecialTuning};
pub use coord::Coord;
pub use direction::Direction;
pub use rng::{GameRng, GameRngState};
