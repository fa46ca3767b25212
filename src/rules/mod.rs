//! Scoring rules: special-tile effects, merge streaks, and milestones.

pub mod effect;
pub mod milestone;
pub mod streak;

pub use effect::EffectOutcome;
pub use milestone::{MilestoneState, MilestoneTier, ScoreThreshold, MILESTONE_TIERS, SCORE_THRESHOLDS};
pub use streak::{StreakState, StreakTier, StreakUpdate, STREAK_TIERS};
