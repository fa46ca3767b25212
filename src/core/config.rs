//! Game configuration parameters.
//!
//! A `GameConfig` captures every tunable rule constant: spawn odds,
//! special-tile gating, power-up allowances, undo depth, and the win
//! value. The fixed reward tables (streak tiers, tile milestones, score
//! thresholds) are not configuration - they live as `const` tables in
//! the `rules` modules.

use serde::{Deserialize, Serialize};

/// Game configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Probability that a spawned tile is a 4 rather than a 2 (default: 0.1).
    pub four_tile_chance: f64,

    /// Special-tile spawn gating and per-kind rates.
    pub special: SpecialTuning,

    /// Initial counts and caps for the three power-ups.
    pub power_ups: PowerUpTuning,

    /// How many pre-move snapshots the undo history retains (default: 3).
    pub history_limit: usize,

    /// Tile value that flips the win latch (default: 2048).
    pub win_value: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            four_tile_chance: 0.1,
            special: SpecialTuning::default(),
            power_ups: PowerUpTuning::default(),
            history_limit: 3,
            win_value: 2048,
        }
    }
}

impl GameConfig {
    /// Set the 4-tile spawn probability.
    #[must_use]
    pub fn with_four_tile_chance(mut self, chance: f64) -> Self {
        self.four_tile_chance = chance;
        self
    }

    /// Set the special-tile tuning.
    #[must_use]
    pub fn with_special(mut self, special: SpecialTuning) -> Self {
        self.special = special;
        self
    }

    /// Set the power-up allowances.
    #[must_use]
    pub fn with_power_ups(mut self, power_ups: PowerUpTuning) -> Self {
        self.power_ups = power_ups;
        self
    }

    /// Set the undo history depth.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the win tile value.
    #[must_use]
    pub fn with_win_value(mut self, value: u32) -> Self {
        self.win_value = value;
        self
    }
}

/// Special-tile spawn tuning.
///
/// A freshly spawned tile may carry a special tag only while all three
/// gates hold: fewer than `max_on_board` specials on the board, more than
/// `min_moves` moves made this session, and board fill below `max_fill`.
/// The per-kind rates are consumed cumulatively from a single uniform
/// draw: `< lightning_rate` is lightning, `< lightning_rate + star_rate`
/// is star, `< lightning_rate + star_rate + diamond_rate` is diamond,
/// and anything above that spawns a plain tile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpecialTuning {
    /// Maximum special tiles on the board at once (default: 2).
    pub max_on_board: usize,

    /// Moves that must have been made before specials spawn (default: 5).
    pub min_moves: u32,

    /// Board fill fraction at which specials stop spawning (default: 0.75).
    pub max_fill: f64,

    /// Lightning spawn rate (default: 0.05).
    pub lightning_rate: f64,

    /// Star spawn rate (default: 0.03).
    pub star_rate: f64,

    /// Diamond spawn rate (default: 0.04).
    pub diamond_rate: f64,
}

impl Default for SpecialTuning {
    fn default() -> Self {
        Self {
            max_on_board: 2,
            min_moves: 5,
            max_fill: 0.75,
            lightning_rate: 0.05,
            star_rate: 0.03,
            diamond_rate: 0.04,
        }
    }
}

impl SpecialTuning {
    /// Tuning that never spawns a special tile.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            lightning_rate: 0.0,
            star_rate: 0.0,
            diamond_rate: 0.0,
            ..Self::default()
        }
    }
}

/// Initial count and cap for one power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpAllowance {
    /// Charges a fresh session starts with.
    pub initial: u32,
    /// Charges the counter never exceeds.
    pub cap: u32,
}

impl PowerUpAllowance {
    /// Create a new allowance.
    #[must_use]
    pub const fn new(initial: u32, cap: u32) -> Self {
        Self { initial, cap }
    }
}

/// Per-kind power-up allowances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpTuning {
    /// Undo allowance (default: 3 of 5).
    pub undo: PowerUpAllowance,
    /// Hint allowance (default: 5 of 10).
    pub hint: PowerUpAllowance,
    /// Remove allowance (default: 2 of 5).
    pub remove: PowerUpAllowance,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            undo: PowerUpAllowance::new(3, 5),
            hint: PowerUpAllowance::new(5, 10),
            remove: PowerUpAllowance::new(2, 5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.four_tile_chance, 0.1);
        assert_eq!(config.history_limit, 3);
        assert_eq!(config.win_value, 2048);
        assert_eq!(config.special.max_on_board, 2);
        assert_eq!(config.special.min_moves, 5);
        assert_eq!(config.power_ups.undo, PowerUpAllowance::new(3, 5));
        assert_eq!(config.power_ups.hint, PowerUpAllowance::new(5, 10));
        assert_eq!(config.power_ups.remove, PowerUpAllowance::new(2, 5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_four_tile_chance(0.0)
            .with_history_limit(5)
            .with_win_value(1024);

        assert_eq!(config.four_tile_chance, 0.0);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.win_value, 1024);
    }

    #[test]
    fn test_disabled_specials() {
        let tuning = SpecialTuning::disabled();
        assert_eq!(tuning.lightning_rate, 0.0);
        assert_eq!(tuning.star_rate, 0.0);
        assert_eq!(tuning.diamond_rate, 0.0);
        // Gates keep their defaults
        assert_eq!(tuning.max_on_board, 2);
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.win_value, config.win_value);
        assert_eq!(back.power_ups, config.power_ups);
    }
}
