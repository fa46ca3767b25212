//! Consumable power-up counters.
//!
//! Three independent counters, one per power-up kind, each with a cap.
//! Counts rise only through reward grants and fall only through use;
//! a grant at cap is a silent no-op.

use serde::{Deserialize, Serialize};

use crate::core::{PowerUpAllowance, PowerUpTuning};

/// The three consumable power-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Roll the session back one move.
    Undo,
    /// Suggest the best direction.
    Hint,
    /// Clear a single tile.
    Remove,
}

impl PowerUpKind {
    /// All kinds, in the order the random streak grant draws from.
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Undo, PowerUpKind::Hint, PowerUpKind::Remove];
}

impl std::fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PowerUpKind::Undo => "undo",
            PowerUpKind::Hint => "hint",
            PowerUpKind::Remove => "remove",
        };
        write!(f, "{}", name)
    }
}

/// One capped charge counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpCounter {
    /// Charges currently available.
    pub count: u32,
    /// Charges the counter never exceeds.
    pub cap: u32,
}

impl PowerUpCounter {
    /// Start a counter from its configured allowance.
    #[must_use]
    pub const fn new(allowance: PowerUpAllowance) -> Self {
        Self {
            count: allowance.initial,
            cap: allowance.cap,
        }
    }

    /// Add one charge if below the cap. Returns whether a charge was added.
    pub fn grant(&mut self) -> bool {
        if self.count < self.cap {
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Spend one charge. Returns whether a charge was available.
    pub fn consume(&mut self) -> bool {
        if self.count > 0 {
            self.count -= 1;
            true
        } else {
            false
        }
    }
}

/// Per-kind power-up charges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpInventory {
    undo: PowerUpCounter,
    hint: PowerUpCounter,
    remove: PowerUpCounter,
}

impl PowerUpInventory {
    /// Start every counter from its configured allowance.
    #[must_use]
    pub fn new(tuning: &PowerUpTuning) -> Self {
        Self {
            undo: PowerUpCounter::new(tuning.undo),
            hint: PowerUpCounter::new(tuning.hint),
            remove: PowerUpCounter::new(tuning.remove),
        }
    }

    /// The counter for a kind.
    #[must_use]
    pub fn counter(&self, kind: PowerUpKind) -> PowerUpCounter {
        match kind {
            PowerUpKind::Undo => self.undo,
            PowerUpKind::Hint => self.hint,
            PowerUpKind::Remove => self.remove,
        }
    }

    fn counter_mut(&mut self, kind: PowerUpKind) -> &mut PowerUpCounter {
        match kind {
            PowerUpKind::Undo => &mut self.undo,
            PowerUpKind::Hint => &mut self.hint,
            PowerUpKind::Remove => &mut self.remove,
        }
    }

    /// Available charges for a kind.
    #[must_use]
    pub fn count(&self, kind: PowerUpKind) -> u32 {
        self.counter(kind).count
    }

    /// Add one charge of a kind if below its cap.
    pub fn grant(&mut self, kind: PowerUpKind) -> bool {
        self.counter_mut(kind).grant()
    }

    /// Spend one charge of a kind.
    pub fn consume(&mut self, kind: PowerUpKind) -> bool {
        self.counter_mut(kind).consume()
    }
}

impl Default for PowerUpInventory {
    fn default() -> Self {
        Self::new(&PowerUpTuning::default())
    }
}
