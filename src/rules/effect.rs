//! Special-tile effect resolution.
//!
//! When a merge consumes tagged tiles, the collected tags modify the
//! outcome. Resolution order is fixed: lightning first (flat bonus, no
//! value change), then star (multiplies the merged value), then diamond
//! (bonus proportional to the star-adjusted value). Effects of different
//! kinds are independent and additive; duplicate tags stack.

use smallvec::SmallVec;

use crate::board::SpecialKind;

/// Flat bonus points per lightning tag.
pub const LIGHTNING_BONUS: u32 = 50;

/// Value multiplier applied once per star tag.
pub const STAR_MULTIPLIER: u32 = 2;

/// Bonus points per star tag.
pub const STAR_BONUS: u32 = 100;

/// Diamond bonus points per unit of merged value, per diamond tag.
pub const DIAMOND_RATE: u32 = 5;

/// Result of resolving special effects for one merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectOutcome {
    /// The merged tile's final value (star-adjusted).
    pub value: u32,
    /// Total bonus points, on top of the tile value.
    pub bonus: u32,
}

/// Resolve special effects for a merge.
///
/// `merged_value` is the doubled value before any effect; `tags` are the
/// tags collapsed from the two merging tiles (0-2 entries, duplicates
/// possible). Star multiplication happens before the diamond bonus is
/// computed, so diamonds pay out on the star-adjusted value.
#[must_use]
pub fn resolve(merged_value: u32, tags: &[SpecialKind]) -> EffectOutcome {
    let mut value = merged_value;
    let mut bonus = 0;

    if tags.is_empty() {
        return EffectOutcome { value, bonus };
    }

    let lightning = count_tags(tags, SpecialKind::Lightning);
    if lightning > 0 {
        bonus += LIGHTNING_BONUS * lightning;
    }

    let stars = count_tags(tags, SpecialKind::Star);
    if stars > 0 {
        value *= STAR_MULTIPLIER.pow(stars);
        bonus += STAR_BONUS * stars;
    }

    let diamonds = count_tags(tags, SpecialKind::Diamond);
    if diamonds > 0 {
        bonus += DIAMOND_RATE * value * diamonds;
    }

    EffectOutcome { value, bonus }
}

/// The distinct kinds present in a tag list, in resolution order.
///
/// A kind triggers once per merge no matter how many of its tags were
/// collapsed; this drives the lifetime collected counters.
#[must_use]
pub fn triggered_kinds(tags: &[SpecialKind]) -> SmallVec<[SpecialKind; 3]> {
    SpecialKind::ALL
        .iter()
        .copied()
        .filter(|kind| tags.contains(kind))
        .collect()
}

fn count_tags(tags: &[SpecialKind], kind: SpecialKind) -> u32 {
    tags.iter().filter(|&&t| t == kind).count() as u32
}
