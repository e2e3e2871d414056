//! Action Selection
//!
//! Weighted random choice over a monarch's candidate actions. The monarch
//! only builds the distribution; the turn engine draws from it here.

use crate::action::WeightedAction;
use crate::random::RandomSource;

/// Picks one action with probability proportional to its weight.
///
/// Returns `None` for an empty list or when every weight is zero.
pub fn choose_weighted<'a, R: RandomSource + ?Sized>(
    rng: &mut R,
    candidates: &'a [WeightedAction],
) -> Option<&'a WeightedAction> {
    let total: u32 = candidates.iter().map(|c| c.weight).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.random_int(total);
    for candidate in candidates {
        if roll < candidate.weight {
            return Some(candidate);
        }
        roll -= candidate.weight;
    }
    candidates.last()
}
