//! Uniform and weighted random-selection primitives.
//!
//! The action engine draws from two fixed candidate sets each tick: the
//! color set at generation time and the weighted action set above the
//! growth threshold. Both sets are statically non-empty, but the selection
//! primitives still fail with a typed [`ChoiceError`] on an empty (or
//! all-zero-weight) set rather than panicking -- the engine propagates that
//! error and the periodic driver fail-stops on it.
//!
//! Weighted selection is a cumulative-weight walk over `(value, weight)`
//! entries with a single uniform roll in `[0, total_weight)`; the weighted
//! multiset is never materialized.

use rand::Rng;

/// Errors that can occur during random selection.
#[derive(Debug, thiserror::Error)]
pub enum ChoiceError {
    /// A random draw was attempted over an empty candidate set.
    #[error("cannot draw from empty candidate set: {candidates}")]
    EmptyChoice {
        /// Name of the candidate set that was empty.
        candidates: &'static str,
    },
}

/// Draw one item uniformly from a slice.
///
/// `candidates` names the set for error reporting.
///
/// # Errors
///
/// Returns [`ChoiceError::EmptyChoice`] if `items` is empty.
pub fn pick_uniform<'a, T>(
    rng: &mut impl Rng,
    items: &'a [T],
    candidates: &'static str,
) -> Result<&'a T, ChoiceError> {
    if items.is_empty() {
        return Err(ChoiceError::EmptyChoice { candidates });
    }
    let index = rng.random_range(0..items.len());
    items
        .get(index)
        .ok_or(ChoiceError::EmptyChoice { candidates })
}

/// Draw one index uniformly from `[0, len)`.
///
/// # Errors
///
/// Returns [`ChoiceError::EmptyChoice`] if `len` is 0.
pub fn pick_index(
    rng: &mut impl Rng,
    len: usize,
    candidates: &'static str,
) -> Result<usize, ChoiceError> {
    if len == 0 {
        return Err(ChoiceError::EmptyChoice { candidates });
    }
    Ok(rng.random_range(0..len))
}

/// Draw one entry from a weighted set.
///
/// Selection is uniform over the multiset expansion of the weights: an
/// entry with weight `w` is chosen with probability `w / total_weight`.
/// Zero-weight entries are never chosen.
///
/// # Errors
///
/// Returns [`ChoiceError::EmptyChoice`] if `entries` is empty or every
/// weight is zero.
pub fn pick_weighted<'a, T>(
    rng: &mut impl Rng,
    entries: &'a [(T, u32)],
    candidates: &'static str,
) -> Result<&'a T, ChoiceError> {
    let total = total_weight(entries);
    if total == 0 {
        return Err(ChoiceError::EmptyChoice { candidates });
    }
    let roll = rng.random_range(0..total);
    entry_for_roll(entries, roll).ok_or(ChoiceError::EmptyChoice { candidates })
}

/// Sum the weights of a weighted entry set, saturating at `u64::MAX`.
fn total_weight<T>(entries: &[(T, u32)]) -> u64 {
    entries
        .iter()
        .fold(0_u64, |acc, (_, weight)| acc.saturating_add(u64::from(*weight)))
}

/// Map a roll in `[0, total_weight)` to its entry via a cumulative walk.
///
/// Returns `None` only if the roll is at or past the total weight.
fn entry_for_roll<T>(entries: &[(T, u32)], roll: u64) -> Option<&T> {
    let mut cumulative: u64 = 0;
    for (value, weight) in entries {
        cumulative = cumulative.saturating_add(u64::from(*weight));
        if roll < cumulative {
            return Some(value);
        }
    }
    None
}
