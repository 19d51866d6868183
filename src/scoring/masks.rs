//! Letter masks derived from the constraint store
//!
//! A mask entry of 0 means the corresponding statistic carries no new
//! information and is dropped from the score.

use super::LetterTable;
use crate::core::{ALPHABET_LEN, WORD_LEN, index_letter};
use crate::rules::{ConstraintStore, Rule};

/// Which occurrence counts of a letter are still worth probing
///
/// Entry `i` covers "at least `i + 1` copies". Counts already known to be
/// reached, or any count once the total is exact, are masked out.
#[must_use]
pub fn frequency_mask(rule: Option<&Rule>) -> [u32; WORD_LEN] {
    let Some(rule) = rule else {
        return [1; WORD_LEN];
    };
    if rule.is_exact() {
        return [0; WORD_LEN];
    }

    let known = usize::from(rule.minimum_count());
    std::array::from_fn(|i| u32::from(i >= known))
}

/// Which positions of a letter are still worth probing
///
/// Confirmed and excluded positions are masked out, as is every position of a
/// letter known to be absent.
#[must_use]
pub fn position_mask(rule: Option<&Rule>) -> [u32; WORD_LEN] {
    let Some(rule) = rule else {
        return [1; WORD_LEN];
    };
    if rule.is_absent() {
        return [0; WORD_LEN];
    }

    let known = rule.confirmed().union(rule.excluded());
    std::array::from_fn(|p| u32::from(!known.contains(p)))
}

/// Frequency masks for every letter
#[must_use]
pub fn frequency_masks(store: &ConstraintStore) -> LetterTable {
    let mut table = [[0; WORD_LEN]; ALPHABET_LEN];
    for (index, row) in table.iter_mut().enumerate() {
        *row = frequency_mask(store.rule(index_letter(index)));
    }
    table
}

/// Position masks for every letter
#[must_use]
pub fn position_masks(store: &ConstraintStore) -> LetterTable {
    let mut table = [[0; WORD_LEN]; ALPHABET_LEN];
    for (index, row) in table.iter_mut().enumerate() {
        *row = position_mask(store.rule(index_letter(index)));
    }
    table
}
