//! Word scoring
//!
//! A word scores the number of remaining candidates that share each of its
//! letter counts and letter positions, skipping facts the constraint store
//! already knows. Higher scores split the candidate set more evenly.

use super::LetterTable;
use super::masks::{frequency_masks, position_masks};
use crate::core::{ALPHABET_LEN, WORD_LEN, Word, letter_index};
use crate::rules::ConstraintStore;
use crate::wordlists::FrequencyOracle;
use std::cmp::Ordering;
use std::fmt;

/// A ranked guess
#[derive(Debug, Clone, PartialEq)]
pub struct WordScore {
    pub word: Word,
    pub score: u32,
    pub frequency: f64,
}

impl WordScore {
    /// Ranking order: score descending, then frequency descending
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.frequency.total_cmp(&self.frequency))
    }
}

impl fmt::Display for WordScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{:.2})", self.word, self.score, self.frequency)
    }
}

/// `table[letter][i]` = candidates with at least `i + 1` copies of the letter
#[must_use]
pub fn frequency_stats<'a, I>(words: I) -> LetterTable
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut table = [[0; WORD_LEN]; ALPHABET_LEN];
    for word in words {
        for (row, &count) in table.iter_mut().zip(word.counts()) {
            for cell in row.iter_mut().take(usize::from(count)) {
                *cell += 1;
            }
        }
    }
    table
}

/// `table[letter][p]` = candidates with the letter at position `p`
#[must_use]
pub fn position_stats<'a, I>(words: I) -> LetterTable
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut table = [[0; WORD_LEN]; ALPHABET_LEN];
    for word in words {
        for (position, &letter) in word.chars().iter().enumerate() {
            table[letter_index(letter)][position] += 1;
        }
    }
    table
}

/// Element-wise product of statistics and masks
#[must_use]
pub fn apply_mask(stats: &LetterTable, mask: &LetterTable) -> LetterTable {
    let mut table = *stats;
    for (row, mask_row) in table.iter_mut().zip(mask) {
        for (cell, &m) in row.iter_mut().zip(mask_row) {
            *cell *= m;
        }
    }
    table
}

/// Masked statistics for one round
#[derive(Debug, Clone)]
pub struct ScoreTables {
    frequency: LetterTable,
    position: LetterTable,
}

impl ScoreTables {
    /// Build the masked tables for `candidates` under `store`
    #[must_use]
    pub fn new(candidates: &[&Word], store: &ConstraintStore) -> Self {
        let iter = candidates.iter().copied();
        Self {
            frequency: apply_mask(&frequency_stats(iter.clone()), &frequency_masks(store)),
            position: apply_mask(&position_stats(iter), &position_masks(store)),
        }
    }

    #[must_use]
    pub const fn frequency(&self) -> &LetterTable {
        &self.frequency
    }

    #[must_use]
    pub const fn position(&self) -> &LetterTable {
        &self.position
    }

    /// Score of a single word
    ///
    /// Repeated letters add their count statistic once; every position adds
    /// its position statistic.
    #[must_use]
    pub fn score(&self, word: &Word) -> u32 {
        let counts: u32 = word
            .distinct_letters()
            .map(|letter| {
                let count = usize::from(word.count_of(letter));
                self.frequency[letter_index(letter)][count - 1]
            })
            .sum();

        let positions: u32 = word
            .chars()
            .iter()
            .enumerate()
            .map(|(position, &letter)| self.position[letter_index(letter)][position])
            .sum();

        counts + positions
    }
}

/// Rank every word of `universe` as a guess against `candidates`
///
/// Sorted by score descending, then frequency descending; remaining ties keep
/// universe order. Returns an empty list when no candidate remains.
///
/// # Examples
/// ```
/// use wordlesolve::core::Word;
/// use wordlesolve::rules::ConstraintStore;
/// use wordlesolve::scoring::score_words;
/// use wordlesolve::wordlists::FrequencyTable;
///
/// let words: Vec<Word> = ["HAPPY", "ABBEY", "PEDAL"]
///     .iter()
///     .map(|w| Word::new(w).unwrap())
///     .collect();
/// let candidates: Vec<&Word> = words.iter().collect();
///
/// let scores = score_words(&words, &candidates, &ConstraintStore::new(), &FrequencyTable::new());
/// assert_eq!(scores.len(), 3);
/// assert_eq!(scores[0].word.text(), "ABBEY");
/// ```
pub fn score_words<'a, U, O>(
    universe: U,
    candidates: &[&Word],
    store: &ConstraintStore,
    oracle: &O,
) -> Vec<WordScore>
where
    U: IntoIterator<Item = &'a Word>,
    O: FrequencyOracle + ?Sized,
{
    if candidates.is_empty() {
        return Vec::new();
    }

    let tables = ScoreTables::new(candidates, store);
    let mut scores: Vec<WordScore> = universe
        .into_iter()
        .map(|word| WordScore {
            word: word.clone(),
            score: tables.score(word),
            frequency: oracle.frequency(word),
        })
        .collect();

    // Stable: equal entries keep universe order
    scores.sort_by(WordScore::rank_cmp);
    scores
}
