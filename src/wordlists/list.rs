//! Word universe with frequencies

use super::embedded::WORDS;
use super::frequency::{FrequencyOracle, FrequencyTable};
use super::loader::{LoadError, load_from_file};
use crate::core::Word;
use rustc_hash::FxHashSet;
use std::path::Path;

/// Ordered word universe plus the frequency of each word
///
/// Order is preserved from the source and duplicates are dropped, so the
/// universe order doubles as the final tiebreak when scoring.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
    frequencies: FrequencyTable,
}

impl WordList {
    /// Build from (word, frequency) pairs; the first occurrence of a word wins
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Word, f64)>,
    {
        let mut seen = FxHashSet::default();
        let mut list = Self::default();

        for (word, frequency) in entries {
            if seen.insert(word.clone()) {
                list.frequencies.insert(&word, frequency);
                list.words.push(word);
            }
        }

        list
    }

    /// Universe compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_entries(
            WORDS
                .iter()
                .filter_map(|&(text, frequency)| Word::new(text).ok().map(|w| (w, frequency))),
        )
    }

    /// Load a `WORD FREQUENCY` file
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Ok(Self::from_entries(load_from_file(path)?))
    }

    /// All words in source order
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is part of the universe
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.frequencies.get(word.text()).is_some()
    }

    /// Words with frequency at least `min_frequency`, in source order
    #[must_use]
    pub fn with_min_frequency(&self, min_frequency: f64) -> Vec<Word> {
        self.words
            .iter()
            .filter(|w| self.frequencies.frequency(w) >= min_frequency)
            .cloned()
            .collect()
    }
}
