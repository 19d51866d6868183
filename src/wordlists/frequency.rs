//! Word frequency lookup
//!
//! Frequencies are Zipf-scale values: roughly `log10` of occurrences per
//! billion words. Common words sit around 5-7; unknown words score 0.

use crate::core::Word;
use rustc_hash::FxHashMap;

/// Source of word frequencies used for filtering and tie-breaking
pub trait FrequencyOracle {
    /// Frequency of `word`, 0.0 if unknown
    fn frequency(&self, word: &Word) -> f64;
}

/// Table-backed frequency oracle
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: FxHashMap<String, f64>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the frequency of a word, replacing any previous value
    pub fn insert(&mut self, word: &Word, frequency: f64) {
        self.entries.insert(word.text().to_string(), frequency);
    }

    /// Frequency by uppercase text
    #[must_use]
    pub fn get(&self, text: &str) -> Option<f64> {
        self.entries.get(text).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FrequencyOracle for FrequencyTable {
    fn frequency(&self, word: &Word) -> f64 {
        self.get(word.text()).unwrap_or(0.0)
    }
}

impl<'a> FromIterator<(&'a Word, f64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (&'a Word, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (word, frequency) in iter {
            table.insert(word, frequency);
        }
        table
    }
}
