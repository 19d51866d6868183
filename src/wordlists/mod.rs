//! Word universe and frequencies
//!
//! The default universe is compiled into the binary; a custom one can be
//! loaded from a `WORD FREQUENCY` file.

mod embedded;
mod frequency;
mod list;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
pub use frequency::{FrequencyOracle, FrequencyTable};
pub use list::WordList;
pub use loader::LoadError;

/// Default minimum frequency for words considered as guesses
pub const DEFAULT_GUESS_FREQ: f64 = 1.17;

/// Default minimum frequency for guesses in play mode: any listed word
pub const DEFAULT_PLAY_GUESS_FREQ: f64 = 0.0;

/// Default minimum frequency for words picked as solutions
pub const DEFAULT_SOLUTION_FREQ: f64 = 3.2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_count_matches_const() {
        assert_eq!(WORDS.len(), WORDS_COUNT);
    }

    #[test]
    fn embedded_words_are_valid() {
        for &(word, frequency) in WORDS {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "Word '{word}' contains non-uppercase chars"
            );
            assert!(frequency > 0.0, "Word '{word}' has no frequency");
        }
    }

    #[test]
    fn data_file_header_is_not_a_word() {
        let data = include_str!("../../data/words.txt");
        assert!(data.starts_with('#'));

        let parsed = loader::parse_entries(data).unwrap();
        assert_eq!(parsed.len(), WORDS_COUNT);
        assert_eq!(parsed[0].0.text(), WORDS[0].0);
    }

    #[test]
    fn default_solution_list_is_subset_of_guess_list() {
        let list = WordList::embedded();
        let guesses = list.with_min_frequency(DEFAULT_GUESS_FREQ);
        let solutions = list.with_min_frequency(DEFAULT_SOLUTION_FREQ);
        assert!(!solutions.is_empty());
        assert!(solutions.len() <= guesses.len());
        assert!(solutions.iter().all(|s| guesses.contains(s)));
    }
}
