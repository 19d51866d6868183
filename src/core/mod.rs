//! Core domain types for Wordle
//!
//! Words and guess outcomes. Everything here is pure and deterministic.

mod outcome;
mod word;

pub use outcome::{Mark, Outcome, OutcomeError};
pub use word::{ALPHABET_LEN, WORD_LEN, Word, WordError, index_letter, letter_index};

/// Maximum number of guesses in a game
pub const MAX_ROUNDS: usize = 6;
