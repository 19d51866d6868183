//! Heuristic guess scoring
//!
//! Candidate statistics are masked by what the constraint store already knows,
//! then every word of the universe is scored against them.

mod engine;
mod masks;

pub use engine::{
    ScoreTables, WordScore, apply_mask, frequency_stats, position_stats, score_words,
};
pub use masks::{frequency_mask, frequency_masks, position_mask, position_masks};

use crate::core::{ALPHABET_LEN, WORD_LEN};

/// Per-letter row of five counters, indexed by `letter_index`
pub type LetterTable = [[u32; WORD_LEN]; ALPHABET_LEN];
