//! Constraint accumulation and candidate filtering
//!
//! Each (guess, outcome) pair is turned into one `Rule` per guessed letter and
//! merged into a `ConstraintStore`. The store answers whether a word is still a
//! possible solution.

mod rule;
mod store;

pub use rule::{PositionSet, Rule, RuleConflict};
pub use store::{AlphabetStatus, ConstraintStore, LetterStatus, RuleError};
