//! Constraint store: per-letter rules accumulated over a game

use super::rule::{Rule, RuleConflict};
use crate::core::{ALPHABET_LEN, Outcome, WORD_LEN, Word, index_letter, letter_index};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Feedback that contradicts what the store already knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("inconsistent feedback for letter {letter}: {conflict}")]
    Inconsistent {
        letter: char,
        #[source]
        conflict: RuleConflict,
    },
    #[error("position {} confirmed for both {first} and {second}", .position + 1)]
    SharedPosition {
        position: usize,
        first: char,
        second: char,
    },
    #[error("feedback requires at least {total} letters in a five-letter word")]
    TooManyLetters { total: usize },
}

/// What is known about a letter, as shown on the alphabet display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LetterStatus {
    /// No information yet
    #[default]
    Unknown,
    /// Not in the solution
    Absent,
    /// In the solution, position not yet known
    PresentUnplaced,
    /// In the solution at a known position
    PresentPlaced,
}

/// Status of every letter A-Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlphabetStatus([LetterStatus; ALPHABET_LEN]);

impl AlphabetStatus {
    /// Status of an uppercase letter
    #[must_use]
    pub const fn get(&self, letter: u8) -> LetterStatus {
        self.0[letter_index(letter)]
    }

    /// (letter, status) pairs from A to Z
    pub fn iter(&self) -> impl Iterator<Item = (char, LetterStatus)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, &status)| (char::from(index_letter(index)), status))
    }
}

/// Mapping from letter to accumulated `Rule`
///
/// Starts empty and only ever tightens. A letter without a rule is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstraintStore {
    rules: [Option<Rule>; ALPHABET_LEN],
}

impl ConstraintStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule for an uppercase letter, if any feedback mentioned it
    #[inline]
    #[must_use]
    pub const fn rule(&self, letter: u8) -> Option<&Rule> {
        self.rules[letter_index(letter)].as_ref()
    }

    /// Number of letters with a rule
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(Option::is_none)
    }

    /// (letter, rule) pairs for every constrained letter, alphabetically
    pub fn rules(&self) -> impl Iterator<Item = (u8, &Rule)> + '_ {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| rule.as_ref().map(|r| (index_letter(index), r)))
    }

    /// Store with the feedback of one guess added
    ///
    /// # Errors
    /// Returns a `RuleError` if the outcome contradicts the rules already held;
    /// `self` is not modified.
    pub fn absorbed(&self, guess: &Word, outcome: &Outcome) -> Result<Self, RuleError> {
        let mut next = *self;

        for letter in guess.distinct_letters() {
            let Some(observed) = Rule::observe(letter, guess, outcome) else {
                continue;
            };
            let slot = &mut next.rules[letter_index(letter)];
            let merged = match slot {
                Some(existing) => existing.merge(&observed).map_err(|conflict| {
                    RuleError::Inconsistent {
                        letter: char::from(letter),
                        conflict,
                    }
                })?,
                None => observed,
            };
            *slot = Some(merged);
        }

        next.check_across_letters()?;
        Ok(next)
    }

    /// Add the feedback of one guess
    ///
    /// On error the store keeps its previous rules.
    ///
    /// # Errors
    /// Returns a `RuleError` if the outcome contradicts the rules already held.
    pub fn absorb(&mut self, guess: &Word, outcome: &Outcome) -> Result<(), RuleError> {
        match self.absorbed(guess, outcome) {
            Ok(next) => {
                *self = next;
                Ok(())
            }
            Err(err) => {
                warn!(guess = %guess, outcome = %outcome, error = %err, "rejected inconsistent outcome");
                Err(err)
            }
        }
    }

    fn check_across_letters(&self) -> Result<(), RuleError> {
        let mut placed: [Option<u8>; WORD_LEN] = [None; WORD_LEN];
        for (letter, rule) in self.rules() {
            for position in rule.confirmed().iter() {
                if let Some(first) = placed[position] {
                    return Err(RuleError::SharedPosition {
                        position,
                        first: char::from(first),
                        second: char::from(letter),
                    });
                }
                placed[position] = Some(letter);
            }
        }

        let total: usize = self
            .rules()
            .map(|(_, rule)| usize::from(rule.minimum_count()))
            .sum();
        if total > WORD_LEN {
            return Err(RuleError::TooManyLetters { total });
        }

        Ok(())
    }

    /// Check whether `word` satisfies every rule
    #[must_use]
    pub fn is_match(&self, word: &Word) -> bool {
        self.rules()
            .all(|(letter, rule)| rule.is_satisfied_by(letter, word))
    }

    /// Words satisfying every rule, in input order
    pub fn filter<'a, I>(&self, words: I) -> Vec<&'a Word>
    where
        I: IntoIterator<Item = &'a Word>,
    {
        words.into_iter().filter(|w| self.is_match(w)).collect()
    }

    /// Alphabet display status of a single letter
    #[must_use]
    pub fn alphabet_status(&self, letter: u8) -> LetterStatus {
        match self.rule(letter) {
            None => LetterStatus::Unknown,
            Some(rule) if rule.is_absent() => LetterStatus::Absent,
            Some(rule) if rule.confirmed().is_empty() => LetterStatus::PresentUnplaced,
            Some(_) => LetterStatus::PresentPlaced,
        }
    }

    /// Alphabet display status of every letter
    #[must_use]
    pub fn alphabet(&self) -> AlphabetStatus {
        let mut status = [LetterStatus::Unknown; ALPHABET_LEN];
        for (index, slot) in status.iter_mut().enumerate() {
            *slot = self.alphabet_status(index_letter(index));
        }
        AlphabetStatus(status)
    }
}

impl fmt::Display for ConstraintStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, rule) in self.rules() {
            writeln!(f, "{}: {rule}", char::from(letter))?;
        }
        Ok(())
    }
}
