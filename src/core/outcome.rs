//! Wordle feedback outcome calculation and representation
//!
//! An outcome holds one mark per guessed letter:
//! - 0 = Absent (no further copies of the letter in the solution)
//! - 1 = Elsewhere (letter in the solution, wrong position)
//! - 2 = Here (letter in the correct position)
//!
//! The textual form is five digits, e.g. `"01210"`.

use super::word::{ALPHABET_LEN, WORD_LEN, Word, letter_index};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Feedback for a single guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    /// Grey
    Absent,
    /// Yellow
    Elsewhere,
    /// Green
    Here,
}

impl Mark {
    /// Digit used in outcome strings
    #[must_use]
    pub const fn digit(self) -> char {
        match self {
            Self::Absent => '0',
            Self::Elsewhere => '1',
            Self::Here => '2',
        }
    }

    /// Parse an outcome digit
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Absent),
            '1' => Some(Self::Elsewhere),
            '2' => Some(Self::Here),
            _ => None,
        }
    }

    /// True for Elsewhere and Here
    #[must_use]
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Error type for invalid outcome strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutcomeError {
    #[error("Outcome must be exactly 5 digits, got {0} characters")]
    InvalidLength(usize),
    #[error("Outcome digit must be 0, 1 or 2, got '{0}'")]
    InvalidDigit(char),
}

/// Feedback for a whole guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome([Mark; WORD_LEN]);

impl Outcome {
    /// All greens (solved)
    pub const SOLVED: Self = Self([Mark::Here; WORD_LEN]);

    /// Build an outcome from individual marks
    #[must_use]
    pub const fn new(marks: [Mark; WORD_LEN]) -> Self {
        Self(marks)
    }

    /// Calculate the outcome when `guess` is played against `solution`
    ///
    /// Exact-position matches take precedence over wrong-position matches
    /// when a letter repeats.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and consume those solution letters
    /// 2. Second pass: mark remaining letters Elsewhere while unconsumed copies
    ///    remain in the solution, Absent otherwise
    ///
    /// # Examples
    /// ```
    /// use wordlesolve::core::{Outcome, Word};
    ///
    /// let guess = Word::new("colin").unwrap();
    /// let solution = Word::new("cynic").unwrap();
    /// assert_eq!(Outcome::evaluate(&guess, &solution).to_string(), "20021");
    /// ```
    #[must_use]
    pub fn evaluate(guess: &Word, solution: &Word) -> Self {
        let mut marks = [Mark::Absent; WORD_LEN];
        let mut available: [u8; ALPHABET_LEN] = *solution.counts();

        // First pass: exact position matches
        for (i, (&g, &s)) in guess.chars().iter().zip(solution.chars()).enumerate() {
            if g == s {
                marks[i] = Mark::Here;
                available[letter_index(g)] -= 1;
            }
        }

        // Second pass: wrong position, while copies remain
        for (i, &g) in guess.chars().iter().enumerate() {
            if marks[i] == Mark::Here {
                continue;
            }
            let remaining = &mut available[letter_index(g)];
            if *remaining > 0 {
                marks[i] = Mark::Elsewhere;
                *remaining -= 1;
            }
        }

        Self(marks)
    }

    /// Marks in guess order
    #[inline]
    #[must_use]
    pub const fn marks(&self) -> &[Mark; WORD_LEN] {
        &self.0
    }

    /// Mark at a position (0-4)
    #[inline]
    #[must_use]
    pub const fn mark_at(&self, position: usize) -> Mark {
        self.0[position]
    }

    /// Check if every letter is in the correct position
    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Count the number of green marks
    #[must_use]
    pub fn count_here(&self) -> usize {
        self.0.iter().filter(|&&m| m == Mark::Here).count()
    }

    /// Count the number of yellow marks
    #[must_use]
    pub fn count_elsewhere(&self) -> usize {
        self.0.iter().filter(|&&m| m == Mark::Elsewhere).count()
    }
}

impl FromStr for Outcome {
    type Err = OutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != WORD_LEN {
            return Err(OutcomeError::InvalidLength(chars.len()));
        }

        let mut marks = [Mark::Absent; WORD_LEN];
        for (mark, ch) in marks.iter_mut().zip(chars) {
            *mark = Mark::from_digit(ch).ok_or(OutcomeError::InvalidDigit(ch))?;
        }

        Ok(Self(marks))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.0 {
            write!(f, "{}", mark.digit())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome(guess: &str, solution: &str) -> String {
        let guess = Word::new(guess).unwrap();
        let solution = Word::new(solution).unwrap();
        Outcome::evaluate(&guess, &solution).to_string()
    }

    #[test]
    fn outcome_solved_constant() {
        assert!(Outcome::SOLVED.is_solved());
        assert_eq!(Outcome::SOLVED.count_here(), 5);
        assert_eq!(Outcome::SOLVED.to_string(), "22222");
    }

    #[test]
    fn outcome_all_absent() {
        assert_eq!(outcome("abcde", "fghij"), "00000");
    }

    #[test]
    fn outcome_reference_examples() {
        assert_eq!(outcome("COLIN", "CYNIC"), "20021");
        assert_eq!(outcome("CACKE", "CYNIC"), "20100");
        assert_eq!(outcome("CCCCC", "CYNIC"), "20002");
    }

    #[test]
    fn outcome_duplicate_letters_green_takes_priority() {
        // Second O is green, so the first only gets the remaining copy as yellow
        assert_eq!(outcome("ROBOT", "FLOOR"), "11020");
        // SPEED vs ERASE: both E's are yellow, ERASE has two
        assert_eq!(outcome("SPEED", "ERASE"), "10110");
        // Only one L in the solution: later copy is grey
        assert_eq!(outcome("LLAMA", "LEMON"), "20010");
    }

    #[test]
    fn outcome_happy_against_paper() {
        assert_eq!(outcome("HAPPY", "PAPER"), "02210");
        assert_eq!(outcome("HAPPY", "APPLE"), "01210");
    }

    #[test]
    fn outcome_parse_valid() {
        let parsed: Outcome = "01210".parse().unwrap();
        assert_eq!(parsed.mark_at(0), Mark::Absent);
        assert_eq!(parsed.mark_at(1), Mark::Elsewhere);
        assert_eq!(parsed.mark_at(2), Mark::Here);
        assert_eq!(parsed.count_elsewhere(), 2);
        assert_eq!(parsed.to_string(), "01210");
    }

    #[test]
    fn outcome_parse_invalid() {
        assert_eq!(
            "0121".parse::<Outcome>(),
            Err(OutcomeError::InvalidLength(4))
        );
        assert_eq!(
            "012100".parse::<Outcome>(),
            Err(OutcomeError::InvalidLength(6))
        );
        assert_eq!(
            "01310".parse::<Outcome>(),
            Err(OutcomeError::InvalidDigit('3'))
        );
    }

    fn word_strategy() -> impl Strategy<Value = Word> {
        // Small alphabet so repeated letters are common
        proptest::collection::vec(proptest::sample::select(b"ABCDE".to_vec()), WORD_LEN)
            .prop_map(|bytes| Word::new(String::from_utf8(bytes).unwrap()).unwrap())
    }

    proptest! {
        #[test]
        fn greens_equal_matching_positions(guess in word_strategy(), solution in word_strategy()) {
            let result = Outcome::evaluate(&guess, &solution);
            let matching = guess
                .chars()
                .iter()
                .zip(solution.chars())
                .filter(|(g, s)| g == s)
                .count();
            prop_assert_eq!(result.count_here(), matching);
        }

        #[test]
        fn present_marks_never_exceed_solution_count(guess in word_strategy(), solution in word_strategy()) {
            let result = Outcome::evaluate(&guess, &solution);
            for letter in guess.distinct_letters() {
                let present = guess
                    .chars()
                    .iter()
                    .zip(result.marks())
                    .filter(|&(&g, m)| g == letter && m.is_present())
                    .count();
                prop_assert!(present <= usize::from(solution.count_of(letter)));
            }
        }

        #[test]
        fn self_evaluation_is_solved(word in word_strategy()) {
            prop_assert!(Outcome::evaluate(&word, &word).is_solved());
        }
    }
}
