//! Per-letter rule accumulated from guess outcomes

use crate::core::{Mark, Outcome, WORD_LEN, Word};
use std::fmt;
use thiserror::Error;

/// Set of word positions (0-4) stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionSet(u8);

impl PositionSet {
    /// The empty set
    pub const EMPTY: Self = Self(0);

    /// Set containing the given positions
    #[must_use]
    pub fn from_positions(positions: &[usize]) -> Self {
        positions.iter().fold(Self::EMPTY, |set, &p| set.with(p))
    }

    /// Copy of this set with `position` added
    #[must_use]
    pub const fn with(self, position: usize) -> Self {
        debug_assert!(position < WORD_LEN);
        Self(self.0 | (1 << position))
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, position: usize) -> bool {
        self.0 & (1 << position) != 0
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if every position of `self` is also in `other`
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Positions in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..WORD_LEN).filter(move |&p| self.contains(p))
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, position) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{position}")?;
        }
        write!(f, "}}")
    }
}

/// Why two rules for the same letter cannot both hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleConflict {
    #[error("exact count was {previous}, new feedback implies {observed}")]
    ExactCountChanged { previous: u8, observed: u8 },
    #[error("at least {required} required but exactly {exact} known")]
    CountAboveExact { exact: u8, required: u8 },
    #[error("position {} is both confirmed and excluded", .position + 1)]
    PositionConflict { position: usize },
    #[error("{confirmed} confirmed positions but exactly {exact} known")]
    TooManyConfirmed { exact: u8, confirmed: usize },
}

/// Everything known about one letter of the solution
///
/// A rule never loosens: merging two rules yields one at least as tight as both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rule {
    minimum_count: u8,
    count_is_exact: bool,
    confirmed: PositionSet,
    excluded: PositionSet,
}

impl Rule {
    /// Build a rule directly from its parts
    #[must_use]
    pub const fn new(
        minimum_count: u8,
        count_is_exact: bool,
        confirmed: PositionSet,
        excluded: PositionSet,
    ) -> Self {
        Self {
            minimum_count,
            count_is_exact,
            confirmed,
            excluded,
        }
    }

    /// Rule implied for `letter` by a single guess and its outcome
    ///
    /// Returns `None` if the letter does not occur in the guess.
    #[must_use]
    pub fn observe(letter: u8, guess: &Word, outcome: &Outcome) -> Option<Self> {
        if !guess.has_letter(letter) {
            return None;
        }

        let mut rule = Self::default();
        for (position, (&g, &mark)) in guess.chars().iter().zip(outcome.marks()).enumerate() {
            if g != letter {
                continue;
            }
            match mark {
                Mark::Here => {
                    rule.minimum_count += 1;
                    rule.confirmed = rule.confirmed.with(position);
                }
                Mark::Elsewhere => {
                    rule.minimum_count += 1;
                    rule.excluded = rule.excluded.with(position);
                }
                Mark::Absent => rule.count_is_exact = true,
            }
        }

        Some(rule)
    }

    /// Combine two rules for the same letter into the tightest rule implied by both
    ///
    /// # Errors
    /// Returns a `RuleConflict` if the rules contradict each other.
    pub fn merge(&self, other: &Self) -> Result<Self, RuleConflict> {
        match (self.count_is_exact, other.count_is_exact) {
            (true, true) if self.minimum_count != other.minimum_count => {
                return Err(RuleConflict::ExactCountChanged {
                    previous: self.minimum_count,
                    observed: other.minimum_count,
                });
            }
            (true, false) if other.minimum_count > self.minimum_count => {
                return Err(RuleConflict::CountAboveExact {
                    exact: self.minimum_count,
                    required: other.minimum_count,
                });
            }
            (false, true) if self.minimum_count > other.minimum_count => {
                return Err(RuleConflict::CountAboveExact {
                    exact: other.minimum_count,
                    required: self.minimum_count,
                });
            }
            _ => {}
        }

        let confirmed = self.confirmed.union(other.confirmed);
        let excluded = self.excluded.union(other.excluded);
        if let Some(position) = confirmed.intersection(excluded).iter().next() {
            return Err(RuleConflict::PositionConflict { position });
        }

        let count_is_exact = self.count_is_exact || other.count_is_exact;
        let mut minimum_count = self.minimum_count.max(other.minimum_count);
        if confirmed.len() > usize::from(minimum_count) {
            if count_is_exact {
                return Err(RuleConflict::TooManyConfirmed {
                    exact: minimum_count,
                    confirmed: confirmed.len(),
                });
            }
            minimum_count = confirmed.len() as u8;
        }

        Ok(Self {
            minimum_count,
            count_is_exact,
            confirmed,
            excluded,
        })
    }

    /// Lower bound on occurrences of the letter in the solution
    #[inline]
    #[must_use]
    pub const fn minimum_count(&self) -> u8 {
        self.minimum_count
    }

    /// True once the total count is known exactly
    #[inline]
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.count_is_exact
    }

    /// Positions known to hold the letter
    #[inline]
    #[must_use]
    pub const fn confirmed(&self) -> PositionSet {
        self.confirmed
    }

    /// Positions known not to hold the letter
    #[inline]
    #[must_use]
    pub const fn excluded(&self) -> PositionSet {
        self.excluded
    }

    /// Letter does not occur in the solution at all
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.minimum_count == 0
    }

    /// Check whether `count` occurrences satisfy the count constraint
    #[inline]
    #[must_use]
    pub const fn allows_count(&self, count: u8) -> bool {
        if self.count_is_exact {
            count == self.minimum_count
        } else {
            count >= self.minimum_count
        }
    }

    /// Check whether `word` satisfies this rule for `letter`
    #[must_use]
    pub fn is_satisfied_by(&self, letter: u8, word: &Word) -> bool {
        self.allows_count(word.count_of(letter))
            && self.confirmed.iter().all(|p| word.char_at(p) == letter)
            && !self.excluded.iter().any(|p| word.char_at(p) == letter)
    }

    /// True if `self` is at least as tight as `other`
    #[must_use]
    pub fn tightens(&self, other: &Self) -> bool {
        self.minimum_count >= other.minimum_count
            && (self.count_is_exact || !other.count_is_exact)
            && other.confirmed.is_subset(self.confirmed)
            && other.excluded.is_subset(self.excluded)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.count_is_exact { "==" } else { ">=" };
        write!(f, "count {op} {}", self.minimum_count)?;
        if !self.confirmed.is_empty() {
            write!(f, ", at {}", self.confirmed)?;
        }
        if !self.excluded.is_empty() {
            write!(f, ", not at {}", self.excluded)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(letter: u8, guess: &str, outcome: &str) -> Option<Rule> {
        Rule::observe(letter, &Word::new(guess).unwrap(), &outcome.parse().unwrap())
    }

    #[test]
    fn rule_defaults() {
        let rule = Rule::default();
        assert_eq!(rule.minimum_count(), 0);
        assert!(!rule.is_exact());
        assert!(rule.confirmed().is_empty());
        assert!(rule.excluded().is_empty());
    }

    #[test]
    fn position_set_operations() {
        let set = PositionSet::from_positions(&[1, 3]);
        assert!(set.contains(1));
        assert!(!set.contains(2));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);
        assert!(PositionSet::from_positions(&[3]).is_subset(set));
        assert_eq!(set.to_string(), "{1, 3}");
    }

    #[test]
    fn observe_happy() {
        let h = observe(b'H', "HAPPY", "01210").unwrap();
        assert_eq!(h, Rule::new(0, true, PositionSet::EMPTY, PositionSet::EMPTY));

        let a = observe(b'A', "HAPPY", "01210").unwrap();
        assert_eq!(
            a,
            Rule::new(1, false, PositionSet::EMPTY, PositionSet::from_positions(&[1]))
        );

        let p = observe(b'P', "HAPPY", "01210").unwrap();
        assert_eq!(
            p,
            Rule::new(
                2,
                false,
                PositionSet::from_positions(&[2]),
                PositionSet::from_positions(&[3])
            )
        );

        assert!(observe(b'Z', "HAPPY", "01210").is_none());
    }

    #[test]
    fn observe_absent_duplicate_sets_exact_count() {
        // First A green, second A grey
        let a = observe(b'A', "ALTAR", "20001").unwrap();
        assert_eq!(a.minimum_count(), 1);
        assert!(a.is_exact());
        assert_eq!(a.confirmed(), PositionSet::from_positions(&[0]));
        // Absent positions never join the excluded set
        assert!(a.excluded().is_empty());
    }

    #[test]
    fn merge_accumulates() {
        let first = observe(b'A', "HAPPY", "01210").unwrap();
        let second = observe(b'A', "ALTAR", "20001").unwrap();
        let merged = first.merge(&second).unwrap();

        assert_eq!(merged.minimum_count(), 1);
        assert!(merged.is_exact());
        assert_eq!(merged.confirmed(), PositionSet::from_positions(&[0]));
        assert_eq!(merged.excluded(), PositionSet::from_positions(&[1]));
        assert!(merged.tightens(&first));
        assert!(merged.tightens(&second));
    }

    #[test]
    fn merge_is_idempotent() {
        let rule = observe(b'P', "HAPPY", "01210").unwrap();
        assert_eq!(rule.merge(&rule).unwrap(), rule);
    }

    #[test]
    fn merge_raises_count_to_confirmed_positions() {
        let first = Rule::new(1, false, PositionSet::from_positions(&[0]), PositionSet::EMPTY);
        let second = Rule::new(1, false, PositionSet::from_positions(&[4]), PositionSet::EMPTY);
        let merged = first.merge(&second).unwrap();
        assert_eq!(merged.minimum_count(), 2);
    }

    #[test]
    fn merge_rejects_changed_exact_count() {
        let one = Rule::new(1, true, PositionSet::EMPTY, PositionSet::EMPTY);
        let two = Rule::new(2, true, PositionSet::EMPTY, PositionSet::EMPTY);
        assert_eq!(
            one.merge(&two),
            Err(RuleConflict::ExactCountChanged {
                previous: 1,
                observed: 2
            })
        );
    }

    #[test]
    fn merge_rejects_lower_bound_above_exact() {
        let exact = Rule::new(0, true, PositionSet::EMPTY, PositionSet::EMPTY);
        let bound = Rule::new(1, false, PositionSet::EMPTY, PositionSet::EMPTY);
        let expected = Err(RuleConflict::CountAboveExact {
            exact: 0,
            required: 1,
        });
        assert_eq!(exact.merge(&bound), expected);
        assert_eq!(bound.merge(&exact), expected);
    }

    #[test]
    fn merge_rejects_confirmed_and_excluded_position() {
        let here = Rule::new(1, false, PositionSet::from_positions(&[2]), PositionSet::EMPTY);
        let elsewhere = Rule::new(1, false, PositionSet::EMPTY, PositionSet::from_positions(&[2]));
        assert_eq!(
            here.merge(&elsewhere),
            Err(RuleConflict::PositionConflict { position: 2 })
        );
    }

    #[test]
    fn merge_rejects_too_many_confirmed_for_exact() {
        let exact = Rule::new(1, true, PositionSet::from_positions(&[0]), PositionSet::EMPTY);
        let other = Rule::new(1, false, PositionSet::from_positions(&[4]), PositionSet::EMPTY);
        assert_eq!(
            exact.merge(&other),
            Err(RuleConflict::TooManyConfirmed {
                exact: 1,
                confirmed: 2
            })
        );
    }

    #[test]
    fn satisfied_by_checks_count_and_positions() {
        let p = observe(b'P', "HAPPY", "01210").unwrap();
        let word = |w: &str| Word::new(w).unwrap();

        assert!(p.is_satisfied_by(b'P', &word("APPLE")));
        assert!(!p.is_satisfied_by(b'P', &word("ARPHE"))); // one P only
        assert!(!p.is_satisfied_by(b'P', &word("APLEP"))); // no P at 2
        assert!(!p.is_satisfied_by(b'P', &word("ALPPE"))); // P at 3
    }

    #[test]
    fn rule_display() {
        let p = observe(b'P', "HAPPY", "01210").unwrap();
        assert_eq!(p.to_string(), "count >= 2, at {2}, not at {3}");
    }
}
