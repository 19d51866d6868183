//! Solve cycle: one puzzle from the first guess to solved or exhausted
//!
//! Each round moves through
//! `AwaitingGuess -> Scored -> AwaitingOutcome -> Updated` and then on to the
//! next round, `Solved` or `Exhausted`. Guesses and outcomes come from a
//! `RoundDriver`, which is either a person at the console or an automated
//! driver that knows the solution.

use crate::core::{MAX_ROUNDS, Outcome, Word};
use crate::rules::{AlphabetStatus, ConstraintStore, RuleError};
use crate::scoring::{WordScore, score_words};
use crate::wordlists::FrequencyOracle;
use std::fmt;
use std::io;
use thiserror::Error;
use tracing::{debug, trace};

/// Number of suggestions and matches kept in a round report
pub const REPORT_TOP: usize = 5;

/// Current state of a solve cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CyclePhase {
    AwaitingGuess { round: usize },
    Scored { round: usize },
    AwaitingOutcome { round: usize, guess: Word },
    Updated { round: usize, solved: bool },
    Solved { rounds: usize },
    Exhausted,
}

impl CyclePhase {
    /// Round in progress, if any
    #[must_use]
    pub const fn round(&self) -> Option<usize> {
        match self {
            Self::AwaitingGuess { round }
            | Self::Scored { round }
            | Self::AwaitingOutcome { round, .. }
            | Self::Updated { round, .. } => Some(*round),
            Self::Solved { .. } | Self::Exhausted => None,
        }
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Solved { .. } | Self::Exhausted)
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingGuess { round } => write!(f, "awaiting guess {round}"),
            Self::Scored { round } => write!(f, "scored round {round}"),
            Self::AwaitingOutcome { round, guess } => {
                write!(f, "awaiting outcome for {guess} in round {round}")
            }
            Self::Updated { round, .. } => write!(f, "updated after round {round}"),
            Self::Solved { rounds } => write!(f, "solved in {rounds}"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Error type for solve cycles
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("cannot do that while {0}")]
    OutOfOrder(CyclePhase),
    #[error("input ended before the puzzle was finished")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Source of guesses and outcomes for a solve cycle
pub trait RoundDriver {
    /// Guess to play, given the ranked suggestions for this round
    ///
    /// `suggestions` may be empty. Returning `None` abandons the puzzle.
    ///
    /// # Errors
    /// Returns a `CycleError` if the guess cannot be obtained.
    fn next_guess(
        &mut self,
        round: usize,
        suggestions: &[WordScore],
    ) -> Result<Option<Word>, CycleError>;

    /// Outcome of playing `guess`
    ///
    /// # Errors
    /// Returns a `CycleError` if the outcome cannot be obtained.
    fn outcome_for(&mut self, round: usize, guess: &Word) -> Result<Outcome, CycleError>;

    /// Solution, when the driver knows it
    fn solution(&self) -> Option<&Word> {
        None
    }

    /// Called once a round's feedback has been absorbed
    ///
    /// # Errors
    /// An error ends the cycle and is returned from `SolveCycle::run`.
    fn round_complete(&mut self, _report: &RoundReport) -> Result<(), CycleError> {
        Ok(())
    }
}

/// Driver that always plays the top suggestion against a known solution
#[derive(Debug, Clone)]
pub struct AutoDriver {
    solution: Word,
}

impl AutoDriver {
    #[must_use]
    pub const fn new(solution: Word) -> Self {
        Self { solution }
    }
}

impl RoundDriver for AutoDriver {
    fn next_guess(
        &mut self,
        _round: usize,
        suggestions: &[WordScore],
    ) -> Result<Option<Word>, CycleError> {
        Ok(suggestions.first().map(|s| s.word.clone()))
    }

    fn outcome_for(&mut self, _round: usize, guess: &Word) -> Result<Outcome, CycleError> {
        Ok(Outcome::evaluate(guess, &self.solution))
    }

    fn solution(&self) -> Option<&Word> {
        Some(&self.solution)
    }
}

/// Diagnostics for a single round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub round: usize,
    /// Top suggestions
    pub scores: Vec<WordScore>,
    /// Number of words scored
    pub score_count: usize,
    pub guess: Word,
    pub outcome: Outcome,
    /// First remaining matches, universe order
    pub matches: Vec<Word>,
    pub match_count: usize,
    pub alphabet: AlphabetStatus,
    /// Set when the outcome contradicted earlier feedback and was ignored
    pub inconsistency: Option<RuleError>,
}

/// How a solve cycle ended
///
/// `Solved` and `Exhausted` are the ends of the round state machine.
/// `Abandoned` is reported by `SolveCycle::run` when the driver returns no
/// guess, which the automated driver does once no candidate is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    Solved { rounds: usize },
    Exhausted,
    /// The driver had no guess to offer in this round
    Abandoned { round: usize },
}

/// Result of a complete solve cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub solution: Option<Word>,
    pub rounds: Vec<RoundReport>,
    pub status: CycleStatus,
}

impl CycleReport {
    /// Number of rounds needed, if solved
    #[must_use]
    pub const fn solved_in(&self) -> Option<usize> {
        match self.status {
            CycleStatus::Solved { rounds } => Some(rounds),
            CycleStatus::Exhausted | CycleStatus::Abandoned { .. } => None,
        }
    }

    /// Guesses in the order they were played
    pub fn guesses(&self) -> impl Iterator<Item = &Word> + '_ {
        self.rounds.iter().map(|r| &r.guess)
    }
}

/// State of one puzzle
///
/// Owns its constraint store; the universe and frequencies are borrowed and
/// may be shared between many cycles.
pub struct SolveCycle<'w, O: ?Sized> {
    universe: &'w [Word],
    oracle: &'w O,
    hard: bool,
    endgame: bool,
    opening: Option<&'w [WordScore]>,
    store: ConstraintStore,
    candidates: Vec<&'w Word>,
    suggestions: Vec<WordScore>,
    phase: CyclePhase,
    rounds: Vec<RoundReport>,
}

impl<'w, O> SolveCycle<'w, O>
where
    O: FrequencyOracle + ?Sized,
{
    /// Start a new puzzle: round 1, no rules, every word a candidate
    #[must_use]
    pub fn new(universe: &'w [Word], oracle: &'w O, hard: bool) -> Self {
        Self {
            universe,
            oracle,
            hard,
            endgame: false,
            opening: None,
            store: ConstraintStore::new(),
            candidates: universe.iter().collect(),
            suggestions: Vec::new(),
            phase: CyclePhase::AwaitingGuess { round: 1 },
            rounds: Vec::new(),
        }
    }

    /// Use a precomputed ranking for round 1
    ///
    /// The ranking must be `score_words(universe, universe)` for an empty store.
    #[must_use]
    pub fn with_opening(mut self, opening: &'w [WordScore]) -> Self {
        self.opening = Some(opening);
        self
    }

    /// Score only the candidates in the final round or once a single
    /// candidate remains
    ///
    /// Used for automated play, where the last guess has to be a possible
    /// solution.
    #[must_use]
    pub fn with_endgame(mut self) -> Self {
        self.endgame = true;
        self
    }

    #[must_use]
    pub const fn phase(&self) -> &CyclePhase {
        &self.phase
    }

    #[must_use]
    pub const fn is_hard(&self) -> bool {
        self.hard
    }

    #[must_use]
    pub const fn store(&self) -> &ConstraintStore {
        &self.store
    }

    /// Words still consistent with every outcome, universe order
    #[must_use]
    pub fn candidates(&self) -> &[&'w Word] {
        &self.candidates
    }

    /// Ranked suggestions of the current round
    #[must_use]
    pub fn suggestions(&self) -> &[WordScore] {
        &self.suggestions
    }

    #[must_use]
    pub fn rounds(&self) -> &[RoundReport] {
        &self.rounds
    }

    /// Rank the guesses for the current round
    ///
    /// Hard mode only considers candidates. So does any round where no word
    /// of the universe scores above zero, and with `with_endgame` the final
    /// round and any round with a single candidate left.
    ///
    /// # Errors
    /// Returns `CycleError::OutOfOrder` unless a guess is awaited.
    pub fn score(&mut self) -> Result<&[WordScore], CycleError> {
        let CyclePhase::AwaitingGuess { round } = self.phase else {
            return Err(CycleError::OutOfOrder(self.phase.clone()));
        };

        self.suggestions = match self.opening {
            Some(opening) if round == 1 => opening.to_vec(),
            _ => self.rank(round),
        };
        trace!(
            round,
            scored = self.suggestions.len(),
            candidates = self.candidates.len(),
            "scored round"
        );

        self.phase = CyclePhase::Scored { round };
        Ok(&self.suggestions)
    }

    fn rank(&self, round: usize) -> Vec<WordScore> {
        let endgame = self.endgame && (round == MAX_ROUNDS || self.candidates.len() == 1);
        let narrow = self.hard || endgame;
        if !narrow {
            let scores = score_words(self.universe, &self.candidates, &self.store, self.oracle);
            if scores.first().is_some_and(|s| s.score > 0) {
                return scores;
            }
        }

        score_words(
            self.candidates.iter().copied(),
            &self.candidates,
            &self.store,
            self.oracle,
        )
    }

    /// Commit to a guess for the current round
    ///
    /// # Errors
    /// Returns `CycleError::OutOfOrder` unless the round has been scored.
    pub fn play(&mut self, guess: Word) -> Result<(), CycleError> {
        let CyclePhase::Scored { round } = self.phase else {
            return Err(CycleError::OutOfOrder(self.phase.clone()));
        };
        self.phase = CyclePhase::AwaitingOutcome { round, guess };
        Ok(())
    }

    /// Absorb the outcome of the pending guess and refilter the candidates
    ///
    /// An outcome contradicting earlier feedback is recorded in the report
    /// and otherwise ignored.
    ///
    /// # Errors
    /// Returns `CycleError::OutOfOrder` unless an outcome is awaited.
    pub fn record(&mut self, outcome: Outcome) -> Result<&RoundReport, CycleError> {
        let CyclePhase::AwaitingOutcome { round, guess } = &self.phase else {
            return Err(CycleError::OutOfOrder(self.phase.clone()));
        };
        let (round, guess) = (*round, guess.clone());

        let inconsistency = self.store.absorb(&guess, &outcome).err();
        let store = self.store;
        self.candidates.retain(|w| store.is_match(w));

        debug!(
            round,
            guess = %guess,
            outcome = %outcome,
            matches = self.candidates.len(),
            "round complete"
        );

        let scores = std::mem::take(&mut self.suggestions);
        self.rounds.push(RoundReport {
            round,
            score_count: scores.len(),
            scores: scores.into_iter().take(REPORT_TOP).collect(),
            guess,
            outcome,
            matches: self
                .candidates
                .iter()
                .take(REPORT_TOP)
                .map(|&w| w.clone())
                .collect(),
            match_count: self.candidates.len(),
            alphabet: self.store.alphabet(),
            inconsistency,
        });

        self.phase = CyclePhase::Updated {
            round,
            solved: outcome.is_solved(),
        };

        Ok(&self.rounds[self.rounds.len() - 1])
    }

    /// Move on from an updated round
    ///
    /// # Errors
    /// Returns `CycleError::OutOfOrder` unless the round has been updated.
    pub fn advance(&mut self) -> Result<&CyclePhase, CycleError> {
        let CyclePhase::Updated { round, solved } = self.phase else {
            return Err(CycleError::OutOfOrder(self.phase.clone()));
        };

        self.phase = if solved {
            CyclePhase::Solved { rounds: round }
        } else if round >= MAX_ROUNDS {
            CyclePhase::Exhausted
        } else {
            CyclePhase::AwaitingGuess { round: round + 1 }
        };
        Ok(&self.phase)
    }

    /// Drive the cycle to completion
    ///
    /// # Errors
    /// Propagates any `CycleError` raised by the driver.
    pub fn run<D>(mut self, driver: &mut D) -> Result<CycleReport, CycleError>
    where
        D: RoundDriver + ?Sized,
    {
        let status = loop {
            match self.phase {
                CyclePhase::Solved { rounds } => break CycleStatus::Solved { rounds },
                CyclePhase::Exhausted => break CycleStatus::Exhausted,
                CyclePhase::AwaitingGuess { round } => {
                    let suggestions = self.score()?;
                    let Some(guess) = driver.next_guess(round, suggestions)? else {
                        break CycleStatus::Abandoned { round };
                    };
                    self.play(guess.clone())?;
                    let outcome = driver.outcome_for(round, &guess)?;
                    let report = self.record(outcome)?;
                    driver.round_complete(report)?;
                    self.advance()?;
                }
                CyclePhase::Scored { .. }
                | CyclePhase::AwaitingOutcome { .. }
                | CyclePhase::Updated { .. } => {
                    return Err(CycleError::OutOfOrder(self.phase.clone()));
                }
            }
        };

        Ok(CycleReport {
            solution: driver.solution().cloned(),
            rounds: self.rounds,
            status,
        })
    }
}

/// Run a whole puzzle with `driver` supplying guesses and outcomes
///
/// A driver that knows the solution plays with `SolveCycle::with_endgame`.
/// The report ends `Solved`, `Exhausted`, or `Abandoned` when the driver
/// runs out of guesses.
///
/// # Errors
/// Propagates any `CycleError` raised by the driver.
pub fn run_solve_cycle<O, D>(
    universe: &[Word],
    oracle: &O,
    driver: &mut D,
    hard: bool,
) -> Result<CycleReport, CycleError>
where
    O: FrequencyOracle + ?Sized,
    D: RoundDriver + ?Sized,
{
    let cycle = SolveCycle::new(universe, oracle, hard);
    if driver.solution().is_some() {
        cycle.with_endgame().run(driver)
    } else {
        cycle.run(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::{FrequencyTable, WordList};

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn solve(list: &WordList, solution: &str, hard: bool) -> CycleReport {
        let mut driver = AutoDriver::new(word(solution));
        run_solve_cycle(list.words(), list.frequencies(), &mut driver, hard).unwrap()
    }

    /// Driver replaying fixed guesses and outcomes
    struct Scripted {
        moves: Vec<(&'static str, &'static str)>,
        seen: Vec<usize>,
    }

    impl RoundDriver for Scripted {
        fn next_guess(
            &mut self,
            round: usize,
            suggestions: &[WordScore],
        ) -> Result<Option<Word>, CycleError> {
            self.seen.push(suggestions.len());
            Ok(self.moves.get(round - 1).map(|(g, _)| word(g)))
        }

        fn outcome_for(&mut self, round: usize, _guess: &Word) -> Result<Outcome, CycleError> {
            let (_, outcome) = self.moves[round - 1];
            Ok(outcome.parse().unwrap())
        }
    }

    #[test]
    fn greedy_cycle_solves_word_in_universe() {
        let list = WordList::embedded();
        let report = solve(&list, "SHAKE", false);

        assert!(report.solved_in().is_some_and(|n| n <= MAX_ROUNDS));
        let last = report.rounds.last().unwrap();
        assert_eq!(last.guess.text(), "SHAKE");
        assert!(last.outcome.is_solved());
        assert_eq!(report.solution, Some(word("SHAKE")));
    }

    #[test]
    fn hard_mode_only_guesses_candidates() {
        let list = WordList::embedded();
        let report = solve(&list, "SHAKE", true);

        assert!(report.solved_in().is_some());
        let mut store = ConstraintStore::new();
        for round in &report.rounds {
            assert!(store.is_match(&round.guess), "{} broke hard mode", round.guess);
            store.absorb(&round.guess, &round.outcome).unwrap();
        }
    }

    #[test]
    fn round_reports_track_matches() {
        let list = WordList::embedded();
        let report = solve(&list, "CRANE", false);

        let first = &report.rounds[0];
        assert_eq!(first.round, 1);
        assert_eq!(first.score_count, list.len());
        assert!(first.scores.len() <= REPORT_TOP);
        assert!(first.matches.len() <= REPORT_TOP);
        assert!(first.match_count < list.len());
        assert!(first.inconsistency.is_none());

        let counts: Vec<usize> = report.rounds.iter().map(|r| r.match_count).collect();
        assert!(counts.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*counts.last().unwrap(), 1);
    }

    #[test]
    fn opening_ranking_is_used_for_first_round() {
        let list = WordList::embedded();
        let opening = vec![WordScore {
            word: word("CRANE"),
            score: 1,
            frequency: 0.0,
        }];

        let mut driver = AutoDriver::new(word("CRANE"));
        let report = SolveCycle::new(list.words(), list.frequencies(), false)
            .with_opening(&opening)
            .run(&mut driver)
            .unwrap();

        assert_eq!(report.status, CycleStatus::Solved { rounds: 1 });
    }

    #[test]
    fn solution_outside_universe_runs_out_of_suggestions() {
        let universe = vec![word("CRANE"), word("SLATE")];
        let oracle = FrequencyTable::new();
        let mut driver = AutoDriver::new(word("FJORD"));

        let report = run_solve_cycle(&universe, &oracle, &mut driver, false).unwrap();
        assert_eq!(report.status, CycleStatus::Abandoned { round: 2 });
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.rounds[0].match_count, 0);
    }

    #[test]
    fn interactive_cycle_continues_without_suggestions() {
        let list = WordList::embedded();
        let mut driver = Scripted {
            moves: vec![("QZPTG", "11111"), ("GTZPQ", "22222")],
            seen: Vec::new(),
        };

        let report = run_solve_cycle(list.words(), list.frequencies(), &mut driver, false).unwrap();
        assert_eq!(report.status, CycleStatus::Solved { rounds: 2 });
        assert_eq!(driver.seen, vec![list.len(), 0]);
        assert_eq!(report.solution, None);
    }

    #[test]
    fn six_misses_exhaust_the_cycle() {
        let list = WordList::embedded();
        let mut driver = Scripted {
            moves: vec![("BRAIN", "02100"); MAX_ROUNDS],
            seen: Vec::new(),
        };

        let report = run_solve_cycle(list.words(), list.frequencies(), &mut driver, false).unwrap();
        assert_eq!(report.status, CycleStatus::Exhausted);
        assert_eq!(report.rounds.len(), MAX_ROUNDS);
        assert!(report.rounds.iter().all(|r| r.inconsistency.is_none()));
    }

    #[test]
    fn contradictory_outcome_is_recorded_not_fatal() {
        let list = WordList::embedded();
        let mut driver = Scripted {
            moves: vec![("HAPPY", "01210"), ("HELLO", "20000"), ("APPLE", "22222")],
            seen: Vec::new(),
        };

        let report = run_solve_cycle(list.words(), list.frequencies(), &mut driver, false).unwrap();
        assert!(report.rounds[1].inconsistency.is_some());
        assert_eq!(report.rounds[1].match_count, report.rounds[0].match_count);
        assert_eq!(report.status, CycleStatus::Solved { rounds: 3 });
    }

    fn miss_five_rounds(cycle: &mut SolveCycle<'_, FrequencyTable>) {
        for _ in 1..MAX_ROUNDS {
            cycle.score().unwrap();
            cycle.play(word("BRAIN")).unwrap();
            cycle.record("02100".parse().unwrap()).unwrap();
            cycle.advance().unwrap();
        }
    }

    #[test]
    fn final_round_narrows_only_with_endgame() {
        let list = WordList::embedded();

        let mut open = SolveCycle::new(list.words(), list.frequencies(), false);
        miss_five_rounds(&mut open);
        assert_eq!(open.phase(), &CyclePhase::AwaitingGuess { round: MAX_ROUNDS });
        assert!(open.candidates().len() > 1);
        assert_eq!(open.score().unwrap().len(), list.len());

        let mut closing = SolveCycle::new(list.words(), list.frequencies(), false).with_endgame();
        miss_five_rounds(&mut closing);
        let candidates = closing.candidates().len();
        assert_eq!(closing.score().unwrap().len(), candidates);
    }

    #[test]
    fn round_complete_error_ends_the_cycle() {
        struct Unwritable;

        impl RoundDriver for Unwritable {
            fn next_guess(
                &mut self,
                _round: usize,
                _suggestions: &[WordScore],
            ) -> Result<Option<Word>, CycleError> {
                Ok(Some(word("CRANE")))
            }

            fn outcome_for(&mut self, _round: usize, _guess: &Word) -> Result<Outcome, CycleError> {
                Ok("00000".parse().unwrap())
            }

            fn round_complete(&mut self, _report: &RoundReport) -> Result<(), CycleError> {
                Err(CycleError::Io(io::Error::other("output closed")))
            }
        }

        let list = WordList::embedded();
        let err = run_solve_cycle(list.words(), list.frequencies(), &mut Unwritable, false)
            .unwrap_err();
        assert!(matches!(err, CycleError::Io(_)));
    }

    #[test]
    fn steps_out_of_order_are_rejected() {
        let list = WordList::embedded();
        let mut cycle = SolveCycle::new(list.words(), list.frequencies(), false);

        assert!(matches!(
            cycle.play(word("CRANE")),
            Err(CycleError::OutOfOrder(CyclePhase::AwaitingGuess { round: 1 }))
        ));
        assert!(cycle.record(Outcome::SOLVED).is_err());

        cycle.score().unwrap();
        assert_eq!(cycle.phase(), &CyclePhase::Scored { round: 1 });
        cycle.play(word("CRANE")).unwrap();
        assert_eq!(cycle.phase().round(), Some(1));
        cycle.record("00000".parse().unwrap()).unwrap();
        assert_eq!(
            cycle.advance().unwrap(),
            &CyclePhase::AwaitingGuess { round: 2 }
        );
        assert!(!cycle.candidates().is_empty());
        assert!(cycle.candidates().iter().all(|w| !w.has_letter(b'C')));
    }
}
