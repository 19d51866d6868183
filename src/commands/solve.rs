//! Solve mode
//!
//! Helps with a puzzle played elsewhere: suggests guesses, then reads the guess
//! actually played and the outcome shown by the game.

use super::console::{Console, PROMPT_WIDTH};
use crate::core::{Outcome, Word};
use crate::output::print_header;
use crate::scoring::WordScore;
use crate::solver::{CycleError, CycleStatus, RoundDriver, RoundReport, SolveCycle};
use crate::wordlists::FrequencyOracle;
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

/// Number of suggestions shown per round
const SUGGESTIONS: usize = 5;

/// Round driver backed by the console
struct Interactive<'c, R, W> {
    console: &'c mut Console<R, W>,
}

impl<R: BufRead, W: Write> RoundDriver for Interactive<'_, R, W> {
    fn next_guess(
        &mut self,
        round: usize,
        suggestions: &[WordScore],
    ) -> Result<Option<Word>, CycleError> {
        let out = self.console.out();
        writeln!(out, "Guess number {round}")?;
        if suggestions.is_empty() {
            writeln!(out, "Sorry - I don't have any suggestions for you!")?;
        } else {
            let top: Vec<&str> = suggestions
                .iter()
                .take(SUGGESTIONS)
                .map(|s| s.word.text())
                .collect();
            writeln!(out, "Suggestions: {}", top.join(", "))?;
        }

        self.console.guess(PROMPT_WIDTH).map(Some)
    }

    fn outcome_for(&mut self, _round: usize, _guess: &Word) -> Result<Outcome, CycleError> {
        let outcome = self.console.outcome(PROMPT_WIDTH)?;
        writeln!(self.console.out())?;
        Ok(outcome)
    }

    fn round_complete(&mut self, report: &RoundReport) -> Result<(), CycleError> {
        if let Some(err) = &report.inconsistency {
            let message = format!("That outcome contradicts earlier ones and was ignored ({err})");
            writeln!(self.console.out(), "{}\n", message.yellow())?;
        }
        Ok(())
    }
}

/// Run solve mode until the user declines another puzzle
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_solve<R, W, O>(
    console: &mut Console<R, W>,
    guesses: &[Word],
    oracle: &O,
    hard: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    O: FrequencyOracle + ?Sized,
{
    loop {
        print_header(console.out(), "Wordle Solver", hard)?;

        let report = SolveCycle::new(guesses, oracle, hard).run(&mut Interactive {
            console: &mut *console,
        })?;

        let out = console.out();
        match report.status {
            CycleStatus::Solved { .. } => {
                writeln!(out, "{}\n", "Congratulations - you solved it!".bright_green().bold())?;
            }
            CycleStatus::Exhausted | CycleStatus::Abandoned { .. } => {
                writeln!(out, "Sorry - I wasn't able to solve that one for you!")?;
            }
        }

        if !console.yes_no("Solve another? ")? {
            return Ok(());
        }
    }
}
