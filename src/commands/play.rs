//! Play mode
//!
//! A console Wordle game against a randomly picked solution.

use super::console::Console;
use crate::core::{MAX_ROUNDS, Outcome, Word};
use crate::output::{print_alphabet, print_header, print_word};
use crate::rules::ConstraintStore;
use anyhow::{Result, bail};
use colored::Colorize;
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use std::io::{BufRead, Write};
use tracing::debug;

/// Play games until the user declines another
///
/// Guesses must come from `guesses`; the solution is drawn from `solutions`
/// with `rng`. In hard mode every guess has to be consistent with the hints
/// revealed so far.
///
/// # Errors
///
/// Returns an error if `solutions` is empty, or reading input or writing
/// output fails.
pub fn run_play<R, W, G>(
    console: &mut Console<R, W>,
    guesses: &[Word],
    solutions: &[Word],
    hard: bool,
    rng: &mut G,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let valid: FxHashSet<&Word> = guesses.iter().collect();

    loop {
        let Some(solution) = solutions.choose(rng) else {
            bail!("no solutions to pick from");
        };
        debug!(%solution, "picked solution");

        print_header(console.out(), "WORDLE", hard)?;

        if play_game(console, &valid, solution, hard)? {
            writeln!(
                console.out(),
                "{}\n",
                "Congratulations - you solved it!".bright_green().bold()
            )?;
        } else {
            let out = console.out();
            writeln!(out, "The correct answer was: {}", solution.text().bold())?;
            writeln!(out, "Better luck next time!\n")?;
        }

        if !console.yes_no("Play again? ")? {
            return Ok(());
        }
    }
}

/// One game; true when solved within the round limit
fn play_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    valid: &FxHashSet<&Word>,
    solution: &Word,
    hard: bool,
) -> Result<bool> {
    let mut store = ConstraintStore::new();

    for round in 1..=MAX_ROUNDS {
        writeln!(console.out(), "Guess number {round}")?;

        let guess = loop {
            let guess = console.guess(0)?;
            if !valid.contains(&guess) {
                writeln!(console.out(), "That is not a valid word. Please try again.\n")?;
            } else if hard && !store.is_match(&guess) {
                writeln!(
                    console.out(),
                    "In hard mode you have to use all revealed hints in each guess\n"
                )?;
            } else {
                break guess;
            }
        };

        let outcome = Outcome::evaluate(&guess, solution);
        let out = console.out();
        writeln!(out)?;
        print_word(out, &guess, &outcome)?;
        writeln!(out)?;

        if outcome.is_solved() {
            return Ok(true);
        }

        store.absorb(&guess, &outcome)?;
        print_alphabet(out, &store.alphabet())?;
        writeln!(out)?;
    }

    Ok(false)
}
