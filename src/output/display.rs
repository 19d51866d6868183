//! Display functions for command results

use super::formatters::{
    alphabet_line, format_elapsed, match_list, percent, score_list, word_rows,
};
use crate::core::{Outcome, Word};
use crate::rules::AlphabetStatus;
use crate::solver::{BatchReport, CycleReport};
use colored::Colorize;
use std::io::{self, Write};

/// Print a guess as three rows of coloured boxes
///
/// # Errors
/// Returns any error from the writer.
pub fn print_word<W: Write>(out: &mut W, word: &Word, outcome: &Outcome) -> io::Result<()> {
    for row in word_rows(word, outcome) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

/// Print the alphabet coloured by letter status
///
/// # Errors
/// Returns any error from the writer.
pub fn print_alphabet<W: Write>(out: &mut W, alphabet: &AlphabetStatus) -> io::Result<()> {
    writeln!(out, "{}", alphabet_line(alphabet, " "))
}

/// Print a mode banner
///
/// # Errors
/// Returns any error from the writer.
pub fn print_header<W: Write>(out: &mut W, title: &str, hard: bool) -> io::Result<()> {
    writeln!(out, "\n")?;
    writeln!(out, "{}", title.bright_cyan().bold())?;
    writeln!(out, "{}", "-".repeat(title.len()).cyan())?;
    if hard {
        writeln!(out, "[Hard mode]")?;
    }
    writeln!(out)
}

/// Print the summary of a test run
///
/// Verbosity 1 adds one line per solution; verbosity 2 adds each round's
/// scores, matches and letters.
///
/// # Errors
/// Returns any error from the writer.
pub fn print_batch_report<W: Write>(
    out: &mut W,
    report: &BatchReport,
    verbosity: u8,
) -> io::Result<()> {
    let total = report.total();
    let mode = if report.hard { " (hard mode)" } else { "" };

    writeln!(out)?;
    writeln!(out, "Words tested: {total}{mode}")?;
    writeln!(out, "Total time:   {}", format_elapsed(report.elapsed))?;
    if let Some(avg) = report.average_guesses() {
        writeln!(out, "Average:      {avg:.2}")?;
    }
    writeln!(out)?;

    // Right-align counts and percentages
    let widest = report
        .solved_by_round
        .iter()
        .copied()
        .chain([report.unsolved, report.failed])
        .max()
        .unwrap_or(0);
    let count_width = widest.to_string().len();
    let percent_width = percent(widest, total).to_string().len();
    let tally = |count: usize| {
        format!(
            "{count:>count_width$} [{:>percent_width$}%]",
            percent(count, total)
        )
    };

    for (i, &count) in report.solved_by_round.iter().enumerate() {
        writeln!(out, "Solved in {}:  {}", i + 1, tally(count))?;
    }
    writeln!(out, "Unsolved:     {}", tally(report.unsolved))?;
    if report.failed > 0 {
        writeln!(out, "{}", format!("Failed:       {}", tally(report.failed)).red())?;
    }

    let mut unsolved: Vec<&str> = report.unsolved_words().map(Word::text).collect();
    unsolved.sort_unstable();
    if !unsolved.is_empty() && verbosity == 0 {
        writeln!(out, "Unsolved:     {}", unsolved.join(", "))?;
    }

    let mut results: Vec<_> = report.results.iter().collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));

    for (_, result) in &results {
        if let Err(failure) = result {
            writeln!(out, "{}", failure.to_string().red())?;
        }
    }

    if verbosity > 0 {
        writeln!(out)?;
        for (word, result) in results {
            if let Ok(cycle) = result {
                print_cycle(out, word, cycle, verbosity)?;
            }
        }
    }

    writeln!(out, "\n")
}

fn print_cycle<W: Write>(
    out: &mut W,
    word: &Word,
    cycle: &CycleReport,
    verbosity: u8,
) -> io::Result<()> {
    let status = match cycle.solved_in() {
        Some(rounds) => format!("solved in {rounds} guesses"),
        None => "not solved".to_string(),
    };
    let guesses: Vec<&str> = cycle.guesses().map(Word::text).collect();
    writeln!(
        out,
        "{}: {status} ({})",
        word.text().green(),
        guesses.join(", ")
    )?;

    if verbosity < 2 {
        return Ok(());
    }

    for round in &cycle.rounds {
        writeln!(out)?;
        writeln!(out, "Guess {}", round.round)?;
        writeln!(out, "Scores:  {}", score_list(&round.scores, round.score_count))?;
        writeln!(out, "Guess:   {}", round.guess)?;
        writeln!(out, "Outcome: {}", round.outcome)?;

        if let Some(err) = &round.inconsistency {
            writeln!(out, "Ignored: {err}")?;
        }

        // Nothing left to narrow once solved
        if !round.outcome.is_solved() {
            writeln!(out, "Matches: {}", match_list(&round.matches, round.match_count))?;
            writeln!(out, "Letters: {}", alphabet_line(&round.alphabet, " "))?;
        }
    }
    writeln!(out, "\n")
}
