//! Test mode - batch evaluation of the solver
//!
//! Solves a set of puzzles automatically and reports how many rounds each took.

use crate::core::Word;
use crate::output::{print_batch_report, print_header};
use crate::solver::{BatchOptions, BatchReport, run_batch};
use crate::wordlists::loader::load_solutions;
use crate::wordlists::{DEFAULT_SOLUTION_FREQ, WordList};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// What to test and how to report it
#[derive(Debug, Clone)]
pub struct TestOptions {
    /// Explicit solutions; take precedence over `file` and `count`
    pub solutions: Vec<String>,
    /// File with one solution per line
    pub file: Option<PathBuf>,
    /// Random sample size; 0 tests every eligible solution
    pub count: usize,
    /// Minimum frequency of sampled solutions
    pub solution_freq: f64,
    pub verbosity: u8,
    pub hard: bool,
    pub jobs: Option<usize>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            solutions: Vec::new(),
            file: None,
            count: 1,
            solution_freq: DEFAULT_SOLUTION_FREQ,
            verbosity: 0,
            hard: false,
            jobs: None,
        }
    }
}

/// Pick the solutions to test
///
/// Explicit solutions win over a solutions file. When neither yields a valid
/// word the selection falls back to a sample of `count` words from the
/// frequency-filtered list; problems with the file are reported on `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn select_solutions<W, G>(
    out: &mut W,
    list: &WordList,
    options: &TestOptions,
    rng: &mut G,
) -> Result<Vec<Word>>
where
    W: Write,
    G: Rng + ?Sized,
{
    let chosen: Vec<Word> = if !options.solutions.is_empty() {
        let words: Vec<Word> = options
            .solutions
            .iter()
            .filter_map(|text| match Word::new(text) {
                Ok(word) => Some(word),
                Err(err) => {
                    warn!(solution = %text, %err, "skipping solution");
                    None
                }
            })
            .collect();
        if words.is_empty() {
            writeln!(out, "No valid solutions given")?;
        }
        words
    } else if let Some(path) = &options.file {
        match load_solutions(path) {
            Ok(words) => {
                if words.is_empty() {
                    writeln!(out, "File has no valid solutions")?;
                }
                words
            }
            Err(err) => {
                warn!(%err, "cannot load solutions");
                writeln!(out, "Unable to read solutions file")?;
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    if !chosen.is_empty() {
        return Ok(chosen);
    }

    let eligible = list.with_min_frequency(options.solution_freq);
    if options.count > 0 && options.count < eligible.len() {
        Ok(eligible
            .choose_multiple(rng, options.count)
            .cloned()
            .collect())
    } else {
        Ok(eligible)
    }
}

fn progress_bar(len: usize, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")?
            .progress_chars("█▓▒░"),
    );
    Ok(bar)
}

/// Run test mode and print the summary
///
/// Guesses come from words in `list` with frequency at least `guess_freq`.
/// Returns `None` when no word is eligible as a solution.
///
/// # Errors
///
/// Returns an error if the worker pool cannot start or writing fails.
pub fn run_test<W, G>(
    out: &mut W,
    list: &WordList,
    guess_freq: f64,
    options: &TestOptions,
    rng: &mut G,
    show_progress: bool,
) -> Result<Option<BatchReport>>
where
    W: Write,
    G: Rng + ?Sized,
{
    print_header(out, "Wordle Solver Test Mode", options.hard)?;

    let solutions = select_solutions(out, list, options, rng)?;
    if solutions.is_empty() {
        return Ok(None);
    }

    let universe = list.with_min_frequency(guess_freq);
    info!(
        universe = universe.len(),
        solutions = solutions.len(),
        "starting test run"
    );

    let bar = progress_bar(solutions.len(), show_progress)?;
    bar.set_message("Solving");
    let batch = BatchOptions {
        hard: options.hard,
        jobs: options.jobs,
    };
    let report = run_batch(&universe, list.frequencies(), &solutions, batch, |done| {
        bar.set_position(done as u64);
    })?;
    bar.finish_with_message("Complete!");

    print_batch_report(out, &report, options.verbosity)?;
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::FrequencyOracle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::NamedTempFile;

    fn run(options: &TestOptions) -> (Option<BatchReport>, String) {
        let list = WordList::embedded();
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(11);
        let report = run_test(&mut out, &list, 1.17, options, &mut rng, false).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn explicit_solutions_skip_invalid() {
        let options = TestOptions {
            solutions: vec!["shake".into(), "X".into(), "ABOUT".into()],
            ..TestOptions::default()
        };
        let (report, out) = run(&options);
        let report = report.unwrap();

        assert_eq!(report.total(), 2);
        assert!(out.contains("Wordle Solver Test Mode"));
        assert!(out.contains("Words tested: 2"));
    }

    #[test]
    fn solutions_file_uses_first_five_letters() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "CRANES").unwrap();
        writeln!(file, "ab").unwrap();
        writeln!(file, "happy 3.9").unwrap();
        file.flush().unwrap();

        let options = TestOptions {
            file: Some(file.path().to_path_buf()),
            ..TestOptions::default()
        };
        let (report, _) = run(&options);
        let report = report.unwrap();

        assert_eq!(report.total(), 2);
        assert!(report.get(&Word::new("CRANE").unwrap()).is_some());
        assert!(report.get(&Word::new("HAPPY").unwrap()).is_some());
    }

    #[test]
    fn missing_file_falls_back_to_sample() {
        let options = TestOptions {
            file: Some(PathBuf::from("/nonexistent/solutions.txt")),
            ..TestOptions::default()
        };
        let (report, out) = run(&options);

        assert!(out.contains("Unable to read solutions file"));
        assert_eq!(report.unwrap().total(), 1);
    }

    #[test]
    fn file_without_solutions_falls_back_to_sample() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1234").unwrap();
        file.flush().unwrap();

        let options = TestOptions {
            file: Some(file.path().to_path_buf()),
            ..TestOptions::default()
        };
        let (report, out) = run(&options);

        assert!(out.contains("File has no valid solutions"));
        assert_eq!(report.unwrap().total(), 1);
    }

    #[test]
    fn invalid_explicit_solutions_fall_back_to_sample() {
        let list = WordList::embedded();
        let mut rng = StdRng::seed_from_u64(5);
        let mut out = Vec::<u8>::new();
        let options = TestOptions {
            solutions: vec!["X".into(), "toolong".into()],
            ..TestOptions::default()
        };

        let picked = select_solutions(&mut out, &list, &options, &mut rng).unwrap();
        assert_eq!(picked.len(), 1);
        assert!(list.frequencies().frequency(&picked[0]) >= DEFAULT_SOLUTION_FREQ);
        assert!(String::from_utf8(out).unwrap().contains("No valid solutions given"));
    }

    #[test]
    fn nothing_eligible_runs_nothing() {
        let options = TestOptions {
            solution_freq: 100.0,
            ..TestOptions::default()
        };
        let (report, out) = run(&options);

        assert!(report.is_none());
        assert!(!out.contains("Words tested"));
    }

    #[test]
    fn random_sample_has_requested_size() {
        let list = WordList::embedded();
        let mut rng = StdRng::seed_from_u64(3);
        let options = TestOptions {
            count: 4,
            ..TestOptions::default()
        };

        let picked = select_solutions(&mut Vec::<u8>::new(), &list, &options, &mut rng).unwrap();
        assert_eq!(picked.len(), 4);
        for word in &picked {
            assert!(list.frequencies().frequency(word) >= DEFAULT_SOLUTION_FREQ);
        }
    }

    #[test]
    fn zero_count_selects_every_eligible_solution() {
        let list = WordList::embedded();
        let mut rng = StdRng::seed_from_u64(3);
        let options = TestOptions {
            count: 0,
            solution_freq: 5.0,
            ..TestOptions::default()
        };

        let picked = select_solutions(&mut Vec::<u8>::new(), &list, &options, &mut rng).unwrap();
        assert_eq!(picked, list.with_min_frequency(5.0));
    }
}
