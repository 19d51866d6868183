//! Batch harness: many automated solve cycles on a worker pool
//!
//! Round-one scores are identical for every solution, so they are computed
//! once and shared. Each task owns its own constraint store; the universe and
//! frequencies are shared read-only.

use super::cycle::{AutoDriver, CycleError, CycleReport, SolveCycle};
use crate::core::{MAX_ROUNDS, Word};
use crate::rules::ConstraintStore;
use crate::scoring::score_words;
use crate::wordlists::FrequencyOracle;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Batch run settings
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub hard: bool,
    /// Worker threads; `None` uses one per CPU
    pub jobs: Option<usize>,
}

/// Error type for starting a batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to start worker pool")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// A solve task that did not produce a report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("solving {solution} failed: {message}")]
pub struct TaskFailure {
    pub solution: Word,
    pub message: String,
}

/// Outcome of one solution's task
pub type TaskResult = Result<CycleReport, TaskFailure>;

/// Aggregated results of a batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Per-solution results in submission order
    pub results: Vec<(Word, TaskResult)>,
    /// `solved_by_round[i]` = solutions solved in `i + 1` guesses
    pub solved_by_round: [usize; MAX_ROUNDS],
    pub unsolved: usize,
    pub failed: usize,
    pub elapsed: Duration,
    pub hard: bool,
}

impl BatchReport {
    /// Number of distinct solutions tested
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn solved(&self) -> usize {
        self.solved_by_round.iter().sum()
    }

    /// Result for a single solution
    #[must_use]
    pub fn get(&self, solution: &Word) -> Option<&TaskResult> {
        self.results
            .iter()
            .find(|(word, _)| word == solution)
            .map(|(_, result)| result)
    }

    /// Solutions not solved within the round limit, submission order
    pub fn unsolved_words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.results
            .iter()
            .filter(|(_, result)| matches!(result, Ok(report) if report.solved_in().is_none()))
            .map(|(word, _)| word)
    }

    /// Mean number of guesses over solved solutions
    #[must_use]
    pub fn average_guesses(&self) -> Option<f64> {
        let solved = self.solved();
        if solved == 0 {
            return None;
        }
        let guesses: usize = self
            .solved_by_round
            .iter()
            .enumerate()
            .map(|(i, &count)| (i + 1) * count)
            .sum();
        Some(guesses as f64 / solved as f64)
    }

    fn tally(results: Vec<(Word, TaskResult)>, elapsed: Duration, hard: bool) -> Self {
        let mut report = Self {
            results: Vec::new(),
            solved_by_round: [0; MAX_ROUNDS],
            unsolved: 0,
            failed: 0,
            elapsed,
            hard,
        };

        for (_, result) in &results {
            match result {
                Ok(cycle) => match cycle.solved_in() {
                    Some(rounds) => report.solved_by_round[rounds - 1] += 1,
                    None => report.unsolved += 1,
                },
                Err(_) => report.failed += 1,
            }
        }

        report.results = results;
        report
    }
}

/// Drop repeated solutions, keeping the first occurrence
fn dedup(solutions: &[Word]) -> Vec<&Word> {
    let mut seen = FxHashSet::default();
    solutions.iter().filter(|w| seen.insert(*w)).collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}

/// Run `task` for every solution on a dedicated pool
///
/// A task that errors or panics becomes a `TaskFailure` for its solution only.
fn run_tasks<T, P>(
    solutions: &[Word],
    options: BatchOptions,
    progress: P,
    task: T,
) -> Result<BatchReport, BatchError>
where
    T: Fn(&Word) -> Result<CycleReport, CycleError> + Sync,
    P: Fn(usize) + Sync,
{
    let start = Instant::now();
    let solutions = dedup(solutions);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.unwrap_or(0))
        .build()?;

    info!(
        solutions = solutions.len(),
        hard = options.hard,
        threads = pool.current_num_threads(),
        "starting batch"
    );

    let completed = AtomicUsize::new(0);
    let results: Vec<(Word, TaskResult)> = pool.install(|| {
        solutions
            .par_iter()
            .map(|&solution| {
                let result = match panic::catch_unwind(AssertUnwindSafe(|| task(solution))) {
                    Ok(Ok(report)) => Ok(report),
                    Ok(Err(err)) => Err(err.to_string()),
                    Err(payload) => Err(panic_message(payload.as_ref())),
                }
                .map_err(|message| {
                    warn!(solution = %solution, %message, "solve task failed");
                    TaskFailure {
                        solution: solution.clone(),
                        message,
                    }
                });

                progress(completed.fetch_add(1, Ordering::Relaxed) + 1);
                (solution.clone(), result)
            })
            .collect()
    });

    let report = BatchReport::tally(results, start.elapsed(), options.hard);
    info!(
        total = report.total(),
        solved = report.solved(),
        unsolved = report.unsolved,
        failed = report.failed,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "batch complete"
    );

    Ok(report)
}

/// Solve every solution automatically and aggregate the results
///
/// `progress` is called from worker threads with the number of completed
/// solutions so far.
///
/// # Errors
/// Returns `BatchError::Pool` if the worker pool cannot be created.
pub fn run_batch<O, P>(
    universe: &[Word],
    oracle: &O,
    solutions: &[Word],
    options: BatchOptions,
    progress: P,
) -> Result<BatchReport, BatchError>
where
    O: FrequencyOracle + Sync + ?Sized,
    P: Fn(usize) + Sync,
{
    let everything: Vec<&Word> = universe.iter().collect();
    let opening = score_words(universe, &everything, &ConstraintStore::new(), oracle);

    run_tasks(solutions, options, progress, |solution| {
        SolveCycle::new(universe, oracle, options.hard)
            .with_opening(&opening)
            .with_endgame()
            .run(&mut AutoDriver::new(solution.clone()))
    })
}
