//! Puzzle solving
//!
//! A `SolveCycle` plays one puzzle; `run_batch` plays many in parallel.

mod batch;
mod cycle;

pub use batch::{BatchError, BatchOptions, BatchReport, TaskFailure, TaskResult, run_batch};
pub use cycle::{
    AutoDriver, CycleError, CyclePhase, CycleReport, CycleStatus, REPORT_TOP, RoundDriver,
    RoundReport, SolveCycle, run_solve_cycle,
};
