//! Command implementations

pub mod console;
pub mod play;
pub mod solve;
pub mod test_all;

pub use console::Console;
pub use play::run_play;
pub use solve::run_solve;
pub use test_all::{TestOptions, run_test, select_solutions};
