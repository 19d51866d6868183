//! Line-based console input
//!
//! Prompts are re-asked until the input is valid. Generic over the reader and
//! writer so sessions can be scripted.

use crate::core::{Outcome, Word};
use crate::solver::CycleError;
use std::io::{self, BufRead, Write};

/// Width prompts are padded to in solve mode
pub const PROMPT_WIDTH: usize = 13;

/// Prompting reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's stdin and stdout
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for regular output
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the console, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line
    ///
    /// # Errors
    /// Returns `CycleError::InputClosed` at end of input, `CycleError::Io` on
    /// read or write failure.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, CycleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CycleError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Read a five-letter word
    ///
    /// # Errors
    /// Returns a `CycleError` if input ends or fails.
    pub fn guess(&mut self, width: usize) -> Result<Word, CycleError> {
        loop {
            let line = self.read_line(&format!("{:<width$}", "Your guess: "))?;
            match Word::new(&line) {
                Ok(word) => return Ok(word),
                Err(_) => writeln!(self.output, "Please enter a five-letter word.")?,
            }
        }
    }

    /// Read an outcome string of five `0`/`1`/`2` digits
    ///
    /// # Errors
    /// Returns a `CycleError` if input ends or fails.
    pub fn outcome(&mut self, width: usize) -> Result<Outcome, CycleError> {
        loop {
            let line = self.read_line(&format!("{:<width$}", "Outcome:"))?;
            match line.parse() {
                Ok(outcome) => return Ok(outcome),
                Err(_) => writeln!(self.output, "2 = green | 1 = yellow | 0 = grey")?,
            }
        }
    }

    /// Ask a Y/N question
    ///
    /// # Errors
    /// Returns a `CycleError` if input ends or fails.
    pub fn yes_no(&mut self, prompt: &str) -> Result<bool, CycleError> {
        loop {
            match self.read_line(prompt)?.as_str() {
                "Y" | "y" => return Ok(true),
                "N" | "n" => return Ok(false),
                _ => {}
            }
        }
    }
}
