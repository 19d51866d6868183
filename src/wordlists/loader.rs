//! Word list loading utilities
//!
//! Provides functions to load word lists from files or use embedded constants.

use crate::core::{WORD_LEN, Word};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error type for word list files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: invalid frequency '{value}'")]
    BadFrequency { line: usize, value: String },
    #[error("{} contains no valid words", path.display())]
    Empty { path: PathBuf },
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `WORD [FREQUENCY]` lines
///
/// Blank lines and lines starting with `#` are ignored. Invalid words are
/// skipped; a missing frequency counts as 0.0.
///
/// # Errors
///
/// Returns `LoadError::BadFrequency` if a frequency is present but not a number.
pub fn parse_entries(content: &str) -> Result<Vec<(Word, f64)>, LoadError> {
    let mut entries = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let Some(text) = fields.next() else { continue };
        let frequency = match fields.next() {
            Some(value) => value.parse().map_err(|_| LoadError::BadFrequency {
                line: index + 1,
                value: value.to_string(),
            })?,
            None => 0.0,
        };

        match Word::new(text) {
            Ok(word) => entries.push((word, frequency)),
            Err(err) => debug!(line = index + 1, word = text, error = %err, "skipping invalid word"),
        }
    }

    Ok(entries)
}

/// Load a word universe with frequencies from a file
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be read, a frequency is malformed,
/// or no valid word remains.
///
/// # Examples
/// ```no_run
/// use wordlesolve::wordlists::loader::load_from_file;
///
/// let entries = load_from_file("data/words.txt").unwrap();
/// println!("Loaded {} words", entries.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<(Word, f64)>, LoadError> {
    let path = path.as_ref();
    let entries = parse_entries(&read(path)?)?;

    if entries.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(entries)
}

/// Load a list of solutions, one per line
///
/// Only the first five characters of each line are used; lines that do not
/// form a valid word are skipped.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read.
pub fn load_solutions<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, LoadError> {
    let content = read(path.as_ref())?;

    let words = content
        .lines()
        .filter_map(|line| {
            let prefix: String = line.trim().chars().take(WORD_LEN).collect();
            Word::new(prefix).ok()
        })
        .collect();

    Ok(words)
}

/// Convert strings to words, skipping invalid entries
///
/// # Examples
/// ```
/// use wordlesolve::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["crane", "toolong", "slate"]);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice<S: AsRef<str>>(slice: &[S]) -> Vec<Word> {
    slice.iter().filter_map(|s| Word::new(s).ok()).collect()
}
