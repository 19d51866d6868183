//! Configuration file support
//!
//! Settings are read from `wordlesolve.toml` in the working directory, or from
//! a file given with `--config`. Command-line flags override file values.
//!
//! ```
//! use wordlesolve::config::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//!     guess_freq = 2.0
//!     hard = true
//! "#).unwrap();
//!
//! assert!(settings.hard);
//! assert!((settings.solution_freq - 3.2).abs() < f64::EPSILON);
//! ```

use crate::wordlists::{DEFAULT_GUESS_FREQ, DEFAULT_SOLUTION_FREQ};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "wordlesolve.toml";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// User settings shared by all modes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Minimum frequency of words used as guesses
    pub guess_freq: f64,
    /// Minimum frequency of words picked as solutions
    pub solution_freq: f64,
    pub hard: bool,
    /// Seed for solution picking; random when absent
    pub seed: Option<u64>,
    /// Worker threads for test mode; one per CPU when absent
    pub jobs: Option<usize>,
    /// Word list file replacing the built-in universe
    pub words: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            guess_freq: DEFAULT_GUESS_FREQ,
            solution_freq: DEFAULT_SOLUTION_FREQ,
            hard: false,
            seed: None,
            jobs: None,
            words: None,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid TOML, or holds
    /// invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error on invalid TOML, unknown keys, or invalid values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from an explicit file, else the default file if present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit file is missing, or any file found is invalid.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading settings");
            return Self::load(path);
        }

        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            debug!(path = %default.display(), "loading settings");
            Self::load(default)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("guess_freq", self.guess_freq),
            ("solution_freq", self.solution_freq),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.jobs == Some(0) {
            return Err(ConfigError::Invalid("jobs must be at least 1".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!((settings.guess_freq - 1.17).abs() < f64::EPSILON);
        assert!((settings.solution_freq - 3.2).abs() < f64::EPSILON);
        assert!(!settings.hard);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.jobs, None);
        assert_eq!(settings.words, None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str("seed = 42\njobs = 4\n").unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.jobs, Some(4));
        assert!((settings.guess_freq - 1.17).abs() < f64::EPSILON);
    }

    #[test]
    fn full_toml() {
        let toml = r#"
            guess_freq = 2.5
            solution_freq = 4.0
            hard = true
            seed = 7
            jobs = 2
            words = "data/words.txt"
        "#;
        let settings = Settings::from_toml_str(toml).unwrap();
        assert!(settings.hard);
        assert_eq!(settings.words, Some(PathBuf::from("data/words.txt")));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = Settings::from_toml_str("colour = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn invalid_values_rejected() {
        let err = Settings::from_toml_str("guess_freq = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::from_toml_str("jobs = 0\n").unwrap_err();
        assert!(err.to_string().contains("jobs"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hard = true").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.hard);
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::discover(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn missing_file_load_falls_back_with_unwrap_or_default() {
        let settings = Settings::load("does-not-exist.toml").unwrap_or_default();
        assert_eq!(settings, Settings::default());
    }
}
