//! Wordle Solver
//!
//! Suggests the next Wordle guess by scoring words against letter frequency and
//! position statistics of the remaining candidates, with word frequency as a
//! tie-breaker.
//!
//! # Quick Start
//!
//! ```rust
//! use wordlesolve::core::{Outcome, Word};
//! use wordlesolve::rules::ConstraintStore;
//! use wordlesolve::scoring::score_words;
//! use wordlesolve::wordlists::WordList;
//!
//! let list = WordList::embedded();
//! let mut store = ConstraintStore::new();
//!
//! // Feedback for CRANE against the solution SHAKE
//! let guess = Word::new("crane").unwrap();
//! let outcome = Outcome::evaluate(&guess, &Word::new("shake").unwrap());
//! store.absorb(&guess, &outcome).unwrap();
//!
//! let candidates = store.filter(list.words());
//! let ranked = score_words(list.words(), &candidates, &store, list.frequencies());
//! println!("Best next guess: {}", ranked[0].word);
//! ```

// Core domain types
pub mod core;

// Letter rules learned from feedback
pub mod rules;

// Guess scoring
pub mod scoring;

// Solve cycle and batch evaluation
pub mod solver;

// Word lists
pub mod wordlists;

// Settings file
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
