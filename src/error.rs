//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! Configuration problems are reported when a setting is applied, never by
//! aborting the process, and a failing fitness callback surfaces as an error
//! from the operation that invoked it.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use realgen::error::{GeneticError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(GeneticError::Configuration(format!(
//!             "Mutation rate must be between 0.0 and 1.0, got {}",
//!             rate
//!         )));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use realgen::error::{GeneticError, OptionExt};
//!
//! fn lowest_score(scores: &[f64]) -> realgen::error::Result<f64> {
//!     scores
//!         .iter()
//!         .copied()
//!         .reduce(f64::min)
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(lowest_score(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! assert!(lowest_score(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running an evolution.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a strategy is part of the configuration
    /// vocabulary but has no operator behind it.
    #[error("Unsupported configuration: {0}")]
    UnsupportedStrategy(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the population has never been evaluated.
    #[error("Population is not initialized: call initialize_random or reevaluate_fitness first")]
    NotInitialized,

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for genetic algorithm operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
