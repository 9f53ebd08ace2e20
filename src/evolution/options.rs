//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the configuration of an evolution:
//! which selection, crossover and mutation strategies to use, how much of the
//! population survives unchanged, and how much the engine logs.
//!
//! ## Example
//!
//! ```rust
//! use realgen::evolution::options::{
//!     CrossoverKind, EvolutionOptions, LogLevel, MutationKind, SelectionKind,
//! };
//!
//! let options = EvolutionOptions::builder()
//!     .selection(SelectionKind::Tournament { size: 3 })
//!     .elitism_fraction(0.2)
//!     .crossover(CrossoverKind::FixedCut { cut: 1 })
//!     .mutation(MutationKind::Uniform { fraction: 0.05 })
//!     .mutation_rate(0.2)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate(10, 2).is_ok());
//!
//! // Default parameters
//! let default_options = EvolutionOptions::default();
//! assert!(default_options.validate(10, 2).is_ok());
//! ```
//!
//! ## Validation
//!
//! Options are plain data. [`EvolutionOptions::validate`] checks them against
//! a population size and a dimensionality and reports the first problem as a
//! [`GeneticError`]; the engine calls it whenever options are applied.

use std::fmt;

use crate::crossover::CrossoverOperator;
use crate::error::{GeneticError, Result};
use crate::mutation::{GaussianMutation, UniformMutation};
use crate::selection::TournamentSelection;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    None,
}

/// Parent selection strategy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Fitness-proportionate selection on the inverted scores. Requires sorting.
    RouletteWheel,
    /// Best of `size` uniformly drawn individuals.
    Tournament { size: usize },
}

/// Crossover strategy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverKind {
    Uniform,
    /// Genes before `cut` from the first parent, the rest from the second.
    FixedCut { cut: usize },
    /// Not implemented; rejected by validation.
    SinglePoint,
    /// Not implemented; rejected by validation.
    TwoPoint,
}

/// Mutation strategy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationKind {
    /// Uniform local step within `fraction` of each dimension's width.
    Uniform { fraction: f64 },
    /// Gaussian local step with adaptive, decaying σ.
    Gaussian { initial_scale: f64, shrink_rate: f64 },
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::RouletteWheel => write!(f, "roulette wheel"),
            SelectionKind::Tournament { size } => write!(f, "tournament (size {})", size),
        }
    }
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverKind::Uniform => write!(f, "uniform"),
            CrossoverKind::FixedCut { cut } => write!(f, "fixed cut (index {})", cut),
            CrossoverKind::SinglePoint => write!(f, "single point"),
            CrossoverKind::TwoPoint => write!(f, "two point"),
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Uniform { fraction } => write!(f, "uniform (fraction {})", fraction),
            MutationKind::Gaussian {
                initial_scale,
                shrink_rate,
            } => write!(
                f,
                "gaussian (scale {}, shrink {})",
                initial_scale, shrink_rate
            ),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    selection: SelectionKind,
    /// Fraction of the population copied unchanged when sorting is enabled.
    elitism_fraction: f64,
    sorting: bool,
    crossover: CrossoverKind,
    mutation: MutationKind,
    /// Per-gene mutation probability.
    mutation_rate: f64,
    log_level: LogLevel,
}

impl EvolutionOptions {
    pub fn new(
        selection: SelectionKind,
        elitism_fraction: f64,
        sorting: bool,
        crossover: CrossoverKind,
        mutation: MutationKind,
        mutation_rate: f64,
    ) -> Self {
        Self {
            selection,
            elitism_fraction,
            sorting,
            crossover,
            mutation,
            mutation_rate,
            log_level: LogLevel::None,
        }
    }

    pub fn get_selection(&self) -> SelectionKind {
        self.selection
    }

    pub fn get_elitism_fraction(&self) -> f64 {
        self.elitism_fraction
    }

    pub fn is_sorting(&self) -> bool {
        self.sorting
    }

    pub fn get_crossover(&self) -> CrossoverKind {
        self.crossover
    }

    pub fn get_mutation(&self) -> MutationKind {
        self.mutation
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    /// Sets the selection strategy.
    pub fn set_selection(&mut self, selection: SelectionKind) {
        self.selection = selection;
    }

    /// Sets the elitism fraction.
    pub fn set_elitism_fraction(&mut self, elitism_fraction: f64) {
        self.elitism_fraction = elitism_fraction;
    }

    /// Enables or disables population sorting.
    pub fn set_sorting(&mut self, sorting: bool) {
        self.sorting = sorting;
    }

    /// Sets the crossover strategy.
    pub fn set_crossover(&mut self, crossover: CrossoverKind) {
        self.crossover = crossover;
    }

    /// Sets the mutation strategy.
    pub fn set_mutation(&mut self, mutation: MutationKind) {
        self.mutation = mutation;
    }

    /// Sets the mutation rate.
    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Number of individuals copied unchanged into the next generation.
    ///
    /// With sorting this is `floor(elitism_fraction * population_size)`.
    /// Without sorting only the single best individual is carried over.
    pub fn elite_count(&self, population_size: usize) -> usize {
        if self.sorting {
            let count = (self.elitism_fraction * population_size as f64).floor() as usize;
            count.min(population_size)
        } else {
            1.min(population_size)
        }
    }

    /// Checks the options against a population of `population_size`
    /// genotypes with `dimensions` genes each.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for any out-of-range setting, for roulette
    /// wheel selection without sorting, and for a zero population size.
    /// Returns `UnsupportedStrategy` for single-point or two-point crossover.
    pub fn validate(&self, population_size: usize, dimensions: usize) -> Result<()> {
        if population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        match self.selection {
            SelectionKind::RouletteWheel => {
                if !self.sorting {
                    return Err(GeneticError::Configuration(
                        "Roulette wheel selection requires population sorting".to_string(),
                    ));
                }
            }
            SelectionKind::Tournament { size } => {
                TournamentSelection::new(size, population_size)?;
            }
        }

        check_unit_interval("Elitism fraction", self.elitism_fraction)?;

        CrossoverOperator::from_kind(&self.crossover, dimensions)?;

        match self.mutation {
            MutationKind::Uniform { fraction } => {
                UniformMutation::new(fraction)?;
            }
            MutationKind::Gaussian {
                initial_scale,
                shrink_rate,
            } => GaussianMutation::check_parameters(initial_scale, shrink_rate)?,
        }

        check_unit_interval("Mutation rate", self.mutation_rate)
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

/// Checks that a probability-like setting lies in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneticError::Configuration(format!(
            "{} must be a number between 0.0 and 1.0, got {}",
            name, value
        )))
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            selection: SelectionKind::Tournament { size: 2 },
            elitism_fraction: 0.25,
            sorting: true,
            crossover: CrossoverKind::Uniform,
            mutation: MutationKind::Gaussian {
                initial_scale: 0.1,
                shrink_rate: 1.0,
            },
            mutation_rate: 0.1,
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    selection: Option<SelectionKind>,
    elitism_fraction: Option<f64>,
    sorting: Option<bool>,
    crossover: Option<CrossoverKind>,
    mutation: Option<MutationKind>,
    mutation_rate: Option<f64>,
    log_level: Option<LogLevel>,
}

impl EvolutionOptionsBuilder {
    pub fn selection(mut self, value: SelectionKind) -> Self {
        self.selection = Some(value);
        self
    }

    pub fn elitism_fraction(mut self, value: f64) -> Self {
        self.elitism_fraction = Some(value);
        self
    }

    pub fn sorting(mut self, value: bool) -> Self {
        self.sorting = Some(value);
        self
    }

    pub fn crossover(mut self, value: CrossoverKind) -> Self {
        self.crossover = Some(value);
        self
    }

    pub fn mutation(mut self, value: MutationKind) -> Self {
        self.mutation = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            selection: self.selection.unwrap_or(defaults.selection),
            elitism_fraction: self.elitism_fraction.unwrap_or(defaults.elitism_fraction),
            sorting: self.sorting.unwrap_or(defaults.sorting),
            crossover: self.crossover.unwrap_or(defaults.crossover),
            mutation: self.mutation.unwrap_or(defaults.mutation),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}
