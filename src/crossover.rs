//! # Crossover
//!
//! Crossover operators combine the genes of two parents into one offspring.
//! Only the operators listed in [`CrossoverOperator`] exist. The other
//! [`CrossoverKind`] variants are rejected when the configuration is built.
//!
//! ## Example
//!
//! ```rust
//! use realgen::crossover::{Crossover, FixedCutCrossover};
//! use realgen::rng::RandomNumberGenerator;
//!
//! let crossover = FixedCutCrossover::new(1, 2).unwrap();
//! let mut offspring = [0.0; 2];
//! crossover.cross(&[1.0, 1.0], &[2.0, 2.0], &mut offspring, &mut RandomNumberGenerator::new());
//!
//! assert_eq!(offspring, [1.0, 2.0]);
//! ```

use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::evolution::options::CrossoverKind;
use crate::rng::RandomSource;

/// Combines two parent gene vectors into an offspring gene vector.
///
/// All three slices have the same length.
pub trait Crossover: Debug {
    fn cross<R: RandomSource + ?Sized>(
        &self,
        first: &[f64],
        second: &[f64],
        offspring: &mut [f64],
        rng: &mut R,
    );
}

/// Takes each gene from either parent with probability one half, using one
/// uniform draw per gene.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformCrossover;

impl Crossover for UniformCrossover {
    fn cross<R: RandomSource + ?Sized>(
        &self,
        first: &[f64],
        second: &[f64],
        offspring: &mut [f64],
        rng: &mut R,
    ) {
        for (i, gene) in offspring.iter_mut().enumerate() {
            *gene = if rng.uniform_real() < 0.5 {
                first[i]
            } else {
                second[i]
            };
        }
    }
}

/// Takes genes `[0, cut)` from the first parent and the rest from the second.
/// Consumes no random draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCutCrossover {
    cut: usize,
}

impl FixedCutCrossover {
    /// # Errors
    ///
    /// Returns a `Configuration` error unless `cut < dimensions`.
    pub fn new(cut: usize, dimensions: usize) -> Result<Self> {
        if cut >= dimensions {
            return Err(GeneticError::Configuration(format!(
                "Fixed crossover index must be between 0 and {} (exclusive), got {}",
                dimensions, cut
            )));
        }
        Ok(Self { cut })
    }

    pub fn cut(&self) -> usize {
        self.cut
    }
}

impl Crossover for FixedCutCrossover {
    fn cross<R: RandomSource + ?Sized>(
        &self,
        first: &[f64],
        second: &[f64],
        offspring: &mut [f64],
        _rng: &mut R,
    ) {
        let cut = self.cut.min(offspring.len());
        offspring[..cut].copy_from_slice(&first[..cut]);
        offspring[cut..].copy_from_slice(&second[cut..]);
    }
}

/// The crossover operators that have an implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossoverOperator {
    Uniform(UniformCrossover),
    FixedCut(FixedCutCrossover),
}

impl CrossoverOperator {
    /// Resolves a configured crossover kind into its operator.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedStrategy` for single-point and two-point crossover,
    /// and `Configuration` for an out-of-range fixed cut.
    pub fn from_kind(kind: &CrossoverKind, dimensions: usize) -> Result<Self> {
        match *kind {
            CrossoverKind::Uniform => Ok(CrossoverOperator::Uniform(UniformCrossover)),
            CrossoverKind::FixedCut { cut } => Ok(CrossoverOperator::FixedCut(
                FixedCutCrossover::new(cut, dimensions)?,
            )),
            CrossoverKind::SinglePoint => Err(GeneticError::UnsupportedStrategy(
                "single-point crossover has no implementation".to_string(),
            )),
            CrossoverKind::TwoPoint => Err(GeneticError::UnsupportedStrategy(
                "two-point crossover has no implementation".to_string(),
            )),
        }
    }
}

impl Crossover for CrossoverOperator {
    fn cross<R: RandomSource + ?Sized>(
        &self,
        first: &[f64],
        second: &[f64],
        offspring: &mut [f64],
        rng: &mut R,
    ) {
        match self {
            CrossoverOperator::Uniform(op) => op.cross(first, second, offspring, rng),
            CrossoverOperator::FixedCut(op) => op.cross(first, second, offspring, rng),
        }
    }
}
