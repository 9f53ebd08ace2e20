//! # Bounds
//!
//! The per-dimension search interval. The engine owns a single `Bounds`
//! value and lends it to every genotype operator, so the limits are never
//! duplicated per individual.

use crate::error::{GeneticError, Result};

/// Lower and upper limits for each dimension of the search space.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates a new `Bounds` from matching lower and upper limit vectors.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the vectors are empty, have
    /// different lengths, contain non-finite values, or if any
    /// `lower[j] > upper[j]`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.is_empty() {
            return Err(GeneticError::Configuration(
                "Bounds must cover at least one dimension".to_string(),
            ));
        }

        if lower.len() != upper.len() {
            return Err(GeneticError::Configuration(format!(
                "Lower bounds length ({}) doesn't match upper bounds length ({})",
                lower.len(),
                upper.len()
            )));
        }

        for (j, (lo, hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(GeneticError::Configuration(format!(
                    "Bounds of dimension {} must be finite, got [{}, {}]",
                    j, lo, hi
                )));
            }
            if lo > hi {
                return Err(GeneticError::Configuration(format!(
                    "Lower bound {} exceeds upper bound {} in dimension {}",
                    lo, hi, j
                )));
            }
        }

        Ok(Self { lower, upper })
    }

    /// Creates bounds with the same interval in each of `dimensions` dimensions.
    pub fn uniform(dimensions: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(vec![lower; dimensions], vec![upper; dimensions])
    }

    /// The number of dimensions (genes per genotype).
    pub fn dimensions(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// The width `upper[dim] - lower[dim]` of one dimension.
    pub fn range(&self, dim: usize) -> f64 {
        self.upper[dim] - self.lower[dim]
    }

    /// Clamps `value` into the interval of dimension `dim`.
    pub fn clamp(&self, dim: usize, value: f64) -> f64 {
        value.max(self.lower[dim]).min(self.upper[dim])
    }

    /// True if `value` lies inside the closed interval of dimension `dim`.
    pub fn contains(&self, dim: usize, value: f64) -> bool {
        value >= self.lower[dim] && value <= self.upper[dim]
    }
}
