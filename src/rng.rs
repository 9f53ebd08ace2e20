//! # Random Source
//!
//! Every stochastic operator in the crate draws from a single `RandomSource`
//! that the engine owns. The sequence of draws is fully determined by the
//! sequence of operator calls, so two engines built with the same seed replay
//! the same trajectory.
//!
//! ## Example
//!
//! ```rust
//! use realgen::rng::{RandomNumberGenerator, RandomSource};
//!
//! let mut first = RandomNumberGenerator::from_seed(7);
//! let mut second = RandomNumberGenerator::from_seed(7);
//!
//! for _ in 0..5 {
//!     let value = first.uniform_real();
//!     assert!((0.0..1.0).contains(&value));
//!     assert_eq!(value, second.uniform_real());
//! }
//!
//! let index = first.uniform_index(10);
//! assert!(index < 10);
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A source of the random draws consumed by selection, crossover and mutation.
///
/// Implement this trait to substitute a deterministic or instrumented
/// sequence for the default `RandomNumberGenerator`.
pub trait RandomSource {
    /// Returns a uniform real in `[0, 1)`.
    fn uniform_real(&mut self) -> f64;

    /// Returns a uniform index in `[0, n)`. `n` must be positive.
    fn uniform_index(&mut self, n: usize) -> usize;

    /// Returns a draw from the standard normal distribution.
    fn standard_normal(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_real(&mut self) -> f64 {
        (**self).uniform_real()
    }

    fn uniform_index(&mut self, n: usize) -> usize {
        (**self).uniform_index(n)
    }

    fn standard_normal(&mut self) -> f64 {
        (**self).standard_normal()
    }
}

/// A wrapper around the `rand` crate's `StdRng` implementing `RandomSource`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RandomNumberGenerator {
    fn uniform_real(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn uniform_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "uniform_index requires a non-empty range");
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// A random source that replays scripted draws, used to pin draw order in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRandom {
    reals: std::collections::VecDeque<f64>,
    indices: std::collections::VecDeque<usize>,
    normals: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_reals(mut self, reals: &[f64]) -> Self {
        self.reals.extend(reals.iter().copied());
        self
    }

    pub(crate) fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices.iter().copied());
        self
    }

    pub(crate) fn with_normals(mut self, normals: &[f64]) -> Self {
        self.normals.extend(normals.iter().copied());
        self
    }

    /// True once every scripted draw has been consumed.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.reals.is_empty() && self.indices.is_empty() && self.normals.is_empty()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform_real(&mut self) -> f64 {
        self.reals.pop_front().expect("scripted uniform reals exhausted")
    }

    fn uniform_index(&mut self, n: usize) -> usize {
        let index = self
            .indices
            .pop_front()
            .expect("scripted uniform indices exhausted");
        assert!(index < n, "scripted index {} out of range {}", index, n);
        index
    }

    fn standard_normal(&mut self) -> f64 {
        self.normals.pop_front().expect("scripted normals exhausted")
    }
}
