//! # Mutation
//!
//! Mutation operators perturb an offspring's genes in place. Each gene is
//! mutated independently with probability equal to the mutation rate, decided
//! by one uniform draw per gene.
//!
//! Gaussian mutation keeps one adaptive step size (σ) per dimension. Every
//! time a dimension is mutated its σ decays by `1 - shrink_rate * g / G`,
//! where `g` is the current generation and `G` the generation budget. A σ
//! that drops below [`SIGMA_FLOOR`] is reset to [`SIGMA_RESET`] instead of
//! shrinking further.

use std::fmt::Debug;

use crate::bounds::Bounds;
use crate::error::{GeneticError, Result};
use crate::evolution::options::MutationKind;
use crate::genotype::Genotype;
use crate::rng::RandomSource;

/// Step sizes below this value are re-inflated.
pub const SIGMA_FLOOR: f64 = 1e-5;

/// The step size a collapsed σ is reset to.
pub const SIGMA_RESET: f64 = 1e-1;

/// Per-generation inputs shared by all mutation operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationSchedule {
    /// Per-gene probability of applying the operator.
    pub rate: f64,
    pub generation: usize,
    pub max_generations: usize,
}

/// Perturbs an offspring in place.
pub trait Mutation: Debug {
    fn mutate<R: RandomSource + ?Sized>(
        &mut self,
        genotype: &mut Genotype,
        bounds: &Bounds,
        schedule: &MutationSchedule,
        rng: &mut R,
    );
}

/// Bounded random walk: a mutated gene moves uniformly within `fraction` of
/// its dimension's width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformMutation {
    fraction: f64,
}

impl UniformMutation {
    /// # Errors
    ///
    /// Returns a `Configuration` error unless `0 <= fraction <= 1`.
    pub fn new(fraction: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(GeneticError::Configuration(format!(
                "Uniform mutation fraction must be between 0.0 and 1.0, got {}",
                fraction
            )));
        }
        Ok(Self { fraction })
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

impl Mutation for UniformMutation {
    fn mutate<R: RandomSource + ?Sized>(
        &mut self,
        genotype: &mut Genotype,
        bounds: &Bounds,
        schedule: &MutationSchedule,
        rng: &mut R,
    ) {
        for dim in 0..genotype.dimensions() {
            if rng.uniform_real() < schedule.rate {
                genotype.perturb_uniform_local(dim, self.fraction, bounds, rng);
            }
        }
    }
}

/// Gaussian local mutation with a decaying per-dimension step size.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMutation {
    initial_scale: f64,
    shrink_rate: f64,
    sigma: Vec<f64>,
}

impl GaussianMutation {
    /// Creates the operator with σ initialised to `initial_scale` times each
    /// dimension's width.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if either parameter is negative or
    /// not finite.
    pub fn new(initial_scale: f64, shrink_rate: f64, bounds: &Bounds) -> Result<Self> {
        Self::check_parameters(initial_scale, shrink_rate)?;

        let mut mutation = Self {
            initial_scale,
            shrink_rate,
            sigma: Vec::with_capacity(bounds.dimensions()),
        };
        mutation.reset(bounds);
        Ok(mutation)
    }

    /// Checks the parameters without building any state.
    pub fn check_parameters(initial_scale: f64, shrink_rate: f64) -> Result<()> {
        if !initial_scale.is_finite() || initial_scale < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Gaussian mutation scale must be a non-negative number, got {}",
                initial_scale
            )));
        }
        if !shrink_rate.is_finite() || shrink_rate < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Gaussian mutation shrink rate must be a non-negative number, got {}",
                shrink_rate
            )));
        }
        Ok(())
    }

    /// Restores every σ to `initial_scale * (upper - lower)`.
    pub fn reset(&mut self, bounds: &Bounds) {
        let scale = self.initial_scale;
        self.sigma.clear();
        self.sigma
            .extend((0..bounds.dimensions()).map(|dim| scale * bounds.range(dim)));
    }

    pub fn sigma(&self) -> &[f64] {
        &self.sigma
    }

    pub fn initial_scale(&self) -> f64 {
        self.initial_scale
    }

    pub fn shrink_rate(&self) -> f64 {
        self.shrink_rate
    }

    /// Applies one decay step to dimension `dim` and returns the new σ.
    fn decay(&mut self, dim: usize, schedule: &MutationSchedule) -> f64 {
        let progress = schedule.generation as f64 / schedule.max_generations.max(1) as f64;
        let mut sigma = self.sigma[dim] * (1.0 - self.shrink_rate * progress);
        if sigma < SIGMA_FLOOR {
            sigma = SIGMA_RESET;
        }
        self.sigma[dim] = sigma;
        sigma
    }
}

impl Mutation for GaussianMutation {
    fn mutate<R: RandomSource + ?Sized>(
        &mut self,
        genotype: &mut Genotype,
        bounds: &Bounds,
        schedule: &MutationSchedule,
        rng: &mut R,
    ) {
        for dim in 0..genotype.dimensions() {
            if rng.uniform_real() < schedule.rate {
                let sigma = self.decay(dim, schedule);
                genotype.perturb_gaussian_local(dim, sigma, bounds, rng);
            }
        }
    }
}

/// The mutation operator configured for an engine, with its state.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOperator {
    Uniform(UniformMutation),
    Gaussian(GaussianMutation),
}

impl MutationOperator {
    /// Resolves a configured mutation kind into a fresh operator.
    pub fn from_kind(kind: &MutationKind, bounds: &Bounds) -> Result<Self> {
        match *kind {
            MutationKind::Uniform { fraction } => {
                Ok(MutationOperator::Uniform(UniformMutation::new(fraction)?))
            }
            MutationKind::Gaussian {
                initial_scale,
                shrink_rate,
            } => Ok(MutationOperator::Gaussian(GaussianMutation::new(
                initial_scale,
                shrink_rate,
                bounds,
            )?)),
        }
    }

    /// The current adaptive step sizes, if this is a Gaussian operator.
    pub fn sigma(&self) -> Option<&[f64]> {
        match self {
            MutationOperator::Uniform(_) => None,
            MutationOperator::Gaussian(op) => Some(op.sigma()),
        }
    }

    /// Returns operator state to its initial values.
    pub fn reset(&mut self, bounds: &Bounds) {
        if let MutationOperator::Gaussian(op) = self {
            op.reset(bounds);
        }
    }
}

impl Mutation for MutationOperator {
    fn mutate<R: RandomSource + ?Sized>(
        &mut self,
        genotype: &mut Genotype,
        bounds: &Bounds,
        schedule: &MutationSchedule,
        rng: &mut R,
    ) {
        match self {
            MutationOperator::Uniform(op) => op.mutate(genotype, bounds, schedule, rng),
            MutationOperator::Gaussian(op) => op.mutate(genotype, bounds, schedule, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RandomNumberGenerator, ScriptedRandom};

    fn bounds() -> Bounds {
        Bounds::new(vec![-5.0, 0.0], vec![5.0, 1.0]).unwrap()
    }

    fn schedule(rate: f64, generation: usize) -> MutationSchedule {
        MutationSchedule {
            rate,
            generation,
            max_generations: 100,
        }
    }

    #[test]
    fn test_uniform_fraction_validation() {
        assert!(UniformMutation::new(-0.1).is_err());
        assert!(UniformMutation::new(1.1).is_err());
        assert!(UniformMutation::new(f64::NAN).is_err());
        assert_eq!(UniformMutation::new(0.2).unwrap().fraction(), 0.2);
    }

    #[test]
    fn test_uniform_mutation_draw_order() {
        let bounds = bounds();
        let mut op = UniformMutation::new(0.1).unwrap();
        let mut genotype = Genotype::from_genes(vec![0.0, 0.5]);

        // Gene 0: gate 0.05 < 0.5 passes, step draw 0.75 -> +0.5 of a 1.0 radius
        // Gene 1: gate 0.7 fails, no step draw
        let mut rng = ScriptedRandom::new().with_reals(&[0.05, 0.75, 0.7]);
        op.mutate(&mut genotype, &bounds, &schedule(0.5, 0), &mut rng);

        assert!((genotype.genes()[0] - 0.5).abs() < 1e-12);
        assert_eq!(genotype.genes()[1], 0.5);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_gaussian_initial_sigma() {
        let op = GaussianMutation::new(0.1, 0.5, &bounds()).unwrap();
        assert_eq!(op.sigma(), &[1.0, 0.1]);
    }

    #[test]
    fn test_gaussian_parameter_validation() {
        assert!(GaussianMutation::new(-1.0, 0.5, &bounds()).is_err());
        assert!(GaussianMutation::new(0.1, f64::INFINITY, &bounds()).is_err());
    }

    #[test]
    fn test_gaussian_decay_and_perturb() {
        let bounds = bounds();
        let mut op = GaussianMutation::new(0.1, 0.5, &bounds).unwrap();
        let mut genotype = Genotype::from_genes(vec![0.0, 0.5]);

        // Generation 20 of 100 with shrink 0.5: factor 0.9
        let mut rng = ScriptedRandom::new()
            .with_reals(&[0.0, 0.99])
            .with_normals(&[2.0]);
        op.mutate(&mut genotype, &bounds, &schedule(0.5, 20), &mut rng);

        assert!((op.sigma()[0] - 0.9).abs() < 1e-12);
        // Dimension 1 was not mutated so its sigma is untouched
        assert_eq!(op.sigma()[1], 0.1);
        assert!((genotype.genes()[0] - 1.8).abs() < 1e-12);
        assert_eq!(genotype.genes()[1], 0.5);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_gaussian_sigma_floor_resets() {
        let bounds = bounds();
        // sigma[1] starts at 1e-5 * 1.0
        let mut op = GaussianMutation::new(1e-5, 0.5, &bounds).unwrap();
        let mut genotype = Genotype::from_genes(vec![0.0, 0.5]);

        let mut rng = ScriptedRandom::new()
            .with_reals(&[0.9, 0.0])
            .with_normals(&[1.0]);
        op.mutate(&mut genotype, &bounds, &schedule(0.5, 10), &mut rng);

        assert_eq!(op.sigma()[1], SIGMA_RESET);
        assert!((genotype.genes()[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_negative_factor_resets() {
        let bounds = bounds();
        let mut op = GaussianMutation::new(0.1, 1.0, &bounds).unwrap();
        let mut genotype = Genotype::from_genes(vec![0.0, 0.5]);

        // Past the generation budget the factor turns negative
        let mut rng = ScriptedRandom::new()
            .with_reals(&[0.0, 0.0])
            .with_normals(&[0.0, 0.0]);
        op.mutate(&mut genotype, &bounds, &schedule(1.0, 150), &mut rng);

        assert_eq!(op.sigma(), &[SIGMA_RESET, SIGMA_RESET]);
    }

    #[test]
    fn test_gaussian_reset_restores_sigma() {
        let bounds = bounds();
        let mut op = MutationOperator::from_kind(
            &MutationKind::Gaussian {
                initial_scale: 0.2,
                shrink_rate: 1.0,
            },
            &bounds,
        )
        .unwrap();
        let mut genotype = Genotype::from_genes(vec![0.0, 0.5]);
        let mut rng = RandomNumberGenerator::from_seed(1);

        for generation in 0..50 {
            op.mutate(&mut genotype, &bounds, &schedule(1.0, generation), &mut rng);
        }
        assert_ne!(op.sigma(), Some(&[2.0, 0.2][..]));

        op.reset(&bounds);
        assert_eq!(op.sigma(), Some(&[2.0, 0.2][..]));
    }

    #[test]
    fn test_mutation_keeps_genes_in_bounds() {
        let bounds = bounds();
        let mut rng = RandomNumberGenerator::from_seed(8);
        let mut operators = vec![
            MutationOperator::from_kind(&MutationKind::Uniform { fraction: 1.0 }, &bounds).unwrap(),
            MutationOperator::from_kind(
                &MutationKind::Gaussian {
                    initial_scale: 2.0,
                    shrink_rate: 0.0,
                },
                &bounds,
            )
            .unwrap(),
        ];

        for op in operators.iter_mut() {
            let mut genotype = Genotype::new(2);
            genotype.randomize_uniform(&bounds, &mut rng);
            for generation in 0..200 {
                op.mutate(&mut genotype, &bounds, &schedule(1.0, generation), &mut rng);
                assert!(genotype.is_within(&bounds));
            }
        }
    }

    #[test]
    fn test_zero_rate_consumes_only_gate_draws() {
        let bounds = bounds();
        let mut op = MutationOperator::from_kind(
            &MutationKind::Gaussian {
                initial_scale: 0.1,
                shrink_rate: 0.5,
            },
            &bounds,
        )
        .unwrap();
        let mut genotype = Genotype::from_genes(vec![1.0, 0.5]);

        let mut rng = ScriptedRandom::new().with_reals(&[0.0, 0.3]);
        op.mutate(&mut genotype, &bounds, &schedule(0.0, 3), &mut rng);

        assert_eq!(genotype.genes(), &[1.0, 0.5]);
        assert!(rng.is_exhausted());
        assert!(op.sigma().is_some());
        assert!(MutationOperator::Uniform(UniformMutation::new(0.1).unwrap())
            .sigma()
            .is_none());
    }
}
