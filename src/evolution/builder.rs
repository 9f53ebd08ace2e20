use crate::{
    bounds::Bounds,
    error::{GeneticError, Result},
    rng::{RandomNumberGenerator, RandomSource},
};

use super::{Challenge, EvolutionEngine, EvolutionOptions};

/// Builder for [`EvolutionEngine`].
///
/// Population size, bounds and challenge are required. Options fall back to
/// [`EvolutionOptions::default`] and the random source to an entropy-seeded
/// [`RandomNumberGenerator`].
///
/// ```rust
/// use realgen::bounds::Bounds;
/// use realgen::evolution::EvolutionEngineBuilder;
/// use realgen::genotype::Genotype;
/// use realgen::rng::RandomNumberGenerator;
///
/// let mut engine = EvolutionEngineBuilder::new()
///     .with_population_size(10)
///     .with_bounds(Bounds::uniform(3, -1.0, 1.0).unwrap())
///     .with_challenge(|candidate: &Genotype| candidate.genes().iter().sum::<f64>())
///     .with_rng(RandomNumberGenerator::from_seed(5))
///     .build()
///     .unwrap();
///
/// engine.initialize_random().unwrap();
/// engine.step_generation().unwrap();
/// assert_eq!(engine.generation(), 1);
/// ```
#[derive(Debug)]
pub struct EvolutionEngineBuilder<C, R = RandomNumberGenerator>
where
    C: Challenge,
    R: RandomSource,
{
    population_size: Option<usize>,
    bounds: Option<Bounds>,
    options: Option<EvolutionOptions>,
    challenge: Option<C>,
    rng: Option<R>,
}

impl<C> EvolutionEngineBuilder<C>
where
    C: Challenge,
{
    pub fn new() -> Self {
        Self {
            population_size: None,
            bounds: None,
            options: None,
            challenge: None,
            rng: None,
        }
    }
}

impl<C, R> EvolutionEngineBuilder<C, R>
where
    C: Challenge,
    R: RandomSource,
{
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = Some(population_size);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_challenge(mut self, challenge: C) -> Self {
        self.challenge = Some(challenge);
        self
    }

    /// Replaces the random source, changing the builder's source type.
    pub fn with_rng<R2: RandomSource>(self, rng: R2) -> EvolutionEngineBuilder<C, R2> {
        EvolutionEngineBuilder {
            population_size: self.population_size,
            bounds: self.bounds,
            options: self.options,
            challenge: self.challenge,
            rng: Some(rng),
        }
    }
}

impl<C, R> EvolutionEngineBuilder<C, R>
where
    C: Challenge,
    R: RandomSource + Default,
{
    pub fn build(self) -> Result<EvolutionEngine<C, R>> {
        let population_size = self.population_size.ok_or_else(|| {
            GeneticError::Configuration("Population size not specified".to_string())
        })?;

        let bounds = self
            .bounds
            .ok_or_else(|| GeneticError::Configuration("Bounds not specified".to_string()))?;

        let challenge = self
            .challenge
            .ok_or_else(|| GeneticError::Configuration("Challenge not specified".to_string()))?;

        EvolutionEngine::new(
            population_size,
            bounds,
            self.options.unwrap_or_default(),
            challenge,
            self.rng.unwrap_or_default(),
        )
    }
}

impl<C> Default for EvolutionEngineBuilder<C>
where
    C: Challenge,
{
    fn default() -> Self {
        Self::new()
    }
}
