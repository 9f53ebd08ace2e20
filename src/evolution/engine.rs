//! # EvolutionEngine
//!
//! The engine owns the active population, a scratch population of the same
//! size, the search bounds, the configured operators and the single random
//! source they all draw from.
//!
//! Lifecycle: a freshly built engine holds unevaluated genotypes. After
//! [`EvolutionEngine::initialize_random`] (or
//! [`EvolutionEngine::reevaluate_fitness`]) every call to
//! [`EvolutionEngine::step_generation`] breeds one generation. The caller
//! decides when to stop, typically by generation count or by watching
//! [`EvolutionEngine::best_score`].
//!
//! ## Example
//!
//! ```rust
//! use realgen::bounds::Bounds;
//! use realgen::evolution::{EvolutionEngine, EvolutionOptions};
//! use realgen::genotype::Genotype;
//! use realgen::rng::RandomNumberGenerator;
//!
//! fn sphere(candidate: &Genotype) -> f64 {
//!     candidate.genes().iter().map(|x| x * x).sum()
//! }
//!
//! let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
//! let mut engine = EvolutionEngine::new(
//!     20,
//!     bounds,
//!     EvolutionOptions::default(),
//!     sphere,
//!     RandomNumberGenerator::from_seed(1),
//! )
//! .unwrap();
//!
//! engine.initialize_random().unwrap();
//! let initial = engine.best_score();
//! for _ in 0..50 {
//!     engine.step_generation().unwrap();
//! }
//!
//! assert_eq!(engine.generation(), 50);
//! assert!(engine.best_score() <= initial);
//! ```

use tracing::{debug, info, warn};

use super::{
    challenge::Challenge,
    options::{check_unit_interval, EvolutionOptions, LogLevel, SelectionKind},
};
use crate::{
    bounds::Bounds,
    crossover::{Crossover, CrossoverOperator},
    error::{GeneticError, OptionExt, Result},
    genotype::Genotype,
    mutation::{Mutation, MutationOperator, MutationSchedule},
    rng::{RandomNumberGenerator, RandomSource},
    selection::{RouletteWheelSelection, SelectionStrategy, Selector, TournamentSelection},
};

/// Generation budget per dimension used when none is set explicitly.
pub const GENERATIONS_PER_DIMENSION: usize = 100;

/// A generational genetic algorithm over a bounded real-valued search space.
#[derive(Debug)]
pub struct EvolutionEngine<C, R = RandomNumberGenerator>
where
    C: Challenge,
    R: RandomSource,
{
    bounds: Bounds,
    options: EvolutionOptions,
    crossover: CrossoverOperator,
    mutation: MutationOperator,
    challenge: C,
    rng: R,
    population: Vec<Genotype>,
    offspring: Vec<Genotype>,
    fitness: Vec<f64>,
    generation: usize,
    max_generations: usize,
    initialized: bool,
}

impl<C, R> EvolutionEngine<C, R>
where
    C: Challenge,
    R: RandomSource,
{
    /// Creates a new engine with `population_size` unevaluated genotypes.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` are invalid for this population size
    /// and dimensionality (see [`EvolutionOptions::validate`]).
    pub fn new(
        population_size: usize,
        bounds: Bounds,
        options: EvolutionOptions,
        challenge: C,
        rng: R,
    ) -> Result<Self> {
        let dimensions = bounds.dimensions();
        let (crossover, mutation) = Self::build_operators(&options, population_size, &bounds)?;

        let engine = Self {
            options,
            crossover,
            mutation,
            challenge,
            rng,
            population: vec![Genotype::new(dimensions); population_size],
            offspring: vec![Genotype::new(dimensions); population_size],
            fitness: Vec::with_capacity(population_size),
            generation: 0,
            max_generations: GENERATIONS_PER_DIMENSION * dimensions,
            initialized: false,
            bounds,
        };
        engine.log_configuration();
        Ok(engine)
    }

    /// Validates `options` and resolves their operators.
    fn build_operators(
        options: &EvolutionOptions,
        population_size: usize,
        bounds: &Bounds,
    ) -> Result<(CrossoverOperator, MutationOperator)> {
        let built = options
            .validate(population_size, bounds.dimensions())
            .and_then(|_| {
                let crossover =
                    CrossoverOperator::from_kind(&options.get_crossover(), bounds.dimensions())?;
                let mutation = MutationOperator::from_kind(&options.get_mutation(), bounds)?;
                Ok((crossover, mutation))
            });

        if let Err(e) = &built {
            warn!(error = %e, "rejected evolution options");
        }
        built
    }

    /// Randomizes every genotype within the bounds and evaluates it.
    ///
    /// Resets the generation counter and the mutation step sizes, and sorts
    /// the population when sorting is enabled.
    ///
    /// # Errors
    ///
    /// Returns a `FitnessCalculation` error if the challenge fails or
    /// returns a non-finite score. The engine is then uninitialized.
    pub fn initialize_random(&mut self) -> Result<()> {
        self.initialized = false;
        self.generation = 0;
        self.mutation.reset(&self.bounds);

        for genotype in self.population.iter_mut() {
            genotype.randomize_uniform(&self.bounds, &mut self.rng);
            let score = evaluate(&mut self.challenge, genotype)?;
            genotype.set_fitness(score);
        }

        if self.options.is_sorting() {
            self.population.sort_by(Genotype::cmp_fitness);
        }

        self.initialized = true;
        self.log_generation();
        Ok(())
    }

    /// Recomputes the fitness of every genotype without touching its genes.
    ///
    /// Resets the generation counter. The population is not reordered here;
    /// the next generation step restores the order if sorting is enabled.
    ///
    /// # Errors
    ///
    /// Returns a `FitnessCalculation` error if the challenge fails or
    /// returns a non-finite score. The engine is then uninitialized.
    pub fn reevaluate_fitness(&mut self) -> Result<()> {
        self.initialized = false;
        self.generation = 0;

        for genotype in self.population.iter_mut() {
            let score = evaluate(&mut self.challenge, genotype)?;
            genotype.set_fitness(score);
        }

        self.initialized = true;
        Ok(())
    }

    /// Breeds the next generation.
    ///
    /// The elite is copied into the scratch buffer, the remaining slots are
    /// filled with evaluated offspring of parents drawn from the active
    /// population, and the buffers are swapped. The active population is
    /// only read while offspring are produced.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if the population was never evaluated, or a
    /// `FitnessCalculation` error from the challenge. On error the active
    /// population's members, the generation counter and the Gaussian step
    /// sizes are unchanged. Only the random source has advanced, and a
    /// population left unsorted by `reevaluate_fitness` stays sorted.
    pub fn step_generation(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(GeneticError::NotInitialized);
        }

        let population_size = self.population.len();
        let sorting = self.options.is_sorting();

        if sorting && !is_sorted(&self.population) {
            self.population.sort_by(Genotype::cmp_fitness);
        }

        self.fitness.clear();
        self.fitness
            .extend(self.population.iter().map(Genotype::fitness));

        let selector = match self.options.get_selection() {
            SelectionKind::RouletteWheel => {
                Selector::RouletteWheel(RouletteWheelSelection::from_sorted(&self.fitness))
            }
            SelectionKind::Tournament { size } => {
                Selector::Tournament(TournamentSelection::new(size, population_size)?)
            }
        };

        let elite_count = self.options.elite_count(population_size);
        if sorting {
            self.offspring[..elite_count].clone_from_slice(&self.population[..elite_count]);
        } else if elite_count > 0 {
            let best = self.best_index()?;
            self.offspring[0].clone_from(&self.population[best]);
        }

        // Step-size updates are committed only once every offspring scored
        let mut mutation = self.mutation.clone();
        let schedule = MutationSchedule {
            rate: self.options.get_mutation_rate(),
            generation: self.generation,
            max_generations: self.max_generations,
        };

        for slot in elite_count..population_size {
            let (first, second) = selector.select_parents(&self.fitness, &mut self.rng);
            let child = &mut self.offspring[slot];

            self.crossover.cross(
                self.population[first].genes(),
                self.population[second].genes(),
                child.genes_mut(),
                &mut self.rng,
            );
            mutation.mutate(child, &self.bounds, &schedule, &mut self.rng);

            let score = evaluate(&mut self.challenge, child)?;
            child.set_fitness(score);
        }

        if sorting {
            self.offspring.sort_by(Genotype::cmp_fitness);
        }

        self.mutation = mutation;
        std::mem::swap(&mut self.population, &mut self.offspring);
        self.generation += 1;
        self.log_generation();
        Ok(())
    }

    /// The number of generations bred since the last initialization.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Arithmetic mean of the population's fitness.
    pub fn mean_fitness(&self) -> f64 {
        let population_size = self.population.len() as f64;
        self.population
            .iter()
            .map(|genotype| genotype.fitness() / population_size)
            .sum()
    }

    /// The genotype with the lowest fitness in the active population.
    ///
    /// The reference points into storage that the next generation step
    /// replaces, so it cannot outlive a call to `step_generation`.
    pub fn best_individual(&self) -> &Genotype {
        let best = self.best_index().unwrap_or(0);
        &self.population[best]
    }

    /// The lowest fitness in the active population.
    pub fn best_score(&self) -> f64 {
        self.best_individual().fitness()
    }

    fn best_index(&self) -> Result<usize> {
        self.population
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp_fitness(b))
            .map(|(index, _)| index)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    pub fn population(&self) -> &[Genotype] {
        &self.population
    }

    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    pub fn challenge_mut(&mut self) -> &mut C {
        &mut self.challenge
    }

    /// The adaptive Gaussian step sizes, if Gaussian mutation is configured.
    pub fn sigma(&self) -> Option<&[f64]> {
        self.mutation.sigma()
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Replaces the whole configuration.
    ///
    /// The crossover and mutation operators are rebuilt, which resets the
    /// Gaussian step sizes. On error the previous configuration stays.
    pub fn set_options(&mut self, options: EvolutionOptions) -> Result<()> {
        let (crossover, mutation) =
            Self::build_operators(&options, self.population.len(), &self.bounds)?;
        self.options = options;
        self.crossover = crossover;
        self.mutation = mutation;
        self.log_configuration();
        Ok(())
    }

    /// Sets the per-gene mutation probability.
    pub fn set_mutation_rate(&mut self, value: f64) -> Result<()> {
        check_unit_interval("Mutation rate", value).inspect_err(|e| {
            warn!(error = %e, "rejected mutation rate");
        })?;
        self.options.set_mutation_rate(value);
        Ok(())
    }

    /// Sets the fraction of the sorted population kept as elite.
    pub fn set_elitism_fraction(&mut self, value: f64) -> Result<()> {
        check_unit_interval("Elitism fraction", value).inspect_err(|e| {
            warn!(error = %e, "rejected elitism fraction");
        })?;
        self.options.set_elitism_fraction(value);
        Ok(())
    }

    /// Enables or disables population sorting.
    ///
    /// # Errors
    ///
    /// Sorting cannot be disabled while roulette wheel selection is
    /// configured.
    pub fn set_sorting(&mut self, value: bool) -> Result<()> {
        let mut options = self.options.clone();
        options.set_sorting(value);
        options
            .validate(self.population.len(), self.bounds.dimensions())
            .inspect_err(|e| {
                warn!(error = %e, "rejected sorting change");
            })?;
        self.options = options;
        Ok(())
    }

    /// Sets the generation budget used by the Gaussian step-size schedule.
    ///
    /// The engine does not stop by itself when the budget is reached.
    pub fn set_max_generations(&mut self, value: usize) -> Result<()> {
        if value == 0 {
            return Err(GeneticError::Configuration(
                "Maximum number of generations must be positive".to_string(),
            ));
        }
        self.max_generations = value;
        Ok(())
    }

    /// Resizes both population buffers.
    ///
    /// The new population is unevaluated, so the engine returns to the
    /// uninitialized state.
    pub fn set_population_size(&mut self, population_size: usize) -> Result<()> {
        self.options
            .validate(population_size, self.bounds.dimensions())
            .inspect_err(|e| {
                warn!(error = %e, "rejected population size");
            })?;

        let blank = Genotype::new(self.bounds.dimensions());
        self.population = vec![blank.clone(); population_size];
        self.offspring = vec![blank; population_size];
        self.fitness = Vec::with_capacity(population_size);
        self.generation = 0;
        self.initialized = false;
        Ok(())
    }

    /// A human-readable dump of the active population.
    pub fn population_report(&self) -> String {
        let header = format!(
            "============== generation {} ===================\n",
            self.generation
        );
        self.population
            .iter()
            .enumerate()
            .fold(header, |mut report, (i, genotype)| {
                report.push_str(&format!(
                    "[{}] : {} -> Fitness {}\n",
                    i + 1,
                    genotype,
                    genotype.fitness()
                ));
                report
            })
    }

    fn log_configuration(&self) {
        if *self.options.get_log_level() != LogLevel::Verbose {
            return;
        }

        debug!(
            population_size = self.population.len(),
            dimensions = self.bounds.dimensions(),
            selection = %self.options.get_selection(),
            elitism_fraction = self.options.get_elitism_fraction(),
            sorting = self.options.is_sorting(),
            crossover = %self.options.get_crossover(),
            mutation = %self.options.get_mutation(),
            mutation_rate = self.options.get_mutation_rate(),
            "evolution configured"
        );
    }

    fn log_generation(&self) {
        match self.options.get_log_level() {
            LogLevel::Minimal => {
                info!(
                    generation = self.generation,
                    best_score = self.best_score(),
                    mean_fitness = self.mean_fitness(),
                    "generation complete"
                );
            }
            LogLevel::Verbose => {
                info!(
                    generation = self.generation,
                    best_score = self.best_score(),
                    mean_fitness = self.mean_fitness(),
                    "generation complete"
                );
                debug!("{}", self.population_report());
            }
            LogLevel::None => {}
        }
    }
}

/// Scores one candidate, rejecting non-finite results.
fn evaluate<C: Challenge>(challenge: &mut C, candidate: &Genotype) -> Result<f64> {
    let score = challenge.score(candidate)?;
    if !score.is_finite() {
        return Err(GeneticError::FitnessCalculation(format!(
            "Non-finite fitness score encountered: {}",
            score
        )));
    }
    Ok(score)
}

fn is_sorted(population: &[Genotype]) -> bool {
    population
        .windows(2)
        .all(|pair| pair[0].fitness() <= pair[1].fitness())
}
