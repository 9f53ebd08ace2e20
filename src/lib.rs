pub mod bounds;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod genotype;
pub mod mutation;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use bounds::Bounds;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, EvolutionEngine, EvolutionEngineBuilder, EvolutionOptions};
pub use genotype::Genotype;
