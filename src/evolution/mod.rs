pub mod builder;
pub mod challenge;
pub mod engine;
pub mod options;

pub use builder::EvolutionEngineBuilder;
pub use challenge::Challenge;
pub use engine::EvolutionEngine;
pub use options::{CrossoverKind, EvolutionOptions, LogLevel, MutationKind, SelectionKind};
