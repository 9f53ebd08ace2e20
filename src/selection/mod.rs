pub mod roulette;
pub mod selection_strategy;
pub mod tournament;

pub use roulette::RouletteWheelSelection;
pub use selection_strategy::{resolve_collision, SelectionStrategy};
pub use tournament::TournamentSelection;

use crate::rng::RandomSource;

/// The selection operator chosen for one generation.
#[derive(Debug, Clone)]
pub enum Selector {
    RouletteWheel(RouletteWheelSelection),
    Tournament(TournamentSelection),
}

impl SelectionStrategy for Selector {
    fn select_index<R: RandomSource + ?Sized>(&self, fitness: &[f64], rng: &mut R) -> usize {
        match self {
            Selector::RouletteWheel(wheel) => wheel.select_index(fitness, rng),
            Selector::Tournament(tournament) => tournament.select_index(fitness, rng),
        }
    }
}
