use std::fmt::Debug;

use crate::rng::RandomSource;

/// Trait for parent selection strategies.
///
/// A selection strategy maps the fitness scores of the current population to
/// parent indices. Lower fitness is better throughout the crate.
///
/// # Examples
///
/// ```
/// use realgen::rng::RandomNumberGenerator;
/// use realgen::selection::{SelectionStrategy, TournamentSelection};
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let selection = TournamentSelection::new(3, fitness.len()).unwrap();
/// let (first, second) = selection.select_parents(&fitness, &mut rng);
///
/// assert_ne!(first, second);
/// assert!(first < fitness.len() && second < fitness.len());
/// ```
pub trait SelectionStrategy: Debug {
    /// Draws a single parent index.
    fn select_index<R: RandomSource + ?Sized>(&self, fitness: &[f64], rng: &mut R) -> usize;

    /// Draws two parent indices independently, then separates them if they
    /// collide (see [`resolve_collision`]).
    fn select_parents<R: RandomSource + ?Sized>(
        &self,
        fitness: &[f64],
        rng: &mut R,
    ) -> (usize, usize) {
        let first = self.select_index(fitness, rng);
        let second = self.select_index(fitness, rng);
        resolve_collision(first, second, fitness.len())
    }
}

/// Makes two parent indices distinct without drawing again.
///
/// When both indices are equal the second is shifted to the next position, or
/// to the previous one if the first is the last position. A population of one
/// cannot provide two distinct parents, so `(0, 0)` is returned unchanged.
pub fn resolve_collision(first: usize, second: usize, population_size: usize) -> (usize, usize) {
    if first != second || population_size < 2 {
        return (first, second);
    }

    if first + 1 < population_size {
        (first, first + 1)
    } else {
        (first, first - 1)
    }
}
