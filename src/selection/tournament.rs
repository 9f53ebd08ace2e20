use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament draws `tournament_size` indices with replacement and the
/// participant with the lowest fitness wins. Smaller tournaments lead to more
/// exploration, larger ones to more exploitation.
///
/// # Examples
///
/// ```
/// use realgen::rng::RandomNumberGenerator;
/// use realgen::selection::{SelectionStrategy, TournamentSelection};
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut rng = RandomNumberGenerator::from_seed(7);
///
/// // A tournament as large as the population is biased towards index 4.
/// let selection = TournamentSelection::new(5, fitness.len()).unwrap();
/// let winner = selection.select_index(&fitness, &mut rng);
/// assert!(winner < fitness.len());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy for a population of
    /// `population_size` individuals.
    ///
    /// # Errors
    ///
    /// Returns an error unless `2 <= tournament_size <= population_size`.
    pub fn new(tournament_size: usize, population_size: usize) -> Result<Self> {
        if tournament_size < 2 || tournament_size > population_size {
            return Err(GeneticError::Configuration(format!(
                "Tournament size must be between 2 and the population size ({}), got {}",
                population_size, tournament_size
            )));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
}

impl SelectionStrategy for TournamentSelection {
    /// Runs a single tournament and returns the index of the winner.
    ///
    /// All participants are drawn before the winner is known, one
    /// `uniform_index` draw each. The first participant drawn wins ties.
    fn select_index<R: RandomSource + ?Sized>(&self, fitness: &[f64], rng: &mut R) -> usize {
        let population_size = fitness.len();
        let mut winner: Option<usize> = None;

        for _ in 0..self.tournament_size {
            let candidate = rng.uniform_index(population_size);
            winner = match winner {
                Some(best) if fitness[best] <= fitness[candidate] => Some(best),
                _ => Some(candidate),
            };
        }

        winner.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RandomNumberGenerator, ScriptedRandom};

    #[test]
    fn test_invalid_sizes() {
        assert!(TournamentSelection::new(0, 5).is_err());
        assert!(TournamentSelection::new(1, 5).is_err());
        assert!(TournamentSelection::new(6, 5).is_err());

        match TournamentSelection::new(1, 5) {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("between 2 and the population size"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_valid_sizes() {
        assert_eq!(TournamentSelection::new(2, 2).unwrap().tournament_size(), 2);
        assert_eq!(TournamentSelection::new(5, 5).unwrap().tournament_size(), 5);
    }

    #[test]
    fn test_winner_is_lowest_fitness_participant() {
        let fitness = [0.5, 0.8, 0.3, 0.9, 0.1];
        let selection = TournamentSelection::new(3, fitness.len()).unwrap();

        let mut rng = ScriptedRandom::new().with_indices(&[1, 3, 2]);
        assert_eq!(selection.select_index(&fitness, &mut rng), 2);

        // Index 0 does not take part unless it is drawn
        let mut rng = ScriptedRandom::new().with_indices(&[3, 1, 3]);
        assert_eq!(selection.select_index(&fitness, &mut rng), 1);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_first_drawn_wins_ties() {
        let fitness = [1.0, 1.0, 1.0];
        let selection = TournamentSelection::new(2, fitness.len()).unwrap();

        let mut rng = ScriptedRandom::new().with_indices(&[2, 0]);
        assert_eq!(selection.select_index(&fitness, &mut rng), 2);
    }

    #[test]
    fn test_select_parents_draw_order_and_collision() {
        let fitness = [0.5, 0.8, 0.3, 0.9, 0.1];
        let selection = TournamentSelection::new(2, fitness.len()).unwrap();

        // First tournament {4, 0} -> 4, second {1, 4} -> 4, collision on last -> 3
        let mut rng = ScriptedRandom::new().with_indices(&[4, 0, 1, 4]);
        assert_eq!(selection.select_parents(&fitness, &mut rng), (4, 3));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_parents_always_distinct() {
        let fitness = [0.5, 0.8, 0.3, 0.9, 0.1];
        let selection = TournamentSelection::new(4, fitness.len()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);

        for _ in 0..1000 {
            let (first, second) = selection.select_parents(&fitness, &mut rng);
            assert_ne!(first, second);
        }
    }
}
