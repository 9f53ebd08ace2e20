use crate::rng::RandomSource;
use crate::selection::selection_strategy::SelectionStrategy;

/// Roulette wheel selection over a population sorted by ascending fitness.
///
/// Scores are inverted into selection weights with the worst (last) fitness
/// as the reference: individual `i` gets weight `worst - fitness[i]`, so
/// lower fitness means a larger slice of the wheel and the worst individual
/// gets none. The wheel is rebuilt once per generation with
/// [`RouletteWheelSelection::from_sorted`].
///
/// The fitness slice must be sorted ascending. The engine only allows this
/// strategy when population sorting is enabled.
///
/// # Examples
///
/// ```
/// use realgen::selection::RouletteWheelSelection;
///
/// let fitness = vec![1.0, 2.0, 3.0, 4.0];
/// let wheel = RouletteWheelSelection::from_sorted(&fitness);
///
/// assert_eq!(wheel.total_weight(), 6.0);
/// assert_eq!(RouletteWheelSelection::spin(&fitness, 0.5), 0);
/// assert_eq!(RouletteWheelSelection::spin(&fitness, 4.0), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouletteWheelSelection {
    total_weight: f64,
}

impl RouletteWheelSelection {
    /// Builds the wheel for fitness scores sorted ascending.
    ///
    /// The total weight is `n * worst - sum(fitness)`.
    pub fn from_sorted(fitness: &[f64]) -> Self {
        let worst = fitness.last().copied().unwrap_or(0.0);
        let sum: f64 = fitness.iter().sum();
        Self {
            total_weight: fitness.len() as f64 * worst - sum,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Returns the first index whose running weight sum strictly exceeds
    /// `stop`, or 0 if none does.
    pub fn spin(fitness: &[f64], stop: f64) -> usize {
        let worst = match fitness.last() {
            Some(&worst) => worst,
            None => return 0,
        };

        let mut cumulative = 0.0;
        for (i, &f) in fitness.iter().enumerate() {
            cumulative += worst - f;
            if cumulative > stop {
                return i;
            }
        }
        0
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select_index<R: RandomSource + ?Sized>(&self, fitness: &[f64], rng: &mut R) -> usize {
        let stop = self.total_weight * rng.uniform_real();
        Self::spin(fitness, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RandomNumberGenerator, ScriptedRandom};

    #[test]
    fn test_total_weight() {
        let wheel = RouletteWheelSelection::from_sorted(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(wheel.total_weight(), 6.0);
    }

    #[test]
    fn test_spin_boundaries() {
        let fitness = [1.0, 2.0, 3.0, 4.0];

        // Running sums are 3, 5, 6, 6
        assert_eq!(RouletteWheelSelection::spin(&fitness, 0.0), 0);
        assert_eq!(RouletteWheelSelection::spin(&fitness, 2.9), 0);
        assert_eq!(RouletteWheelSelection::spin(&fitness, 3.0), 1);
        assert_eq!(RouletteWheelSelection::spin(&fitness, 4.99), 1);
        assert_eq!(RouletteWheelSelection::spin(&fitness, 5.0), 2);
        assert_eq!(RouletteWheelSelection::spin(&fitness, 5.9), 2);

        // Nothing strictly exceeds the total weight: falls back to the first index
        assert_eq!(RouletteWheelSelection::spin(&fitness, 6.0), 0);
    }

    #[test]
    fn test_worst_individual_is_never_spun() {
        let fitness = [0.5, 1.5, 2.0, 7.0];
        let wheel = RouletteWheelSelection::from_sorted(&fitness);
        let mut rng = RandomNumberGenerator::from_seed(9);

        for _ in 0..1000 {
            assert_ne!(wheel.select_index(&fitness, &mut rng), 3);
        }
    }

    #[test]
    fn test_equal_fitness_is_degenerate() {
        let fitness = [2.0, 2.0, 2.0];
        let wheel = RouletteWheelSelection::from_sorted(&fitness);
        assert_eq!(wheel.total_weight(), 0.0);

        let mut rng = ScriptedRandom::new().with_reals(&[0.3, 0.8]);
        // Both draws land on index 0, the collision rule moves the second
        assert_eq!(wheel.select_parents(&fitness, &mut rng), (0, 1));
    }

    #[test]
    fn test_select_parents_uses_scaled_draws() {
        let fitness = [1.0, 2.0, 3.0, 4.0];
        let wheel = RouletteWheelSelection::from_sorted(&fitness);

        // 0.1 * 6 = 0.6 -> 0, 0.9 * 6 = 5.4 -> 2
        let mut rng = ScriptedRandom::new().with_reals(&[0.1, 0.9]);
        assert_eq!(wheel.select_parents(&fitness, &mut rng), (0, 2));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_select_parents_collision_on_best() {
        let fitness = [1.0, 2.0, 3.0, 4.0];
        let wheel = RouletteWheelSelection::from_sorted(&fitness);

        let mut rng = ScriptedRandom::new().with_reals(&[0.2, 0.3]);
        assert_eq!(wheel.select_parents(&fitness, &mut rng), (0, 1));
    }

    #[test]
    fn test_better_individuals_are_favoured() {
        let fitness = [0.0, 1.0, 2.0, 3.0, 10.0];
        let wheel = RouletteWheelSelection::from_sorted(&fitness);
        let mut rng = RandomNumberGenerator::from_seed(21);
        let mut counts = [0usize; 5];

        for _ in 0..10_000 {
            counts[wheel.select_index(&fitness, &mut rng)] += 1;
        }

        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
        assert_eq!(counts[4], 0);
    }
}
