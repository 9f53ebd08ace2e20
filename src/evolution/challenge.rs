use crate::error::Result;
use crate::genotype::Genotype;

/// The fitness function an evolution minimizes.
///
/// Any data the score depends on travels with the implementor, so closures
/// capturing their context work directly:
///
/// ```rust
/// use realgen::evolution::Challenge;
/// use realgen::genotype::Genotype;
///
/// let target = vec![1.0, -1.0];
/// let mut challenge = |candidate: &Genotype| -> f64 {
///     candidate
///         .genes()
///         .iter()
///         .zip(&target)
///         .map(|(x, t)| (x - t).powi(2))
///         .sum()
/// };
///
/// let score = challenge.score(&Genotype::from_genes(vec![1.0, 1.0])).unwrap();
/// assert_eq!(score, 4.0);
/// ```
///
/// Implement the trait on a type to report failures through the error
/// channel; the engine aborts the current operation and returns the error.
pub trait Challenge {
    fn score(&mut self, candidate: &Genotype) -> Result<f64>;
}

impl<F> Challenge for F
where
    F: FnMut(&Genotype) -> f64,
{
    fn score(&mut self, candidate: &Genotype) -> Result<f64> {
        Ok(self(candidate))
    }
}
