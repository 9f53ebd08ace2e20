//! # Genotype
//!
//! A `Genotype` is one candidate solution: a fixed-length vector of real genes
//! plus the fitness score it was last evaluated to. Lower fitness is better.
//!
//! The operators here only touch the genes. After any of them the fitness is
//! stale until the engine runs the fitness callback again.
//!
//! ## Example
//!
//! ```rust
//! use realgen::bounds::Bounds;
//! use realgen::genotype::Genotype;
//! use realgen::rng::RandomNumberGenerator;
//!
//! let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let mut genotype = Genotype::new(bounds.dimensions());
//! genotype.randomize_uniform(&bounds, &mut rng);
//! genotype.perturb_gaussian_local(0, 0.1, &bounds, &mut rng);
//!
//! assert!(genotype.is_within(&bounds));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::bounds::Bounds;
use crate::rng::RandomSource;

/// One candidate solution: genes and their fitness score.
#[derive(Debug, Clone, PartialEq)]
pub struct Genotype {
    genes: Vec<f64>,
    fitness: f64,
}

impl Genotype {
    /// Creates a genotype of `dimensions` zero genes with a zero fitness.
    pub fn new(dimensions: usize) -> Self {
        Self {
            genes: vec![0.0; dimensions],
            fitness: 0.0,
        }
    }

    /// Creates a genotype from explicit genes, with a zero fitness.
    pub fn from_genes(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: 0.0,
        }
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn dimensions(&self) -> usize {
        self.genes.len()
    }

    /// Sets every gene to a uniform draw within its bound interval.
    pub fn randomize_uniform<R: RandomSource + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        for (dim, gene) in self.genes.iter_mut().enumerate() {
            *gene = bounds.lower()[dim] + rng.uniform_real() * bounds.range(dim);
        }
    }

    /// Replaces gene `dim` with a uniform draw within `fraction` of the
    /// dimension's width around its current value, clamped to the bounds.
    pub fn perturb_uniform_local<R: RandomSource + ?Sized>(
        &mut self,
        dim: usize,
        fraction: f64,
        bounds: &Bounds,
        rng: &mut R,
    ) {
        let radius = fraction * bounds.range(dim);
        let step = radius * (2.0 * rng.uniform_real() - 1.0);
        self.genes[dim] = bounds.clamp(dim, self.genes[dim] + step);
    }

    /// Adds a zero-mean Gaussian draw with standard deviation `sigma` to gene
    /// `dim`, clamped to the bounds.
    pub fn perturb_gaussian_local<R: RandomSource + ?Sized>(
        &mut self,
        dim: usize,
        sigma: f64,
        bounds: &Bounds,
        rng: &mut R,
    ) {
        let step = sigma * rng.standard_normal();
        self.genes[dim] = bounds.clamp(dim, self.genes[dim] + step);
    }

    /// True if every gene lies inside its bound interval.
    pub fn is_within(&self, bounds: &Bounds) -> bool {
        self.genes
            .iter()
            .enumerate()
            .all(|(dim, &gene)| bounds.contains(dim, gene))
    }

    /// Orders genotypes by ascending fitness.
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", gene)?;
        }
        write!(f, "]")
    }
}
