//! Fitness evaluation.
//!
//! Fitness is the total packed value when the packed weight fits the
//! capacity, and exactly 0 otherwise. There is no partial credit for
//! overweight genomes.

use super::types::{Genome, ItemCatalog, Problem};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fitness values of a population, index-aligned with it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessRecord {
    values: Vec<f64>,
    total: f64,
}

impl FitnessRecord {
    /// Builds a record from raw values, computing the total.
    pub fn from_values(values: Vec<f64>) -> Self {
        let total = values.iter().sum();
        Self { values, total }
    }

    /// Per-genome fitness values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum of all values (the roulette wheel size).
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean fitness, or 0 for an empty record.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.total / self.values.len() as f64
        }
    }

    /// Index of the highest value; the first one wins ties.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                Some(b) if self.values[b] >= v => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

/// Packed weight and value of a genome, regardless of capacity.
pub fn totals(genome: &Genome, catalog: &ItemCatalog) -> (f64, f64) {
    debug_assert_eq!(genome.len(), catalog.len(), "genome/catalog length mismatch");
    genome
        .bits()
        .iter()
        .zip(catalog.items())
        .filter(|(bit, _)| **bit)
        .fold((0.0, 0.0), |(w, v), (_, item)| (w + item.weight, v + item.value))
}

/// Scores a single genome.
///
/// Pure: depends only on its arguments, so it can rank any genome at any
/// time, not just members of the current population.
pub fn evaluate(genome: &Genome, catalog: &ItemCatalog, capacity: f64) -> f64 {
    let (weight, value) = totals(genome, catalog);
    if weight <= capacity {
        value
    } else {
        0.0
    }
}

impl Problem {
    /// Scores a genome against this instance.
    pub fn evaluate(&self, genome: &Genome) -> f64 {
        evaluate(genome, self.catalog(), self.capacity())
    }

    /// Whether the genome's packed weight fits the capacity.
    pub fn is_feasible(&self, genome: &Genome) -> bool {
        totals(genome, self.catalog()).0 <= self.capacity()
    }

    /// Scores every genome, in order.
    ///
    /// With the `parallel` feature the genomes are scored on rayon's pool;
    /// the resulting order is the same either way.
    pub fn evaluate_population(&self, population: &[Genome]) -> FitnessRecord {
        #[cfg(feature = "parallel")]
        let values: Vec<f64> = population.par_iter().map(|g| self.evaluate(g)).collect();

        #[cfg(not(feature = "parallel"))]
        let values: Vec<f64> = population.iter().map(|g| self.evaluate(g)).collect();

        FitnessRecord::from_values(values)
    }
}
