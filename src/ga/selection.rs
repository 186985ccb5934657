//! Parent selection strategies.
//!
//! Selection picks indices into the current population, biased toward
//! higher fitness. Both strategies always return a valid index, including
//! for a generation in which every genome scored 0.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::fitness::FitnessRecord;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use knapsack_ga::ga::Selection;
///
/// // Tournament with size 3 (the default)
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Tournament(3));
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: draw `k` indices uniformly with replacement,
    /// keep the fittest. The earliest draw wins ties.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Draws `r` in `[0, total)` and returns the first index whose running
    /// fitness sum reaches `r`. When the total is 0 (every genome
    /// infeasible) index 0 is returned.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from the population's fitness record.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select<R: Rng>(&self, fitness: &FitnessRecord, rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(fitness.values(), *k, rng),
            Selection::Roulette => roulette(fitness.values(), fitness.total(), rng),
        }
    }
}

/// Tournament selection: pick k random indices, return the fittest.
fn tournament<R: Rng>(values: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = values.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if values[idx] > values[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection over raw fitness values.
fn roulette<R: Rng>(values: &[f64], total: f64, rng: &mut R) -> usize {
    if total <= 0.0 {
        return 0;
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &f) in values.iter().enumerate() {
        cumulative += f;
        if cumulative >= threshold {
            return i;
        }
    }

    values.len() - 1 // floating-point fallback
}
