//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::Mutation;
use super::selection::Selection;
use super::types::Initialization;
use crate::error::ConfigError;

/// Configuration for the knapsack GA.
///
/// Controls population size, operator probabilities, strategies and the
/// random seed. Setters store values as given; [`validate`](Self::validate)
/// rejects anything out of range instead of clamping it.
///
/// # Defaults
///
/// ```
/// use knapsack_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_generations, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knapsack_ga::ga::{GaConfig, Mutation, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(51)
///     .with_selection(Selection::Roulette)
///     .with_mutation(Mutation::BufferFlip)
///     .with_crossover_probability(0.7)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of genomes per generation.
    ///
    /// Odd sizes reserve one slot per generation for the previous best
    /// genome.
    pub population_size: usize,

    /// Maximum number of recorded generations, the initial one included.
    pub max_generations: usize,

    /// Probability that a breeding pair is crossed rather than cloned.
    pub crossover_probability: f64,

    /// Probability that a breeding pair triggers one bit flip.
    pub mutation_probability: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Mutation target strategy.
    pub mutation: Mutation,

    /// How initial genomes are drawn.
    pub initialization: Initialization,

    /// Maximum spread among the last three average fitness values that
    /// still counts as converged.
    ///
    /// `0.0` (the default) requires exact equality.
    pub convergence_tolerance: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 200,
            crossover_probability: 0.5,
            mutation_probability: 0.3,
            selection: Selection::default(),
            mutation: Mutation::default(),
            initialization: Initialization::default(),
            convergence_tolerance: 0.0,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection of size `k`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the initialization mode.
    pub fn with_initialization(mut self, init: Initialization) -> Self {
        self.initialization = init;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = tolerance;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        check_probability("crossover_probability", self.crossover_probability)?;
        check_probability("mutation_probability", self.mutation_probability)?;
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::EmptyTournament);
        }
        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.convergence_tolerance));
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.max_generations, 200);
        assert!((config.crossover_probability - 0.5).abs() < 1e-10);
        assert!((config.mutation_probability - 0.3).abs() < 1e-10);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.mutation, Mutation::PairFlip);
        assert_eq!(config.initialization, Initialization::Uniform);
        assert_eq!(config.convergence_tolerance, 0.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(31)
            .with_max_generations(1000)
            .with_crossover_probability(0.8)
            .with_mutation_probability(0.05)
            .with_selection(Selection::Roulette)
            .with_mutation(Mutation::BufferFlip)
            .with_initialization(Initialization::OneInThree)
            .with_convergence_tolerance(1e-9)
            .with_seed(42);

        assert_eq!(config.population_size, 31);
        assert_eq!(config.max_generations, 1000);
        assert!((config.crossover_probability - 0.8).abs() < 1e-10);
        assert!((config.mutation_probability - 0.05).abs() < 1e-10);
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.mutation, Mutation::BufferFlip);
        assert_eq!(config.initialization, Initialization::OneInThree);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));
        let config = GaConfig::default().with_population_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroGenerations));
    }

    #[test]
    fn test_validate_crossover_out_of_range() {
        let config = GaConfig::default().with_crossover_probability(1.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "crossover_probability",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_validate_mutation_out_of_range() {
        let config = GaConfig::default().with_mutation_probability(-0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "mutation_probability",
                ..
            })
        ));
        let config = GaConfig::default().with_mutation_probability(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probabilities_not_clamped() {
        let config = GaConfig::default().with_crossover_probability(2.0);
        assert_eq!(config.crossover_probability, 2.0);
    }

    #[test]
    fn test_probability_bounds_inclusive() {
        let config = GaConfig::default()
            .with_crossover_probability(0.0)
            .with_mutation_probability(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyTournament));
    }

    #[test]
    fn test_validate_tolerance() {
        let config = GaConfig::default().with_convergence_tolerance(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTolerance(-1.0)));
    }
}
