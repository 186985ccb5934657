//! Genetic algorithm solver for the 0/1 knapsack problem.
//!
//! Evolves include/exclude bit strings over an item catalog. Infeasible
//! (overweight) genomes score 0; feasible ones score their total value.
//!
//! - **Engine**: generational replacement with single-point crossover,
//!   single-locus mutation and an elitist slot for odd population sizes.
//! - **Strategies**: tournament or roulette selection, two mutation
//!   targeting modes, two initializers, chosen through [`ga::GaConfig`].
//! - **Reproducibility**: every random draw goes through one seeded
//!   generator ([`random::create_rng`]).
//!
//! # Example
//!
//! ```
//! use knapsack_ga::ga::{GaConfig, GaRunner, ItemCatalog, Problem};
//!
//! let catalog = ItemCatalog::from_columns(&[10.0, 20.0, 15.0], &[5.0, 10.0, 8.0]).unwrap();
//! let problem = Problem::new(catalog, 15.0).unwrap();
//! let result = GaRunner::solve(&problem, &GaConfig::default().with_seed(7)).unwrap();
//! assert!(result.best_fitness <= 30.0);
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{ConfigError, DegenerateGeneration, ParseGenomeError};
