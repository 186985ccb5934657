//! Genetic algorithm for the 0/1 knapsack problem.
//!
//! A single engine with pluggable strategies. Users describe the instance
//! with a [`Problem`] (an [`ItemCatalog`] plus a capacity), pick parameters
//! in a [`GaConfig`] and hand both to a [`GaRunner`].
//!
//! # Key Types
//!
//! - [`Genome`]: include/exclude bit vector over the catalog
//! - [`GaConfig`]: population size, probabilities, strategies, seed
//! - [`GaRunner`]: executes the evolutionary loop as a state machine
//! - [`RunSummary`]: per-generation statistics and the optimal item list
//!
//! # Strategies
//!
//! - [`Selection`]: tournament or roulette wheel
//! - [`Mutation`]: single-locus flip gated once per breeding pair
//! - [`Initialization`]: fair coin or the legacy one-in-three draw
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod fitness;
pub mod operators;
mod runner;
mod selection;
mod summary;
mod types;

pub use config::GaConfig;
pub use fitness::FitnessRecord;
pub use operators::Mutation;
pub use runner::{make_population, should_stop, GaResult, GaRunner, RunState};
pub use selection::Selection;
pub use summary::{BreedingCounters, GenerationStats, RunSummary};
pub use types::{Genome, Initialization, Item, ItemCatalog, Problem};
