//! Error types for knapsack-ga.
//!
//! Configuration problems are reported before any generation runs.
//! A degenerate generation is not fatal; it is surfaced so callers can
//! decide whether to care.

use thiserror::Error;

/// Invalid run configuration or problem definition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Population must hold at least one breeding pair.
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    /// At least one generation must be produced.
    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    /// A probability parameter is outside `[0, 1]` or NaN.
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    /// Tournament selection needs at least one contestant.
    #[error("tournament size must be at least 1")]
    EmptyTournament,

    /// Convergence tolerance must be a non-negative finite number.
    #[error("convergence_tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    /// Value and weight columns have different lengths.
    #[error("item count mismatch: {values} values, {weights} weights")]
    ItemCountMismatch { values: usize, weights: usize },

    /// The catalog has no items.
    #[error("item catalog must not be empty")]
    EmptyCatalog,

    /// An item value or weight is negative or not finite.
    #[error("item {index} has invalid {field}: {value}")]
    InvalidItem {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// Knapsack capacity is negative or not finite.
    #[error("capacity must be finite and non-negative, got {0}")]
    InvalidCapacity(f64),
}

/// Every genome of a generation exceeded the capacity.
///
/// Selection still returns valid indices in this case; the error only
/// reports the condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("generation {generation} is degenerate: every genome is infeasible")]
pub struct DegenerateGeneration {
    /// Generation number (0 = initial population).
    pub generation: usize,
}

/// A genome string contained something other than `'0'` or `'1'`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid genome character {found:?} at position {position}")]
pub struct ParseGenomeError {
    /// Zero-based character position.
    pub position: usize,
    /// The offending character.
    pub found: char,
}
