//! Per-generation statistics and the run summary.
//!
//! [`RunSummary`] is an append-only log of [`GenerationStats`], indexed by
//! generation number. It also picks the final answer: the best genome
//! recorded in any generation.

use super::fitness::FitnessRecord;
use super::types::Genome;
use crate::error::DegenerateGeneration;
use std::fmt::{self, Write as _};

/// Operator counters for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreedingCounters {
    /// Pairs that were spliced.
    pub crossovers: usize,
    /// Pairs that were copied unchanged.
    pub clones: usize,
    /// Bit flips applied.
    pub mutations: usize,
}

/// Snapshot of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number; 0 is the initial random population.
    pub generation: usize,

    /// The population, in slot order.
    pub population: Vec<Genome>,

    /// Fitness values aligned with `population`.
    pub fitness: FitnessRecord,

    /// Fittest genome (first one on ties).
    pub best_genome: Genome,

    /// Fitness of `best_genome`.
    pub best_fitness: f64,

    /// Mean fitness of the population.
    pub average_fitness: f64,

    /// Operator counts for the breeding that produced this generation.
    /// All zero for generation 0.
    pub counters: BreedingCounters,
}

impl GenerationStats {
    /// Summarizes an evaluated population.
    ///
    /// # Panics
    /// Panics if `population` is empty or not aligned with `fitness`.
    pub fn from_population(
        generation: usize,
        population: Vec<Genome>,
        fitness: FitnessRecord,
        counters: BreedingCounters,
    ) -> Self {
        assert_eq!(
            population.len(),
            fitness.len(),
            "fitness record must align with population"
        );
        let best = fitness
            .best_index()
            .expect("population must not be empty");
        Self {
            generation,
            best_genome: population[best].clone(),
            best_fitness: fitness.values()[best],
            average_fitness: fitness.average(),
            population,
            fitness,
            counters,
        }
    }

    /// Whether any bit flip happened while breeding this generation.
    pub fn mutation_occurred(&self) -> bool {
        self.counters.mutations > 0
    }

    /// Fails when every genome in the generation is infeasible.
    pub fn ensure_feasible(&self) -> Result<(), DegenerateGeneration> {
        if self.fitness.total() > 0.0 {
            Ok(())
        } else {
            Err(DegenerateGeneration {
                generation: self.generation,
            })
        }
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            writeln!(f, "Initial generation")?;
        } else {
            writeln!(f, "Generation {}", self.generation)?;
        }
        writeln!(f, "Population:")?;
        for (i, genome) in self.population.iter().enumerate() {
            writeln!(f, "{} - {}", i + 1, genome)?;
        }
        writeln!(f, "Fitness:")?;
        for (i, value) in self.fitness.values().iter().enumerate() {
            writeln!(f, "{} - {}", i + 1, value)?;
        }
        writeln!(f, "Best solution: {}", self.best_genome)?;
        writeln!(f, "Best fitness: {}", self.best_fitness)?;
        writeln!(f, "Average fitness: {}", self.average_fitness)?;
        if self.generation > 0 {
            writeln!(f, "Crossover: {} times", self.counters.crossovers)?;
            writeln!(f, "Cloning: {} times", self.counters.clones)?;
            writeln!(f, "Mutation: {} times", self.counters.mutations)?;
        }
        Ok(())
    }
}

/// Append-only log of every recorded generation.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    generations: Vec<GenerationStats>,
}

impl RunSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next generation.
    ///
    /// # Panics
    /// Panics if `stats.generation` is not the next generation number.
    pub fn push(&mut self, stats: GenerationStats) {
        assert_eq!(
            stats.generation,
            self.generations.len(),
            "generations must be appended in order"
        );
        self.generations.push(stats);
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Stats of generation `g`.
    pub fn get(&self, g: usize) -> Option<&GenerationStats> {
        self.generations.get(g)
    }

    /// The most recent generation.
    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// All generations in order.
    pub fn generations(&self) -> &[GenerationStats] {
        &self.generations
    }

    /// Average fitness per generation.
    pub fn average_history(&self) -> Vec<f64> {
        self.generations.iter().map(|s| s.average_fitness).collect()
    }

    /// Best fitness per generation.
    pub fn best_history(&self) -> Vec<f64> {
        self.generations.iter().map(|s| s.best_fitness).collect()
    }

    /// The generation holding the highest best fitness; the earliest one
    /// wins ties.
    pub fn best_generation(&self) -> Option<&GenerationStats> {
        let mut best: Option<&GenerationStats> = None;
        for stats in &self.generations {
            match best {
                Some(b) if b.best_fitness >= stats.best_fitness => {}
                _ => best = Some(stats),
            }
        }
        best
    }

    /// One-based indices of the items packed by the best genome found.
    ///
    /// Empty when nothing has been recorded.
    pub fn optimal_items(&self) -> Vec<usize> {
        self.best_generation()
            .map(|s| s.best_genome.selected().map(|i| i + 1).collect())
            .unwrap_or_default()
    }

    /// Plain-text report of every generation followed by the optimal list.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for stats in &self.generations {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{stats}");
        }
        let items: Vec<String> = self
            .optimal_items()
            .iter()
            .map(ToString::to_string)
            .collect();
        let _ = writeln!(
            out,
            "Optimal list of items to include in knapsack: {}",
            items.join(" ")
        );
        out
    }
}
