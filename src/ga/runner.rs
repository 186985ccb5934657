//! GA evolutionary loop execution.
//!
//! [`GaRunner`] owns all mutable run state (random source, population,
//! fitness record, summary) and is its only writer. Each call to
//! [`GaRunner::step`] performs one state transition:
//!
//! ```text
//! Initial → Breeding(1) → Breeding(2) → … → Converged | Exhausted
//! ```

use super::config::GaConfig;
use super::fitness::FitnessRecord;
use super::operators::{recombine, Outcome};
use super::summary::{BreedingCounters, GenerationStats, RunSummary};
use super::types::{Genome, Initialization, Problem};
use crate::error::ConfigError;
use crate::random::create_rng;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::instrument;

/// Where the engine is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing has been generated yet.
    Initial,
    /// The next step breeds generation `g`.
    Breeding(usize),
    /// Average fitness stopped changing; no further generations.
    Converged,
    /// `max_generations` generations were recorded.
    Exhausted,
}

impl RunState {
    /// Whether the run has stopped.
    pub fn is_finished(self) -> bool {
        matches!(self, RunState::Converged | RunState::Exhausted)
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best genome over all recorded generations.
    pub best: Genome,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// One-based indices of the items packed by `best`.
    pub optimal_items: Vec<usize>,

    /// Number of recorded generations, the initial one included.
    pub generations: usize,

    /// `Converged` or `Exhausted`.
    pub state: RunState,

    /// Every recorded generation.
    pub summary: RunSummary,
}

impl GaResult {
    /// Whether the run stopped on the convergence criterion.
    pub fn converged(&self) -> bool {
        self.state == RunState::Converged
    }
}

/// Stop criterion checked before breeding generation `generation`.
///
/// Only applies once more than four generations exist (`generation > 4`).
/// The average fitness values of generations `generation - 1`,
/// `generation - 2` and `generation - 3` must be exactly equal, or lie
/// within `tolerance` of each other when `tolerance > 0`.
pub fn should_stop(summary: &RunSummary, generation: usize, tolerance: f64) -> bool {
    if generation <= 4 {
        return false;
    }
    let average = |g: usize| summary.get(g).map(|s| s.average_fitness);
    let (Some(a), Some(b), Some(c)) = (
        average(generation - 1),
        average(generation - 2),
        average(generation - 3),
    ) else {
        return false;
    };

    if tolerance == 0.0 {
        a == b && b == c
    } else {
        let spread = a.max(b).max(c) - a.min(b).min(c);
        spread <= tolerance
    }
}

/// Executes the GA evolutionary loop for one knapsack instance.
///
/// # Usage
///
/// ```
/// use knapsack_ga::ga::{GaConfig, GaRunner, Problem};
///
/// let problem = Problem::demo();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::solve(&problem, &config).unwrap();
/// assert!(result.best_fitness > 0.0);
/// assert!(!result.optimal_items.is_empty());
/// ```
#[derive(Debug)]
pub struct GaRunner<'p> {
    problem: &'p Problem,
    config: GaConfig,
    rng: StdRng,
    state: RunState,
    population: Vec<Genome>,
    fitness: FitnessRecord,
    summary: RunSummary,
}

impl<'p> GaRunner<'p> {
    /// Validates `config` and prepares a run. No genome is drawn yet.
    pub fn new(problem: &'p Problem, config: GaConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        Ok(Self {
            problem,
            rng,
            state: RunState::Initial,
            population: Vec::with_capacity(config.population_size),
            fitness: FitnessRecord::default(),
            summary: RunSummary::new(),
            config,
        })
    }

    /// Runs a whole optimization and returns its result.
    pub fn solve(problem: &'p Problem, config: &GaConfig) -> Result<GaResult, ConfigError> {
        Ok(Self::new(problem, config.clone())?.run())
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Current population.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Fitness of the current population.
    pub fn fitness(&self) -> &FitnessRecord {
        &self.fitness
    }

    /// Generations recorded so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Runs until the run converges or is exhausted.
    pub fn run(self) -> GaResult {
        self.run_with(|_| {})
    }

    /// Runs to completion, calling `on_generation` after each recorded
    /// generation (the initial one included).
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            items = self.problem.item_count(),
            population_size = self.config.population_size,
            max_generations = self.config.max_generations,
        )
    )]
    pub fn run_with<F>(mut self, mut on_generation: F) -> GaResult
    where
        F: FnMut(&GenerationStats),
    {
        while !self.state.is_finished() {
            let before = self.summary.len();
            self.step();
            if self.summary.len() > before {
                if let Some(stats) = self.summary.last() {
                    on_generation(stats);
                }
            }
        }
        self.into_result()
    }

    /// Performs one state transition and returns the new state.
    ///
    /// Finished runs stay where they are.
    pub fn step(&mut self) -> RunState {
        let previous = self.state;
        self.state = match previous {
            RunState::Initial => {
                self.initialize();
                self.next_after(0)
            }
            RunState::Breeding(g) => {
                if should_stop(&self.summary, g, self.config.convergence_tolerance) {
                    tracing::info!(
                        generation = g,
                        average_fitness = self.summary.last().map(|s| s.average_fitness),
                        "average fitness converged"
                    );
                    RunState::Converged
                } else {
                    self.breed(g);
                    self.next_after(g)
                }
            }
            finished => finished,
        };
        if self.state == RunState::Exhausted && previous != RunState::Exhausted {
            tracing::info!(generations = self.summary.len(), "generation limit reached");
        }
        self.state
    }

    fn next_after(&self, g: usize) -> RunState {
        if g + 1 >= self.config.max_generations {
            RunState::Exhausted
        } else {
            RunState::Breeding(g + 1)
        }
    }

    fn initialize(&mut self) {
        let n = self.problem.item_count();
        self.population = make_population(
            self.config.population_size,
            n,
            self.config.initialization,
            &mut self.rng,
        );
        self.fitness = self.problem.evaluate_population(&self.population);
        self.record(0, BreedingCounters::default());
    }

    /// Breeds generation `g` from the current population and replaces it.
    fn breed(&mut self, g: usize) {
        let size = self.config.population_size;
        let mut counters = BreedingCounters::default();
        let mut buffer: Vec<Genome> = Vec::with_capacity(size);

        // Odd sizes carry the previous best over verbatim, once.
        let elite_slots = size % 2;
        if elite_slots == 1 {
            if let Some(prev) = self.summary.last() {
                buffer.push(prev.best_genome.clone());
            }
        }

        while buffer.len() < size {
            let a = self.config.selection.select(&self.fitness, &mut self.rng);
            let b = self.config.selection.select(&self.fitness, &mut self.rng);

            let offspring = recombine(
                &self.population[a],
                &self.population[b],
                self.config.crossover_probability,
                &mut self.rng,
            );
            match offspring.outcome {
                Outcome::Crossover { .. } => counters.crossovers += 1,
                Outcome::Clone => counters.clones += 1,
            }
            buffer.push(offspring.first);
            buffer.push(offspring.second);

            let bred = &mut buffer[elite_slots..];
            if self
                .config
                .mutation
                .apply(bred, self.config.mutation_probability, &mut self.rng)
                .is_some()
            {
                counters.mutations += 1;
            }
        }
        buffer.truncate(size);

        self.fitness = self.problem.evaluate_population(&buffer);
        self.population = buffer;
        self.record(g, counters);
    }

    fn record(&mut self, g: usize, counters: BreedingCounters) {
        debug_assert_eq!(self.fitness.len(), self.population.len());
        let stats = GenerationStats::from_population(
            g,
            self.population.clone(),
            self.fitness.clone(),
            counters,
        );

        tracing::debug!(
            generation = g,
            best_fitness = stats.best_fitness,
            average_fitness = stats.average_fitness,
            crossovers = counters.crossovers,
            clones = counters.clones,
            mutations = counters.mutations,
            "generation recorded"
        );
        if let Err(err) = stats.ensure_feasible() {
            tracing::warn!(%err, "no feasible genome in generation");
        }

        self.summary.push(stats);
    }

    fn into_result(self) -> GaResult {
        let (best, best_fitness) = self
            .summary
            .best_generation()
            .map(|s| (s.best_genome.clone(), s.best_fitness))
            .unwrap_or_else(|| (Genome::zeros(self.problem.item_count()), 0.0));

        GaResult {
            best,
            best_fitness,
            optimal_items: self.summary.optimal_items(),
            generations: self.summary.len(),
            state: self.state,
            summary: self.summary,
        }
    }
}

/// Draws `size` independent random genomes of `n_items` bits.
pub fn make_population<R: Rng>(
    size: usize,
    n_items: usize,
    init: Initialization,
    rng: &mut R,
) -> Vec<Genome> {
    (0..size).map(|_| Genome::random(n_items, init, rng)).collect()
}

// ============================================================================
// Tests
// ============================================================================
