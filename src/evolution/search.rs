//! Generational search loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::schema::{
    Assignment, BreedingStrategy, ConfigError, EvolutionConfig, EvolutionHistory,
    EvolutionProgress, EvolutionStats, Schedule, ScheduleError, StopReason,
};

use super::candidate::Candidate;
use super::population::{Population, SelectionError};
use super::rng::ScheduleRng;

/// Errors that abort an evolution run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("No starting solutions provided")]
    EmptyPopulation,
    #[error("Starting solution {index} is invalid: {source}")]
    InvalidSchedule {
        index: usize,
        #[source]
        source: ScheduleError,
    },
    #[error("Crossover task {index} failed: {source}")]
    WorkerTask {
        index: usize,
        #[source]
        source: ScheduleError,
    },
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] ThreadPoolBuildError),
    #[error("Parent selection failed: {0}")]
    Selection(#[from] SelectionError),
    #[error("Invalid evolution config: {0}")]
    Config(#[from] ConfigError),
}

/// Final result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<V> {
    /// Best candidate of the final population.
    pub best: Candidate<V>,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

/// Evolution engine that runs the search.
///
/// Holds only the configuration, the master RNG and the cancellation flag;
/// population and convergence state live for the duration of one run.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: ScheduleRng,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine {
    /// Create a new evolution engine.
    pub fn new(config: EvolutionConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => ScheduleRng::new(seed),
            None => ScheduleRng::random(),
        };

        Self {
            config,
            rng,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get cancellation handle.
    ///
    /// Setting the flag stops the run before the next generation starts; the
    /// best candidate so far is still returned.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Run evolution (blocking).
    pub fn run<V: Assignment>(
        &mut self,
        starting_solutions: Vec<Schedule<V>>,
    ) -> Result<EvolutionResult<V>, EvolutionError> {
        self.run_with_callback(starting_solutions, |_| {})
    }

    /// Run evolution with a progress callback invoked once per generation.
    pub fn run_with_callback<V, F>(
        &mut self,
        starting_solutions: Vec<Schedule<V>>,
        mut callback: F,
    ) -> Result<EvolutionResult<V>, EvolutionError>
    where
        V: Assignment,
        F: FnMut(&EvolutionProgress),
    {
        let start_time = Instant::now();

        if starting_solutions.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        self.config.validate()?;

        // Dropped (workers joined) on every return path below.
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.parallel_workers)
            .thread_name(|i| format!("slot-span-ga-{i}"))
            .build()?;

        let maximize = self.config.maximize;
        let limit = self.config.generations_unchanged;

        let candidates = evaluate_schedules(&pool, starting_solutions, maximize)?;
        let mut population = Population::new(candidates);
        let population_size = population.len();
        let mut total_evaluations = population_size as u64;

        let mut score = best_fitness(&population, maximize)?;
        let mut unchanged_count = 1;
        let mut generation = 0;
        let mut history = EvolutionHistory::default();

        debug!(
            "Evaluated {} starting solutions on {} workers, initial score {}",
            population_size,
            pool.current_num_threads(),
            score
        );

        let stop_reason = loop {
            if unchanged_count > limit {
                break StopReason::Stagnation;
            }

            if self.cancelled.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }

            if let Some(max) = self.config.max_generations
                && generation >= max
            {
                break StopReason::MaxGenerations;
            }

            let progress = EvolutionProgress {
                generation,
                direction: self.config.direction(),
                unchanged_count,
                generations_unchanged: limit,
                score,
                population_size: population.len(),
            };
            info!("{progress}");
            callback(&progress);

            // Selection
            let parent_count = population.len() / 8 * 2;
            let parents = population.weighted_sample(parent_count, &mut self.rng)?;

            // Breeding
            let offspring = breed(&pool, &parents, self.config.breeding, &mut self.rng)?;
            let offspring_count = offspring.len();
            total_evaluations += offspring_count as u64;

            // Replacement
            population.merge(offspring);
            population.prune_worst(offspring_count, maximize);
            debug_assert_eq!(population.len(), population_size);

            let new_score = best_fitness(&population, maximize)?;
            if new_score == score {
                unchanged_count += 1;
            } else {
                debug!("Generation {generation}: score {score} -> {new_score}");
                unchanged_count = 1;
                score = new_score;
            }

            history.best_fitness.push(score);
            history.avg_fitness.push(population.average_fitness());
            generation += 1;
        };

        let elapsed = start_time.elapsed().as_secs_f64();
        let final_avg_fitness = population.average_fitness();
        let best = population
            .into_extremum(maximize)
            .ok_or(EvolutionError::EmptyPopulation)?;

        info!(
            "Stopped after {generation} generations ({stop_reason:?}), best fitness {}",
            best.fitness()
        );

        Ok(EvolutionResult {
            stats: EvolutionStats {
                generations: generation,
                total_evaluations,
                best_fitness: best.fitness(),
                final_avg_fitness,
                elapsed_seconds: elapsed,
                stop_reason,
            },
            best,
            history,
        })
    }
}

/// Evolve `starting_solutions` with default settings and return the best candidate.
pub fn run<V: Assignment>(
    starting_solutions: Vec<Schedule<V>>,
    maximize: bool,
    generations_unchanged: usize,
) -> Result<Candidate<V>, EvolutionError> {
    let config = EvolutionConfig {
        maximize,
        generations_unchanged,
        ..Default::default()
    };
    EvolutionEngine::new(config)
        .run(starting_solutions)
        .map(|result| result.best)
}

fn best_fitness<V>(population: &Population<V>, maximize: bool) -> Result<u32, EvolutionError> {
    population
        .extremum(maximize)
        .map(Candidate::fitness)
        .ok_or(EvolutionError::EmptyPopulation)
}

/// Evaluate all starting schedules in parallel.
///
/// Every schedule must share the width of the first one, so crossover always
/// exchanges rows of equal length.
fn evaluate_schedules<V: Assignment>(
    pool: &ThreadPool,
    schedules: Vec<Schedule<V>>,
    maximize: bool,
) -> Result<Vec<Candidate<V>>, EvolutionError> {
    let expected = schedules.first().map_or(0, Schedule::width);
    if let Some((index, found)) = schedules
        .iter()
        .map(Schedule::width)
        .enumerate()
        .find(|&(_, width)| width != expected)
    {
        return Err(EvolutionError::InvalidSchedule {
            index,
            source: ScheduleError::WidthMismatch { expected, found },
        });
    }

    Ok(pool.install(|| {
        schedules
            .into_par_iter()
            .map(|schedule| Candidate::new(schedule, maximize))
            .collect()
    }))
}

/// Produce one child per parent according to the breeding strategy.
///
/// Every task gets its own RNG forked from `rng` before fan-out, so results
/// do not depend on thread scheduling.
fn breed<V: Assignment>(
    pool: &ThreadPool,
    parents: &[Candidate<V>],
    strategy: BreedingStrategy,
    rng: &mut ScheduleRng,
) -> Result<Vec<Candidate<V>>, EvolutionError> {
    match strategy {
        BreedingStrategy::Mutation => {
            let task_rngs: Vec<ScheduleRng> = parents.iter().map(|_| rng.fork()).collect();
            Ok(pool.install(|| {
                parents
                    .par_iter()
                    .zip(task_rngs)
                    .map(|(parent, mut task_rng)| parent.mutate(&mut task_rng))
                    .collect()
            }))
        }
        BreedingStrategy::Crossover => {
            let task_rngs: Vec<ScheduleRng> =
                parents.chunks_exact(2).map(|_| rng.fork()).collect();
            let pairs: Vec<(Candidate<V>, Candidate<V>)> = pool.install(|| {
                parents
                    .par_chunks_exact(2)
                    .zip(task_rngs)
                    .enumerate()
                    .map(|(index, (pair, mut task_rng))| {
                        pair[0]
                            .mate(&pair[1], &mut task_rng)
                            .map_err(|source| EvolutionError::WorkerTask { index, source })
                    })
                    .collect::<Result<_, _>>()
            })?;
            Ok(pairs
                .into_iter()
                .flat_map(|(first, second)| [first, second])
                .collect())
        }
    }
}
