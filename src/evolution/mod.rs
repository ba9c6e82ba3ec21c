//! Evolutionary search over slot schedules.
//!
//! This module provides the candidate representation, the population
//! operators, and the generational engine that drives them.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Candidates** (`candidate`): evaluated schedules with crossover and mutation
//! - **Population** (`population`): weighted parent sampling, pruning, extrema
//! - **Search** (`search`): the generation loop and its worker pool
//!
//! # Example
//!
//! ```rust,no_run
//! use slot_span_ga::evolution::EvolutionEngine;
//! use slot_span_ga::schema::{EvolutionConfig, Schedule, SLOT_COUNT};
//!
//! let schedules: Vec<Schedule<u32>> = (0..16)
//!     .map(|i| Schedule::new((0..SLOT_COUNT as u32).map(|r| vec![(r + i) % 5]).collect()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default());
//! let result = engine
//!     .run_with_callback(schedules, |progress| println!("{progress}"))
//!     .unwrap();
//!
//! println!("Best fitness: {}", result.best.fitness());
//! ```
//!
//! # Breeding
//!
//! - `BreedingStrategy::Mutation`: every sampled parent is mutated independently
//! - `BreedingStrategy::Crossover`: consecutive parents are paired and mated

mod candidate;
mod population;
mod rng;
mod search;

pub use candidate::{CROSSOVER_ROWS, Candidate, FITNESS_CEILING, MUTATION_ROWS};
pub use population::{Population, SelectionError};
pub use rng::ScheduleRng;
pub use search::{EvolutionEngine, EvolutionError, EvolutionResult, run};
