//! Slot span GA - evolve assignment schedules toward short (or long) value spans.
//!
//! A schedule is a table of 12 ordered slots, each listing the same number of
//! assigned values. The span of a value is the number of slots from its first
//! to its last appearance. This crate runs a generational genetic algorithm
//! over a caller supplied population of schedules, minimizing the longest span
//! (or maximizing `13 - longest span`).
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Schedule representation, configuration and progress types
//! - `evolution`: Candidates, population operators and the search engine
//!
//! # Example
//!
//! ```rust,no_run
//! use slot_span_ga::{Schedule, run};
//!
//! let schedules: Vec<Schedule<String>> = Schedule::load_all("schedules.json").unwrap();
//! let best = run(schedules, true, 40).unwrap();
//!
//! println!("Best fitness: {}", best.fitness());
//! println!("{}", best.schedule());
//! ```

pub mod evolution;
pub mod schema;

// Re-export commonly used types
pub use evolution::{Candidate, EvolutionEngine, EvolutionError, EvolutionResult, run};
pub use schema::{BreedingStrategy, EvolutionConfig, SLOT_COUNT, Schedule, ScheduleError};
