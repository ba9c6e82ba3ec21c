//! Candidate schedules and their span-based fitness.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::schema::{Assignment, SLOT_COUNT, Schedule, ScheduleError};

use super::rng::ScheduleRng;

/// One more than the slot count, so maximize-mode fitness is always positive.
pub const FITNESS_CEILING: u32 = SLOT_COUNT as u32 + 1;

/// Rows exchanged between parents during crossover.
pub const CROSSOVER_ROWS: usize = 6;

/// Rows touched by a mutation (two disjoint swaps).
pub const MUTATION_ROWS: usize = 4;

/// A schedule together with its evaluated fitness.
///
/// Immutable once built. Ordering and equality compare `fitness` only, never
/// the schedule contents.
#[derive(Debug, Clone)]
pub struct Candidate<V> {
    schedule: Schedule<V>,
    maximize: bool,
    durations: HashMap<V, u32>,
    fitness: u32,
}

impl<V: Assignment> Candidate<V> {
    /// Evaluate a schedule.
    ///
    /// Each value's duration is the number of rows from its first to its last
    /// occurrence, inclusive. Fitness is the longest duration when minimizing
    /// and `13 - longest` when maximizing.
    pub fn new(schedule: Schedule<V>, maximize: bool) -> Self {
        let durations: HashMap<V, u32> = schedule
            .occupancy()
            .into_iter()
            .map(|(value, (first, last))| (value, (last - first + 1) as u32))
            .collect();

        // Rows are never empty, so there is always at least one duration.
        let longest = durations.values().copied().max().unwrap_or(1);

        let fitness = if maximize {
            FITNESS_CEILING - longest
        } else {
            longest
        };

        Self {
            schedule,
            maximize,
            durations,
            fitness,
        }
    }

    /// Uniform row crossover.
    ///
    /// Picks [`CROSSOVER_ROWS`] distinct rows; the first child is `self` with
    /// those rows taken from `other`, the second is the mirror image. Both
    /// parents must have the same schedule width.
    pub fn mate(
        &self,
        other: &Self,
        rng: &mut ScheduleRng,
    ) -> Result<(Self, Self), ScheduleError> {
        let rows = rng.distinct_rows(CROSSOVER_ROWS);
        let first = self.schedule.with_rows_from(&other.schedule, &rows)?;
        let second = other.schedule.with_rows_from(&self.schedule, &rows)?;

        Ok((
            Self::new(first, self.maximize),
            Self::new(second, self.maximize),
        ))
    }

    /// Swap two disjoint pairs of rows in a copy of this schedule.
    ///
    /// Rows are paired in draw order: `(a, b)` and `(c, d)`.
    pub fn mutate(&self, rng: &mut ScheduleRng) -> Self {
        let rows = rng.distinct_rows(MUTATION_ROWS);
        let mut child = self.schedule.clone();
        for pair in rows.chunks_exact(2) {
            child.swap_rows(pair[0], pair[1]);
        }
        Self::new(child, self.maximize)
    }
}

impl<V> Candidate<V> {
    #[inline]
    pub fn fitness(&self) -> u32 {
        self.fitness
    }

    #[inline]
    pub fn schedule(&self) -> &Schedule<V> {
        &self.schedule
    }

    #[inline]
    pub fn maximize(&self) -> bool {
        self.maximize
    }

    /// Span of every distinct value, in rows.
    #[inline]
    pub fn durations(&self) -> &HashMap<V, u32> {
        &self.durations
    }

    /// Longest span in the schedule, independent of the optimization direction.
    pub fn longest_span(&self) -> u32 {
        if self.maximize {
            FITNESS_CEILING - self.fitness
        } else {
            self.fitness
        }
    }
}

impl<V> PartialEq for Candidate<V> {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl<V> Eq for Candidate<V> {}

impl<V> PartialOrd for Candidate<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for Candidate<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness.cmp(&other.fitness)
    }
}

impl<V: fmt::Display> fmt::Display for Candidate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fitness: {}", self.fitness)?;
        write!(f, "{}", self.schedule)
    }
}
