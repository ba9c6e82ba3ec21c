//! Random number generation for schedule operators.

use rand::prelude::*;
use rand::seq::index;

use crate::schema::SLOT_COUNT;

/// Random number generator wrapper for schedule operations.
///
/// The engine owns one master instance and hands every worker task its own
/// child generator seeded from [`ScheduleRng::next_seed`], so a seeded run
/// produces the same result no matter how tasks are scheduled.
#[derive(Debug, Clone)]
pub struct ScheduleRng {
    rng: StdRng,
}

impl ScheduleRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw `amount` distinct row indices, uniformly and in draw order.
    ///
    /// # Panics
    ///
    /// Panics if `amount` exceeds [`SLOT_COUNT`].
    pub fn distinct_rows(&mut self, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, SLOT_COUNT, amount).into_vec()
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }

    /// Child generator for a single worker task.
    pub fn fork(&mut self) -> Self {
        Self::new(self.next_seed())
    }

    pub(crate) fn inner(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
