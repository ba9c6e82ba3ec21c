//! Population-level operations: weighted parent sampling, pruning, extrema.

use std::cmp::Reverse;

use rand::distributions::WeightedError;
use rand::seq::SliceRandom;

use super::candidate::{Candidate, FITNESS_CEILING};
use super::rng::ScheduleRng;

/// Ordered collection of candidates.
#[derive(Debug, Clone, Default)]
pub struct Population<V> {
    members: Vec<Candidate<V>>,
}

impl<V> Population<V> {
    pub fn new(members: Vec<Candidate<V>>) -> Self {
        Self { members }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Candidate<V>] {
        &self.members
    }

    /// Append offspring to the end of the population.
    pub fn merge(&mut self, offspring: Vec<Candidate<V>>) {
        self.members.extend(offspring);
    }

    /// Remove the `count` worst members.
    ///
    /// When maximizing the lowest-fitness members go, otherwise the highest.
    /// Among equal fitness the earliest members are removed first. The
    /// remaining members keep their relative order.
    pub fn prune_worst(&mut self, count: usize, maximize: bool) {
        let count = count.min(self.members.len());
        if count == 0 {
            return;
        }

        let mut order: Vec<usize> = (0..self.members.len()).collect();
        if maximize {
            order.sort_by_key(|&i| self.members[i].fitness());
        } else {
            order.sort_by_key(|&i| Reverse(self.members[i].fitness()));
        }

        let mut doomed = vec![false; self.members.len()];
        for &i in &order[..count] {
            doomed[i] = true;
        }

        let mut index = 0;
        self.members.retain(|_| {
            let keep = !doomed[index];
            index += 1;
            keep
        });
    }

    /// Best member: highest fitness when maximizing, lowest otherwise.
    pub fn extremum(&self, maximize: bool) -> Option<&Candidate<V>> {
        if maximize {
            self.members.iter().max()
        } else {
            self.members.iter().min()
        }
    }

    /// Consume the population, returning its best member.
    pub fn into_extremum(self, maximize: bool) -> Option<Candidate<V>> {
        if maximize {
            self.members.into_iter().max()
        } else {
            self.members.into_iter().min()
        }
    }

    pub fn average_fitness(&self) -> f32 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|c| c.fitness() as f32).sum::<f32>() / self.members.len() as f32
    }
}

impl<V: Clone> Population<V> {
    /// Sample `count` distinct members, weighted by `13 - fitness`.
    ///
    /// The weight ignores the optimization direction: when minimizing it
    /// favours the lowest (best) spans, when maximizing it favours the
    /// lowest-fitness (worst) members. Callers relying on either direction
    /// get the same weighting.
    pub fn weighted_sample(
        &self,
        count: usize,
        rng: &mut ScheduleRng,
    ) -> Result<Vec<Candidate<V>>, SelectionError> {
        if count > self.members.len() {
            return Err(SelectionError::SampleTooLarge {
                requested: count,
                available: self.members.len(),
            });
        }

        let sampled = self
            .members
            .choose_multiple_weighted(rng.inner(), count, |c| {
                FITNESS_CEILING.saturating_sub(c.fitness())
            })?
            .cloned()
            .collect();
        Ok(sampled)
    }
}

/// Parent selection errors.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Cannot sample {requested} parents from a population of {available}")]
    SampleTooLarge { requested: usize, available: usize },
    #[error("Invalid selection weights: {0}")]
    Weights(#[from] WeightedError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SLOT_COUNT, Schedule};

    /// Rows past the span hold single-row filler values at or above this.
    const FILLER: u32 = 1000;

    /// Candidate whose longest span is exactly `span` rows of `tag`.
    fn with_span(span: usize, tag: u32, maximize: bool) -> Candidate<u32> {
        let rows = (0..SLOT_COUNT)
            .map(|i| {
                if i < span {
                    vec![tag]
                } else {
                    vec![FILLER + tag * SLOT_COUNT as u32 + i as u32]
                }
            })
            .collect();
        Candidate::new(Schedule::new(rows).unwrap(), maximize)
    }

    fn tag(candidate: &Candidate<u32>) -> u32 {
        *candidate.durations().keys().min().unwrap()
    }

    fn population(spans: &[usize], maximize: bool) -> Population<u32> {
        Population::new(
            spans
                .iter()
                .enumerate()
                .map(|(i, &span)| with_span(span, i as u32, maximize))
                .collect(),
        )
    }

    fn tags(population: &Population<u32>) -> Vec<u32> {
        population.members().iter().map(tag).collect()
    }

    #[test]
    fn test_extremum() {
        let maximizing = population(&[5, 2, 9, 2], true);
        assert_eq!(maximizing.extremum(true).unwrap().longest_span(), 2);

        let minimizing = population(&[5, 2, 9, 2], false);
        assert_eq!(minimizing.extremum(false).unwrap().fitness(), 2);

        assert!(Population::<u32>::default().extremum(true).is_none());
    }

    #[test]
    fn test_prune_worst_maximize_removes_lowest_fitness() {
        // Spans 5, 2, 9, 12 -> fitness 8, 11, 4, 1.
        let mut pop = population(&[5, 2, 9, 12], true);
        pop.prune_worst(2, true);
        assert_eq!(tags(&pop), vec![0, 1]);
    }

    #[test]
    fn test_prune_worst_minimize_removes_highest_fitness() {
        let mut pop = population(&[5, 2, 9, 12], false);
        pop.prune_worst(2, false);
        assert_eq!(tags(&pop), vec![0, 1]);
    }

    #[test]
    fn test_prune_worst_ties_remove_earliest() {
        let mut pop = population(&[4, 4, 1, 4], false);
        pop.prune_worst(2, false);
        assert_eq!(tags(&pop), vec![2, 3]);
    }

    #[test]
    fn test_prune_worst_clamps_count() {
        let mut pop = population(&[3, 4], true);
        pop.prune_worst(5, true);
        assert!(pop.is_empty());
    }

    #[test]
    fn test_merge_then_prune_restores_size() {
        let mut pop = population(&[6, 7, 8, 9], true);
        pop.merge(vec![with_span(1, 10, true), with_span(12, 11, true)]);
        assert_eq!(pop.len(), 6);
        pop.prune_worst(2, true);
        assert_eq!(pop.len(), 4);
        assert_eq!(tags(&pop), vec![0, 1, 2, 10]);
    }

    #[test]
    fn test_weighted_sample_without_replacement() {
        let pop = population(&[1, 2, 3, 4, 5, 6, 7, 8], true);
        let mut rng = ScheduleRng::new(42);

        for _ in 0..50 {
            let sample = pop.weighted_sample(4, &mut rng).unwrap();
            assert_eq!(sample.len(), 4);
            let mut picked: Vec<u32> = sample.iter().map(tag).collect();
            picked.sort_unstable();
            picked.dedup();
            assert_eq!(picked.len(), 4);
        }
    }

    #[test]
    fn test_weighted_sample_prefers_low_fitness() {
        // Maximizing: span 12 -> fitness 1 -> weight 12; span 1 -> fitness 12 -> weight 1.
        let pop = population(&[12, 1], true);
        let mut rng = ScheduleRng::new(9);

        let heavy_first = (0..1000)
            .filter(|_| pop.weighted_sample(1, &mut rng).unwrap()[0].fitness() == 1)
            .count();
        assert!(heavy_first > 800, "picked heavy member {heavy_first}/1000 times");
    }

    #[test]
    fn test_weighted_sample_minimize_uses_same_weights() {
        // Minimizing: span 1 -> fitness 1 -> weight 12; span 12 -> fitness 12 -> weight 1.
        let pop = population(&[12, 1], false);
        let mut rng = ScheduleRng::new(9);

        let shortest_span = (0..1000)
            .filter(|_| pop.weighted_sample(1, &mut rng).unwrap()[0].longest_span() == 1)
            .count();
        assert!(shortest_span > 800, "picked span-1 member {shortest_span}/1000 times");
    }

    #[test]
    fn test_weighted_sample_too_large() {
        let pop = population(&[1, 2], true);
        let err = pop.weighted_sample(3, &mut ScheduleRng::new(0)).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::SampleTooLarge {
                requested: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_average_fitness() {
        let pop = population(&[2, 4], false);
        assert!((pop.average_fitness() - 3.0).abs() < 1e-6);
        assert_eq!(Population::<u32>::default().average_fitness(), 0.0);
    }
}
