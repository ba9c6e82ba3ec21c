//! Evolution configuration types for schedule span optimization.
//!
//! This module provides types for configuring the generational search and
//! for reporting its progress and final statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Maximize `13 - longest span` instead of minimizing the longest span.
    #[serde(default = "default_maximize")]
    pub maximize: bool,
    /// Stop once the best fitness has been unchanged for this many generations.
    #[serde(default = "default_generations_unchanged")]
    pub generations_unchanged: usize,
    /// How offspring are produced from the sampled parents.
    #[serde(default)]
    pub breeding: BreedingStrategy,
    /// Hard cap on the number of generations, regardless of progress.
    #[serde(default)]
    pub max_generations: Option<usize>,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Number of worker threads (0 = auto-detect).
    #[serde(default)]
    pub parallel_workers: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            maximize: default_maximize(),
            generations_unchanged: default_generations_unchanged(),
            breeding: BreedingStrategy::default(),
            max_generations: None,
            random_seed: None,
            parallel_workers: 0,
        }
    }
}

fn default_maximize() -> bool {
    true
}
fn default_generations_unchanged() -> usize {
    40
}

/// Offspring production strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BreedingStrategy {
    /// Mutate every sampled parent independently (one child per parent).
    #[default]
    Mutation,
    /// Pair consecutive parents and cross them over (two children per pair).
    Crossover,
}

/// Optimization direction, derived from the `maximize` flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Maximizing,
    Minimizing,
}

impl Direction {
    pub fn from_maximize(maximize: bool) -> Self {
        if maximize {
            Self::Maximizing
        } else {
            Self::Minimizing
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maximizing => f.write_str("Maximizing"),
            Self::Minimizing => f.write_str("Minimizing"),
        }
    }
}

// ============================================================================
// Progress and Result Types
// ============================================================================

/// Progress update emitted once per generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Current generation number (0 = first generation after evaluation).
    pub generation: usize,
    /// Optimization direction.
    pub direction: Direction,
    /// Consecutive generations without a change of the best fitness.
    pub unchanged_count: usize,
    /// Stagnation threshold of this run.
    pub generations_unchanged: usize,
    /// Best fitness in the current population.
    pub score: u32,
    /// Current population size.
    pub population_size: usize,
}

impl fmt::Display for EvolutionProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fitness [{}/{}]: {}",
            self.direction, self.unchanged_count, self.generations_unchanged, self.score
        )
    }
}

/// Evolution history for analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Best fitness per generation.
    pub best_fitness: Vec<u32>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f32>,
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Total generations run.
    pub generations: usize,
    /// Total candidate evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: u32,
    /// Average fitness of final population.
    pub final_avg_fitness: f32,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Best fitness unchanged for the configured number of generations.
    Stagnation,
    /// Reached maximum generations.
    MaxGenerations,
    /// User cancelled.
    Cancelled,
}

// ============================================================================
// Validation
// ============================================================================

/// Evolution configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Maximum generations must be positive when set")]
    ZeroMaxGenerations,
}

impl EvolutionConfig {
    /// Validate evolution configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_generations == Some(0) {
            return Err(ConfigError::ZeroMaxGenerations);
        }
        Ok(())
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_maximize(self.maximize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.maximize);
        assert_eq!(config.generations_unchanged, 40);
        assert_eq!(config.breeding, BreedingStrategy::Mutation);
    }

    #[test]
    fn test_zero_max_generations_rejected() {
        let config = EvolutionConfig {
            max_generations: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroMaxGenerations)
        ));
    }

    #[test]
    fn test_serialization() {
        let config = EvolutionConfig {
            breeding: BreedingStrategy::Crossover,
            random_seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EvolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.breeding, BreedingStrategy::Crossover);
        assert_eq!(parsed.random_seed, Some(7));
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let parsed: EvolutionConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.maximize);
        assert_eq!(parsed.generations_unchanged, 40);
        assert_eq!(parsed.max_generations, None);
        assert_eq!(parsed.parallel_workers, 0);
    }

    #[test]
    fn test_progress_display() {
        let progress = EvolutionProgress {
            generation: 3,
            direction: Direction::Minimizing,
            unchanged_count: 2,
            generations_unchanged: 40,
            score: 7,
            population_size: 16,
        };
        assert_eq!(progress.to_string(), "Minimizing fitness [2/40]: 7");
    }
}
