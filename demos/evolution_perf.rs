//! Quick evolution performance test

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slot_span_ga::{
    BreedingStrategy, EvolutionConfig, EvolutionEngine, SLOT_COUNT, Schedule,
};
use std::time::Instant;

/// Seeded random schedule with `width` values per slot drawn from `0..pool`.
fn schedule(seed: u64, width: usize, pool: u64) -> Schedule<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..SLOT_COUNT)
        .map(|_| (0..width).map(|_| rng.gen_range(0..pool)).collect())
        .collect();
    Schedule::new(rows).expect("generated schedules have 12 rows of equal width")
}

fn main() {
    println!("=== Evolution Performance Test ===\n");

    // Test different slot widths
    for width in [4, 16, 64] {
        println!("Slot width: {}", width);

        let schedules: Vec<_> = (0..64).map(|i| schedule(i, width, width as u64 * 3)).collect();
        let config = EvolutionConfig {
            generations_unchanged: 40,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config);
        let result = engine.run(schedules).expect("evolution failed");
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best fitness:   {}", result.stats.best_fitness);
        println!();
    }

    println!("=== Scalability Test (fixed slot width 16) ===\n");

    // Test different population sizes and breeding strategies
    for pop_size in [16, 64, 256, 1024] {
        for breeding in [BreedingStrategy::Mutation, BreedingStrategy::Crossover] {
            let schedules: Vec<_> = (0..pop_size).map(|i| schedule(i, 16, 48)).collect();
            let config = EvolutionConfig {
                generations_unchanged: 20,
                breeding,
                random_seed: Some(42),
                ..Default::default()
            };

            let start = Instant::now();
            let mut engine = EvolutionEngine::new(config);
            let result = engine.run(schedules).expect("evolution failed");
            let elapsed = start.elapsed();

            let total_evals = result.stats.total_evaluations;
            let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

            println!(
                "Population {} ({:?}): {} evals in {:.2}s ({:.1} evals/sec)",
                pop_size,
                breeding,
                total_evals,
                elapsed.as_secs_f64(),
                evals_per_sec
            );
        }
    }
}
