//! Benchmarks for candidate evaluation and full evolution runs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use slot_span_ga::{
    BreedingStrategy, Candidate, EvolutionConfig, EvolutionEngine, SLOT_COUNT, Schedule,
};

/// Schedule with `width` values per slot drawn from a small rotating pool.
fn schedule(offset: usize, width: usize) -> Schedule<u32> {
    let rows = (0..SLOT_COUNT)
        .map(|row| {
            (0..width)
                .map(|col| ((row * 7 + col * 3 + offset) % (width * 4)) as u32)
                .collect()
        })
        .collect();
    Schedule::new(rows).unwrap()
}

fn bench_candidate_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_evaluation");

    for width in [4, 16, 64] {
        let schedule = schedule(0, width);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_per_slot", width)),
            &width,
            |b, _| {
                b.iter(|| Candidate::new(black_box(schedule.clone()), true));
            },
        );
    }

    group.finish();
}

fn bench_evolution_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution_run");
    group.sample_size(10);

    for strategy in [BreedingStrategy::Mutation, BreedingStrategy::Crossover] {
        let schedules: Vec<Schedule<u32>> = (0..64).map(|i| schedule(i, 8)).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", strategy)),
            &strategy,
            |b, &strategy| {
                b.iter(|| {
                    let config = EvolutionConfig {
                        generations_unchanged: 10,
                        max_generations: Some(200),
                        breeding: strategy,
                        random_seed: Some(42),
                        ..Default::default()
                    };
                    EvolutionEngine::new(config)
                        .run(black_box(schedules.clone()))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_candidate_evaluation, bench_evolution_run);
criterion_main!(benches);
