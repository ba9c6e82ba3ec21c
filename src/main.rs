//! Slot span GA CLI - Evolve schedules loaded from a JSON file.

use std::path::PathBuf;
use std::time::Instant;

use slot_span_ga::{
    BreedingStrategy, EvolutionConfig, EvolutionEngine, SLOT_COUNT, Schedule,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_schedules();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <schedules.json> [options]", args[0]);
        eprintln!();
        eprintln!("Evolve 12-slot schedules toward the shortest longest span.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  schedules.json               JSON array of schedules (12 rows of values each)");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --minimize                   Minimize the longest span directly");
        eprintln!("  --crossover                  Breed by crossover instead of mutation");
        eprintln!("  --generations-unchanged N    Stagnation limit (default: 40)");
        eprintln!("  --max-generations N          Hard generation cap");
        eprintln!("  --seed S                     Random seed");
        eprintln!("  --example                    Print an example schedules file");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let config = parse_options(&args[2..]).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let schedules: Vec<Schedule<String>> = Schedule::load_all(&path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", path.display(), e);
        std::process::exit(1);
    });

    println!("Slot Span GA");
    println!("============");
    println!("Schedules: {}", schedules.len());
    if let Some(first) = schedules.first() {
        println!("Slots: {} x {} values", SLOT_COUNT, first.width());
    }
    println!("Direction: {}", config.direction());
    println!("Breeding: {:?}", config.breeding);
    println!("Stagnation limit: {}", config.generations_unchanged);
    println!();

    let start = Instant::now();
    let mut engine = EvolutionEngine::new(config);
    let result = engine
        .run_with_callback(schedules, |progress| {
            if progress.generation % 10 == 0 {
                println!("  Generation {}: {}", progress.generation, progress);
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        });

    println!();
    println!("Stopped: {:?}", result.stats.stop_reason);
    println!("Generations: {}", result.stats.generations);
    println!("Evaluations: {}", result.stats.total_evaluations);
    println!("Longest span: {}", result.best.longest_span());
    println!("Time: {:.2}s", start.elapsed().as_secs_f32());
    println!();
    println!("{}", result.best);
}

fn parse_options(options: &[String]) -> Result<EvolutionConfig, String> {
    let mut config = EvolutionConfig::default();
    let mut iter = options.iter();

    while let Some(option) = iter.next() {
        match option.as_str() {
            "--minimize" => config.maximize = false,
            "--crossover" => config.breeding = BreedingStrategy::Crossover,
            "--generations-unchanged" => {
                config.generations_unchanged = parse_value(option, iter.next())?;
            }
            "--max-generations" => {
                config.max_generations = Some(parse_value(option, iter.next())?);
            }
            "--seed" => config.random_seed = Some(parse_value(option, iter.next())?),
            other => return Err(format!("unknown option {other}")),
        }
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(option: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{option} requires a value"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for {option}: {value}"))
}

fn print_example_schedules() {
    let names = ["ana", "ben", "cai", "dee", "eli", "fay"];
    let schedules: Vec<Vec<Vec<&str>>> = (0..8)
        .map(|offset| {
            (0..SLOT_COUNT)
                .map(|row| {
                    vec![
                        names[(row / 2 + offset) % names.len()],
                        names[(row / 3 + offset + 1) % names.len()],
                    ]
                })
                .collect()
        })
        .collect();

    println!("Example schedules (schedules.json):");
    match serde_json::to_string_pretty(&schedules) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}
