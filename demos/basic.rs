//! Basic example of using the elevator GA library.

use clap::{Parser, ValueEnum};
use elevator_ga::config::{Config, CrossoverStrategy};
use elevator_ga::problem::{Building, ElevatorSpec, Person, PersonIdAllocator};
use elevator_ga::utils::{format_duration, format_path_codes, format_plan};
use elevator_ga::ElevatorGa;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    Weighted,
    Neighbor,
}

#[derive(Debug, Parser)]
#[command(about = "Search an elevator move plan with a genetic algorithm")]
struct Args {
    /// JSON scenario file; the built-in two-elevator scenario is used when omitted
    scenario: Option<PathBuf>,
    #[arg(long, default_value_t = 80)]
    generations: u32,
    #[arg(long, default_value_t = 200)]
    population: usize,
    #[arg(long, default_value_t = 10)]
    path_length: usize,
    #[arg(long, default_value_t = 50)]
    mutation_rate: u32,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Strategy::Weighted)]
    strategy: Strategy,
}

fn default_building() -> Building {
    let mut ids = PersonIdAllocator::new();
    let people = vec![
        Person::new(&mut ids, 0, 5),
        Person::new(&mut ids, 3, 1),
        Person::new(&mut ids, 6, 0),
        Person::new(&mut ids, 1, 4),
        Person::new(&mut ids, 2, 0),
    ];
    Building::new(
        10,
        vec![ElevatorSpec::new(0, 5), ElevatorSpec::new(2, 5)],
        people,
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let building = match &args.scenario {
        Some(path) => {
            info!("Loading scenario from: {}", path.display());
            Building::from_file(path)?
        }
        None => default_building(),
    };
    println!(
        "Building with {} floors, {} elevators, {} waiting people",
        building.floor_number,
        building.get_elevator_count(),
        building.people.len()
    );

    let mut config = Config::new()
        .with_population_size(args.population)
        .with_generations(args.generations)
        .with_path_length(args.path_length)
        .with_mutation_rate(args.mutation_rate)
        .with_crossover(match args.strategy {
            Strategy::Weighted => CrossoverStrategy::WeightedMix,
            Strategy::Neighbor => CrossoverStrategy::NeighborRepair,
        });
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut algorithm = ElevatorGa::new(building, config)?;
    let best = algorithm.run().cloned().ok_or("search produced no plan")?;

    println!("Search completed in {}", format_duration(algorithm.run_time));
    println!("Best fitness: {}", best.fitness);
    println!("{}", format_plan(&best));
    for i in 0..best.elevators.len() {
        println!("Elevator #{} moves: {}", i + 1, format_path_codes(&best, i));
    }
    println!("{}", algorithm.statistics().format());

    Ok(())
}
