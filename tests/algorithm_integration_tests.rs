//! Integration tests for the full elevator search.

use elevator_ga::config::{Config, CrossoverStrategy};
use elevator_ga::error::ConfigError;
use elevator_ga::moves::{is_legal_path, Move};
use elevator_ga::problem::{Building, ElevatorSpec, Person, PersonIdAllocator};
use elevator_ga::ElevatorGa;

/// Two elevators, five people, ten floors.
fn create_test_building() -> Building {
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

fn small_config() -> Config {
    Config::new()
        .with_population_size(30)
        .with_generations(15)
        .with_path_length(10)
        .with_seed(2024)
}

fn assert_population_legal(algorithm: &ElevatorGa) {
    let floor_number = algorithm.building.floor_number;
    for member in &algorithm.population.members {
        for elevator in &member.elevators {
            assert!(is_legal_path(
                &elevator.path,
                elevator.position,
                elevator.last_move,
                floor_number
            ));
        }
    }
}

#[test]
fn test_generation_steps_keep_invariants() {
    for strategy in [CrossoverStrategy::WeightedMix, CrossoverStrategy::NeighborRepair] {
        let config = small_config().with_crossover(strategy);
        let mut algorithm = ElevatorGa::new(create_test_building(), config).unwrap();

        algorithm.initialize();
        algorithm.validate_population();
        algorithm.evaluate_population();
        algorithm.select_population();
        algorithm.save_best_member();

        let mut previous_best = algorithm.best_fitness().unwrap();

        for _ in 0..15 {
            algorithm.crossover_population();
            assert_eq!(algorithm.population.get_pop_size(), 60);

            algorithm.mutate_population();
            algorithm.validate_population();
            assert_population_legal(&algorithm);

            algorithm.evaluate_population();
            algorithm.select_population();
            assert_eq!(algorithm.population.get_pop_size(), 30);

            algorithm.save_best_member();
            let best = algorithm.best_fitness().unwrap();
            assert!(best >= previous_best);
            previous_best = best;
        }
    }
}

#[test]
fn test_run_returns_legal_best_member() {
    let mut algorithm = ElevatorGa::new(create_test_building(), small_config()).unwrap();

    let best = algorithm.run().cloned().unwrap();

    assert_eq!(algorithm.generation, 15);
    assert_eq!(best.elevators.len(), 2);
    for elevator in &best.elevators {
        assert_eq!(elevator.path.len(), 10);
        assert!(is_legal_path(&elevator.path, elevator.position, elevator.last_move, 10));
    }
    // The elitist best can never fall behind the current top member.
    let top = algorithm.population.get_top_member().unwrap();
    assert!(best.fitness >= top.fitness);
    assert_eq!(algorithm.statistics().best_fitness, best.fitness);
}

#[test]
fn test_runs_with_same_seed_are_reproducible() {
    let mut first = ElevatorGa::new(create_test_building(), small_config()).unwrap();
    let mut second = ElevatorGa::new(create_test_building(), small_config()).unwrap();

    let a = first.run().cloned().unwrap();
    let b = second.run().cloned().unwrap();

    assert_eq!(a.fitness, b.fitness);
    assert!(a.is_clone_of(&b));
}

#[test]
fn test_search_beats_doing_nothing() {
    let building = create_test_building();
    let config = Config::new()
        .with_population_size(60)
        .with_generations(40)
        .with_seed(7);
    let mut algorithm = ElevatorGa::new(building, config).unwrap();

    let best = algorithm.run().unwrap();

    // Idling for ten steps costs five waiting people -2 each step.
    assert!(best.fitness > -100);
}

#[test]
fn test_zero_generations_returns_initial_best() {
    let config = small_config().with_generations(0);
    let mut algorithm = ElevatorGa::new(create_test_building(), config).unwrap();

    assert!(algorithm.run().is_some());
    assert_eq!(algorithm.generation, 0);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let building = create_test_building();

    assert!(matches!(
        ElevatorGa::new(building.clone(), Config::new().with_path_length(0)),
        Err(ConfigError::ZeroPathLength)
    ));
    assert!(matches!(
        ElevatorGa::new(building.clone(), Config::new().with_population_size(7)),
        Err(ConfigError::InvalidPopulationSize(7))
    ));
    assert!(matches!(
        ElevatorGa::new(building.clone(), Config::new().with_population_size(0)),
        Err(ConfigError::InvalidPopulationSize(0))
    ));
    assert!(matches!(
        ElevatorGa::new(building.clone(), Config::new().with_mutation_rate(1001)),
        Err(ConfigError::InvalidMutationRate(1001))
    ));

    let no_elevators = Building::new(10, Vec::new(), building.people.clone());
    assert!(matches!(
        ElevatorGa::new(no_elevators, Config::new()),
        Err(ConfigError::EmptyElevators)
    ));

    let outside = Building::new(10, vec![ElevatorSpec::new(10, 5)], Vec::new());
    assert!(matches!(
        ElevatorGa::new(outside, Config::new()),
        Err(ConfigError::FloorOutOfRange { floor: 10, .. })
    ));

    let mut ids = PersonIdAllocator::new();
    let passengers = vec![Person::new(&mut ids, 0, 3), Person::new(&mut ids, 0, 4)];
    let overloaded = Building::new(
        10,
        vec![ElevatorSpec::new(0, 5), ElevatorSpec::new(0, 1).with_passengers(passengers)],
        Vec::new(),
    );
    assert!(matches!(
        ElevatorGa::new(overloaded, Config::new()),
        Err(ConfigError::OverCapacity { elevator: 1, .. })
    ));
}

#[test]
fn test_building_from_json() {
    let json = r#"{
        "floor_number": 10,
        "elevators": [
            { "position": 0, "capacity": 5 },
            { "position": 2, "capacity": 5, "last_move": 2,
              "passengers": [ { "origin": 4, "destination": 7 } ] }
        ],
        "people": [
            { "origin": 0, "destination": 5 },
            { "origin": 3, "destination": 1 }
        ]
    }"#;

    let building = Building::from_json_str(json).unwrap();

    assert_eq!(building.floor_number, 10);
    assert_eq!(building.get_elevator_count(), 2);
    assert_eq!(building.elevators[0].last_move, Move::Idle);
    assert_eq!(building.elevators[1].last_move, Move::Doors);
    assert_eq!(building.elevators[1].passengers[0].id, 0);
    let ids: Vec<usize> = building.people.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_building_from_json_rejects_bad_input() {
    let unknown_move = r#"{ "floor_number": 4,
        "elevators": [ { "position": 0, "capacity": 1, "last_move": 3 } ] }"#;
    assert!(matches!(
        Building::from_json_str(unknown_move),
        Err(ConfigError::Json(_))
    ));

    let outside = r#"{ "floor_number": 4,
        "elevators": [ { "position": 0, "capacity": 1 } ],
        "people": [ { "origin": 0, "destination": 4 } ] }"#;
    assert!(matches!(
        Building::from_json_str(outside),
        Err(ConfigError::FloorOutOfRange { .. })
    ));

    let overloaded = r#"{ "floor_number": 4,
        "elevators": [ { "position": 0, "capacity": 1,
            "passengers": [ { "origin": 0, "destination": 2 },
                            { "origin": 0, "destination": 3 } ] } ] }"#;
    assert!(matches!(
        Building::from_json_str(overloaded),
        Err(ConfigError::OverCapacity {
            elevator: 0,
            aboard: 2,
            capacity: 1
        })
    ));
}

#[test]
fn test_duplicate_person_ids_are_rejected() {
    let waiting = Person {
        id: 0,
        origin: 1,
        destination: 3,
    };
    let aboard = Person {
        id: 0,
        origin: 2,
        destination: 0,
    };

    let shared = Building::new(
        5,
        vec![ElevatorSpec::new(2, 3).with_passengers(vec![aboard])],
        vec![waiting.clone()],
    );
    assert!(matches!(
        ElevatorGa::new(shared, Config::new()),
        Err(ConfigError::DuplicatePerson(0))
    ));

    let repeated = Building::new(
        5,
        vec![ElevatorSpec::new(0, 3)],
        vec![waiting.clone(), waiting],
    );
    assert!(matches!(
        repeated.validate(),
        Err(ConfigError::DuplicatePerson(0))
    ));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = small_config().with_crossover(CrossoverStrategy::NeighborRepair);

    let json = serde_json::to_string(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.population_size, 30);
    assert_eq!(parsed.crossover, CrossoverStrategy::NeighborRepair);
    assert_eq!(parsed.seed, Some(2024));
    assert_eq!(parsed.weights, config.weights);
}

#[test]
fn test_custom_repair_collaborator_can_be_plugged_in() {
    use elevator_ga::genetic::Genetic;
    use elevator_ga::repair::LegalityRepair;

    let config = small_config().with_crossover(CrossoverStrategy::NeighborRepair);
    let genetic = Genetic::with_repair(CrossoverStrategy::NeighborRepair, Box::new(LegalityRepair));
    let mut algorithm = ElevatorGa::new(create_test_building(), config)
        .unwrap()
        .with_genetic(genetic);

    algorithm.run();

    assert_eq!(algorithm.population.get_pop_size(), 30);
    assert_population_legal(&algorithm);
}
