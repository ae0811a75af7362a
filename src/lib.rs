//! # Elevator GA
//!
//! A genetic search for near-optimal elevator move plans.
//!
//! Every member of the population holds one fixed-length path of moves per elevator.
//! Each generation crosses adjacent pairs, mutates genes, repairs the paths so that every
//! move is legal and stays inside the building, scores the members by simulating pickups
//! and dropoffs over the planning horizon, and keeps the fittest members. The best member
//! ever seen is the result of a run.

pub mod chromosome;
pub mod config;
pub mod error;
pub mod fitness;
pub mod genetic;
pub mod individual;
pub mod moves;
pub mod population;
pub mod problem;
pub mod repair;
pub mod utils;

use crate::config::Config;
use crate::error::ConfigError;
use crate::fitness::FitnessEvaluator;
use crate::genetic::Genetic;
use crate::individual::Member;
use crate::population::Population;
use crate::problem::Building;
use crate::repair::{repair_elevator, LegalityRepair};
use crate::utils::SearchStatistics;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// The main algorithm structure that drives the generations.
pub struct ElevatorGa {
    pub building: Building,
    pub population: Population,
    pub config: Config,
    pub genetic: Genetic,
    pub evaluator: FitnessEvaluator,
    pub repair: LegalityRepair,
    pub generation: u32,
    pub best_found_in_generation: u32,
    pub run_time: Duration,
    rng: ChaCha8Rng,
}

impl ElevatorGa {
    /// Create a new search for the given building and configuration.
    ///
    /// Fails if the building or the configuration violates a precondition.
    pub fn new(building: Building, config: Config) -> Result<Self, ConfigError> {
        building.validate()?;
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(ElevatorGa {
            building,
            population: Population::new(&config),
            genetic: Genetic::new(config.crossover),
            evaluator: FitnessEvaluator::new(config.weights.clone()),
            repair: LegalityRepair,
            config,
            generation: 0,
            best_found_in_generation: 0,
            run_time: Duration::from_secs(0),
            rng,
        })
    }

    /// Replace the genetic operators, e.g. to plug in another repair collaborator.
    pub fn with_genetic(mut self, genetic: Genetic) -> Self {
        self.genetic = genetic;
        self
    }

    /// Fill the population with random, not yet repaired, members.
    pub fn initialize(&mut self) {
        self.population
            .initialize(&self.building, self.config.path_length, &mut self.rng);
        self.generation = 0;
    }

    /// Cross adjacent pairs of members; the population doubles until selection.
    pub fn crossover_population(&mut self) {
        self.genetic.crossover_population(
            &mut self.population.members,
            self.config.population_size,
            self.building.floor_number,
            &mut self.rng,
        );
    }

    /// Randomize genes with the configured per-mille rate.
    pub fn mutate_population(&mut self) {
        self.genetic.mutate_population(
            &mut self.population.members,
            self.config.mutation_rate,
            &mut self.rng,
        );
    }

    /// Repair every path so that all moves are legal and stay inside the building.
    pub fn validate_population(&mut self) {
        let floor_number = self.building.floor_number;
        for member in self.population.members.iter_mut() {
            for elevator in member.elevators.iter_mut() {
                repair_elevator(&self.repair, elevator, floor_number, &mut self.rng);
            }
        }
    }

    /// Score every member against the waiting people.
    pub fn evaluate_population(&mut self) {
        self.evaluator
            .evaluate_population(&mut self.population.members, &self.building.people);
    }

    /// Keep the fittest members.
    pub fn select_population(&mut self) {
        self.population.select_survivors();
    }

    /// Track the best member seen so far.
    pub fn save_best_member(&mut self) {
        if self.population.save_best_member() {
            self.best_found_in_generation = self.generation;
        }
    }

    /// Run one generation: crossover, mutation, repair, evaluation, selection, best tracking.
    pub fn step(&mut self) {
        self.generation += 1;

        self.crossover_population();
        self.mutate_population();
        self.validate_population();
        self.evaluate_population();
        self.select_population();
        self.save_best_member();

        debug!(
            "generation {}: top fitness {}, best fitness {}",
            self.generation,
            self.population.get_top_member().map_or(0, |m| m.fitness),
            self.population.get_best_member().map_or(0, |m| m.fitness)
        );
    }

    /// Run the configured number of generations and return the best member found.
    ///
    /// The initial population is repaired, scored and selected before the first generation,
    /// so the result is `None` only if the population is empty.
    pub fn run(&mut self) -> Option<&Member> {
        let start_time = Instant::now();
        info!(
            "Starting search: {} elevators, {} people, {} floors, population {}, {} generations",
            self.building.get_elevator_count(),
            self.building.people.len(),
            self.building.floor_number,
            self.config.population_size,
            self.config.generations
        );

        self.initialize();
        self.validate_population();
        self.evaluate_population();
        self.select_population();
        self.save_best_member();

        for _ in 0..self.config.generations {
            self.step();
        }

        self.run_time = start_time.elapsed();
        info!(
            "Search finished after {} generations in {:?}, best fitness {}",
            self.generation,
            self.run_time,
            self.best_fitness().unwrap_or_default()
        );

        self.population.get_best_member()
    }

    /// Get the best member seen so far.
    pub fn best_member(&self) -> Option<&Member> {
        self.population.get_best_member()
    }

    /// Get the fitness of the best member seen so far.
    pub fn best_fitness(&self) -> Option<i64> {
        self.best_member().map(|m| m.fitness)
    }

    /// Summarize the search so far.
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            generations: self.generation,
            runtime: self.run_time,
            best_fitness: self.best_fitness().unwrap_or_default(),
            best_found_in_generation: self.best_found_in_generation,
            population_size: self.population.get_pop_size(),
            average_fitness: self.population.average_fitness(),
        }
    }
}
