//! Configuration parameters for the elevator genetic search.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Rewards (positive) and penalties (negative) used by the fitness simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Flat cost of an up or down move
    pub move_penalty: i64,
    /// Flat cost of operating the doors
    pub door_movement: i64,
    /// Flat cost of idling
    pub no_move: i64,
    /// Cost per passenger aboard an idling elevator
    pub no_move_with_passenger: i64,
    /// Cost per passenger carried away from their destination floor
    pub missed_destination_floor: i64,
    /// Reward per passenger dropped off
    pub drop_out: i64,
    /// Reward per person picked up
    pub pick_up: i64,
    /// Cost per person still waiting, per timestep
    pub waiting_time: i64,
    /// Cost per passenger aboard, per timestep
    pub journey_time: i64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        FitnessWeights {
            move_penalty: -1,
            door_movement: -1,
            no_move: 0,
            no_move_with_passenger: -10,
            missed_destination_floor: -100,
            drop_out: 100,
            pick_up: 10,
            waiting_time: -2,
            journey_time: -1,
        }
    }
}

/// How offspring genes are assembled from two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverStrategy {
    /// Pick each differing gene from one of the parents, weighted by parent fitness
    WeightedMix,
    /// Replace each differing gene by a neighbor move, then repair the path
    NeighborRepair,
}

/// Configuration settings for the elevator genetic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of members kept after each selection
    pub population_size: usize,
    /// Number of generations to run
    pub generations: u32,
    /// Per-gene mutation probability, in per-mille (0..=1000)
    pub mutation_rate: u32,
    /// Accepted for callers; the mutation operator samples every gene independently
    pub mutation_amount: u32,
    /// Planning horizon: number of moves per elevator path
    pub path_length: usize,
    /// Crossover strategy
    pub crossover: CrossoverStrategy,
    /// Seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Fitness constants
    pub weights: FitnessWeights,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            population_size: 200,
            generations: 100,
            mutation_rate: 50,
            mutation_amount: 2,
            path_length: 10,
            crossover: CrossoverStrategy::WeightedMix,
            seed: None,
            weights: FitnessWeights::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations.
    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generations = generations;
        self
    }

    /// Set the per-mille mutation rate.
    pub fn with_mutation_rate(mut self, rate: u32) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the mutation amount.
    pub fn with_mutation_amount(mut self, amount: u32) -> Self {
        self.mutation_amount = amount;
        self
    }

    /// Set the planning horizon.
    pub fn with_path_length(mut self, length: usize) -> Self {
        self.path_length = length;
        self
    }

    /// Set the crossover strategy.
    pub fn with_crossover(mut self, strategy: CrossoverStrategy) -> Self {
        self.crossover = strategy;
        self
    }

    /// Seed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the fitness constants.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Check the configuration before a search starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path_length == 0 {
            return Err(ConfigError::ZeroPathLength);
        }
        if self.population_size < 2 || self.population_size % 2 != 0 {
            return Err(ConfigError::InvalidPopulationSize(self.population_size));
        }
        if self.mutation_rate > 1000 {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}
