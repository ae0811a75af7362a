//! Member representation: one full candidate solution.

use crate::chromosome::Elevator;
use crate::problem::Building;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate solution: one chromosome per physical elevator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Chromosomes in building elevator order
    pub elevators: Vec<Elevator>,
    /// Aggregate fitness from the last evaluation, higher is better
    pub fitness: i64,
}

impl Member {
    /// Create a member from its chromosomes.
    pub fn new(elevators: Vec<Elevator>) -> Self {
        Member {
            elevators,
            fitness: 0,
        }
    }

    /// Create a member with uniformly random paths for every elevator of the building.
    pub fn random<R: Rng + ?Sized>(building: &Building, path_length: usize, rng: &mut R) -> Self {
        let elevators = building
            .elevators
            .iter()
            .map(|spec| Elevator::random(spec, path_length, rng))
            .collect();
        Member::new(elevators)
    }

    /// Check if this member plans the same moves as another.
    pub fn is_clone_of(&self, other: &Member) -> bool {
        self.elevators.len() == other.elevators.len()
            && self
                .elevators
                .iter()
                .zip(&other.elevators)
                .all(|(a, b)| a.path == b.path)
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl Eq for Member {}

impl PartialOrd for Member {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Member {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness.cmp(&other.fitness)
    }
}
