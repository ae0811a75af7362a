//! Elevator chromosome: one elevator's move plan over the planning horizon.

use crate::moves::Move;
use crate::problem::{ElevatorSpec, Person};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One elevator within a candidate solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elevator {
    /// Current floor
    pub position: i32,
    /// Maximum number of passengers aboard at once
    pub capacity: usize,
    /// Passengers aboard, in boarding order
    pub passengers: Vec<Person>,
    /// Planned moves, one per timestep
    pub path: Vec<Move>,
    /// Move made just before `path` starts
    pub last_move: Move,
    /// Cost accumulated by this elevator during the last evaluation
    pub fitness: i64,
}

impl Elevator {
    /// Create an elevator with an empty path from its starting state.
    pub fn from_spec(spec: &ElevatorSpec) -> Self {
        Elevator {
            position: spec.position,
            capacity: spec.capacity,
            passengers: spec.passengers.clone(),
            path: Vec::new(),
            last_move: spec.last_move,
            fitness: 0,
        }
    }

    /// Create an elevator with a path of `path_length` uniformly random moves.
    ///
    /// The path is not checked for legality.
    pub fn random<R: Rng + ?Sized>(spec: &ElevatorSpec, path_length: usize, rng: &mut R) -> Self {
        let mut elevator = Self::from_spec(spec);
        elevator.path = (0..path_length)
            .map(|_| Move::ALL[rng.gen_range(0..Move::ALL.len())])
            .collect();
        elevator
    }

    /// Copy the starting state (position, capacity, passengers, last move) with an empty path.
    pub fn empty_offspring(&self) -> Self {
        Elevator {
            position: self.position,
            capacity: self.capacity,
            passengers: self.passengers.clone(),
            path: Vec::with_capacity(self.path.len()),
            last_move: self.last_move,
            fitness: 0,
        }
    }

    /// Get the number of passengers aboard.
    pub fn load(&self) -> usize {
        self.passengers.len()
    }

    /// Check whether another passenger fits.
    pub fn has_room(&self) -> bool {
        self.passengers.len() < self.capacity
    }
}
