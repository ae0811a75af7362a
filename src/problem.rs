//! Building description: floors, elevators and the people waiting for them.

use crate::error::ConfigError;
use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Hands out unique person identifiers.
#[derive(Debug, Clone, Default)]
pub struct PersonIdAllocator {
    next: usize,
}

impl PersonIdAllocator {
    /// Create an allocator starting at id 0.
    pub fn new() -> Self {
        PersonIdAllocator::default()
    }

    /// Allocate the next identifier.
    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A person travelling from `origin` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: usize,
    pub origin: i32,
    pub destination: i32,
}

impl Person {
    /// Create a person with a fresh identifier.
    pub fn new(ids: &mut PersonIdAllocator, origin: i32, destination: i32) -> Self {
        Person {
            id: ids.next_id(),
            origin,
            destination,
        }
    }
}

/// Starting state of one physical elevator for the current planning cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevatorSpec {
    /// Current floor
    pub position: i32,
    /// Maximum number of passengers aboard at once
    pub capacity: usize,
    /// Last move executed in the previous planning cycle
    pub last_move: Move,
    /// People already aboard
    pub passengers: Vec<Person>,
}

impl ElevatorSpec {
    /// Create an empty elevator that was idle before this cycle.
    pub fn new(position: i32, capacity: usize) -> Self {
        ElevatorSpec {
            position,
            capacity,
            last_move: Move::Idle,
            passengers: Vec::new(),
        }
    }

    /// Set the move made before the planning cycle starts.
    pub fn with_last_move(mut self, last_move: Move) -> Self {
        self.last_move = last_move;
        self
    }

    /// Put people aboard before the planning cycle starts.
    pub fn with_passengers(mut self, passengers: Vec<Person>) -> Self {
        self.passengers = passengers;
        self
    }
}

/// A building instance: the authoritative state the search plans for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub floor_number: i32,
    pub elevators: Vec<ElevatorSpec>,
    /// People waiting on their origin floor
    pub people: Vec<Person>,
}

#[derive(Deserialize)]
struct ScenarioFile {
    floor_number: i32,
    elevators: Vec<ScenarioElevator>,
    #[serde(default)]
    people: Vec<ScenarioPerson>,
}

#[derive(Deserialize)]
struct ScenarioElevator {
    position: i32,
    capacity: usize,
    #[serde(default)]
    last_move: Move,
    #[serde(default)]
    passengers: Vec<ScenarioPerson>,
}

#[derive(Deserialize)]
struct ScenarioPerson {
    origin: i32,
    destination: i32,
}

impl Building {
    /// Create a new building.
    pub fn new(floor_number: i32, elevators: Vec<ElevatorSpec>, people: Vec<Person>) -> Self {
        Building {
            floor_number,
            elevators,
            people,
        }
    }

    /// Parse a JSON scenario. Person identifiers are allocated in file order, passengers first.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let scenario: ScenarioFile = serde_json::from_str(json)?;
        let mut ids = PersonIdAllocator::new();

        let elevators = scenario
            .elevators
            .into_iter()
            .map(|e| {
                let passengers = e
                    .passengers
                    .into_iter()
                    .map(|p| Person::new(&mut ids, p.origin, p.destination))
                    .collect();
                ElevatorSpec::new(e.position, e.capacity)
                    .with_last_move(e.last_move)
                    .with_passengers(passengers)
            })
            .collect();

        let people = scenario
            .people
            .into_iter()
            .map(|p| Person::new(&mut ids, p.origin, p.destination))
            .collect();

        let building = Building::new(scenario.floor_number, elevators, people);
        building.validate()?;
        Ok(building)
    }

    /// Load a JSON scenario from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Get the number of physical elevators.
    pub fn get_elevator_count(&self) -> usize {
        self.elevators.len()
    }

    /// Check that the building is something the search can plan for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor_number < 1 {
            return Err(ConfigError::ZeroFloors);
        }
        if self.elevators.is_empty() {
            return Err(ConfigError::EmptyElevators);
        }

        let mut ids = HashSet::new();

        for (index, elevator) in self.elevators.iter().enumerate() {
            self.check_floor("elevator", elevator.position)?;
            if elevator.passengers.len() > elevator.capacity {
                return Err(ConfigError::OverCapacity {
                    elevator: index,
                    aboard: elevator.passengers.len(),
                    capacity: elevator.capacity,
                });
            }
            for person in &elevator.passengers {
                self.check_floor("passenger destination", person.destination)?;
                if !ids.insert(person.id) {
                    return Err(ConfigError::DuplicatePerson(person.id));
                }
            }
        }

        for person in &self.people {
            self.check_floor("person origin", person.origin)?;
            self.check_floor("person destination", person.destination)?;
            if !ids.insert(person.id) {
                return Err(ConfigError::DuplicatePerson(person.id));
            }
        }

        Ok(())
    }

    fn check_floor(&self, what: &'static str, floor: i32) -> Result<(), ConfigError> {
        if floor < 0 || floor >= self.floor_number {
            return Err(ConfigError::FloorOutOfRange {
                what,
                floor,
                floor_number: self.floor_number,
            });
        }
        Ok(())
    }
}
