//! Errors reported before a search starts.
//!
//! The engine itself never fails once constructed: illegal moves are repaired, and
//! degenerate situations fall back to neutral defaults.

use std::io;

/// Precondition violations in the building description or the algorithm configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("building has no elevators")]
    EmptyElevators,
    #[error("building must have at least one floor")]
    ZeroFloors,
    #[error("path length must be at least 1")]
    ZeroPathLength,
    #[error("population size must be even and at least 2, got {0}")]
    InvalidPopulationSize(usize),
    #[error("mutation rate is per-mille and must not exceed 1000, got {0}")]
    InvalidMutationRate(u32),
    #[error("{what} floor {floor} is outside 0..{floor_number}")]
    FloorOutOfRange {
        what: &'static str,
        floor: i32,
        floor_number: i32,
    },
    #[error("elevator {elevator} carries {aboard} passengers but holds only {capacity}")]
    OverCapacity {
        elevator: usize,
        aboard: usize,
        capacity: usize,
    },
    #[error("person id {0} appears more than once")]
    DuplicatePerson(usize),
    #[error("unknown move code {0}")]
    UnknownMove(i8),
    #[error("failed to read scenario: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
}
