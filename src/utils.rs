//! Utility functions and structures for reporting on a search.

use crate::individual::Member;
use itertools::Itertools;
use std::time::Duration;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Format a path as its move codes, e.g. `[2, 1, 1, 2]`.
pub fn format_path_codes(member: &Member, elevator: usize) -> String {
    member
        .elevators
        .get(elevator)
        .map(|e| format!("[{}]", e.path.iter().join(", ")))
        .unwrap_or_default()
}

/// Format every elevator's plan, one line per elevator.
///
/// Each line shows the starting floor, the move symbols and the floor reached at the end.
pub fn format_plan(member: &Member) -> String {
    member
        .elevators
        .iter()
        .enumerate()
        .map(|(i, elevator)| {
            let end = elevator.position + elevator.path.iter().map(|mv| mv.delta()).sum::<i32>();
            format!(
                "Elevator #{}: floor {:>2} | {} | floor {:>2} (cost {})",
                i + 1,
                elevator.position,
                elevator.path.iter().map(|mv| mv.symbol()).collect::<String>(),
                end,
                elevator.fitness
            )
        })
        .join("\n")
}

/// Statistics about the search process.
pub struct SearchStatistics {
    pub generations: u32,
    pub runtime: Duration,
    pub best_fitness: i64,
    pub best_found_in_generation: u32,
    pub population_size: usize,
    pub average_fitness: f64,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Generations: {}
- Runtime: {}
- Best Fitness: {}
- Best Found In Generation: {}
- Population Size: {}
- Average Fitness: {:.2}",
            self.generations,
            format_duration(self.runtime),
            self.best_fitness,
            self.best_found_in_generation,
            self.population_size,
            self.average_fitness
        )
    }
}
