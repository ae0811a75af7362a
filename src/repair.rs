//! Path validation and repair.
//!
//! Every path produced by initialization, crossover or mutation goes through a repair
//! before it is evaluated. Repairs walk the path left to right, carrying the floor and the
//! previous move forward, and replace any gene that is not allowed after the previous move
//! or that would take the elevator outside the building.

use crate::chromosome::Elevator;
use crate::moves::Move;
use log::trace;
use rand::{Rng, RngCore};
use std::collections::VecDeque;

/// Turns an arbitrary path into one that satisfies the legality table and floor range.
///
/// Implementations must be total: for any input path they return a path of the same length
/// in which every move is allowed after its predecessor (`previous` for the first move) and
/// every intermediate floor lies in `0..floor_number`.
pub trait PathRepair: Send + Sync {
    fn repair(
        &self,
        path: &[Move],
        position: i32,
        previous: Move,
        floor_number: i32,
        rng: &mut dyn RngCore,
    ) -> Vec<Move>;
}

fn within(floor: i32, floor_number: i32) -> bool {
    floor >= 0 && floor < floor_number
}

/// The in-engine repair applied to the whole population every generation.
///
/// An illegal gene is replaced by a uniform choice from the allowed set. A travel move that
/// would leave the building is reversed when it follows a door operation and turned into a
/// door operation otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalityRepair;

impl PathRepair for LegalityRepair {
    fn repair(
        &self,
        path: &[Move],
        position: i32,
        previous: Move,
        floor_number: i32,
        rng: &mut dyn RngCore,
    ) -> Vec<Move> {
        let mut repaired = path.to_vec();
        let mut floor = position;
        let mut last = previous;

        for (index, gene) in repaired.iter_mut().enumerate() {
            let allowed = Move::allowed_after(last);
            if !allowed.contains(gene) {
                let chosen = allowed[rng.gen_range(0..allowed.len())];
                trace!(
                    "legality repair at gene {}: {} -> {} (illegal after {})",
                    index, gene, chosen, last
                );
                *gene = chosen;
            }

            if gene.is_travel() && !within(floor + gene.delta(), floor_number) {
                let mut chosen = if last == Move::Doors {
                    gene.reversed()
                } else {
                    Move::Doors
                };
                // A single-floor building has nowhere to go in either direction.
                if !within(floor + chosen.delta(), floor_number) {
                    chosen = Move::Idle;
                }
                trace!(
                    "legality repair at gene {}: {} -> {} (leaves floor {})",
                    index, gene, chosen, floor
                );
                *gene = chosen;
            }

            floor += gene.delta();
            last = *gene;
        }

        repaired
    }
}

/// Repair used after neighbor-substitution crossover.
///
/// Replacements are drawn only from moves that are both allowed and keep the elevator inside
/// the building. Moves substituted recently are tabu for `tenure` substitutions and are only
/// picked again when nothing else is possible.
#[derive(Debug, Clone, Copy)]
pub struct TabuRepair {
    pub tenure: usize,
}

impl Default for TabuRepair {
    fn default() -> Self {
        TabuRepair { tenure: 2 }
    }
}

impl TabuRepair {
    /// Create a tabu repair with the given tenure.
    pub fn new(tenure: usize) -> Self {
        TabuRepair { tenure }
    }
}

impl PathRepair for TabuRepair {
    fn repair(
        &self,
        path: &[Move],
        position: i32,
        previous: Move,
        floor_number: i32,
        rng: &mut dyn RngCore,
    ) -> Vec<Move> {
        let mut repaired = Vec::with_capacity(path.len());
        let mut tabu: VecDeque<Move> = VecDeque::with_capacity(self.tenure + 1);
        let mut floor = position;
        let mut last = previous;

        for (index, &gene) in path.iter().enumerate() {
            let fits = |mv: Move| within(floor + mv.delta(), floor_number);

            let mv = if gene.is_allowed_after(last) && fits(gene) {
                gene
            } else {
                // Non-empty: doors is always reachable from a travel or idle move,
                // idle always from doors.
                let candidates: Vec<Move> = Move::allowed_after(last)
                    .iter()
                    .copied()
                    .filter(|&mv| fits(mv))
                    .collect();
                let fresh: Vec<Move> = candidates
                    .iter()
                    .copied()
                    .filter(|mv| !tabu.contains(mv))
                    .collect();
                let pool = if fresh.is_empty() { &candidates } else { &fresh };
                let chosen = pool[rng.gen_range(0..pool.len())];

                trace!("tabu repair at gene {}: {} -> {}", index, gene, chosen);
                tabu.push_back(chosen);
                if tabu.len() > self.tenure {
                    tabu.pop_front();
                }
                chosen
            };

            floor += mv.delta();
            last = mv;
            repaired.push(mv);
        }

        repaired
    }
}

/// Repair an elevator's path in place, starting from its position and last move.
///
/// The elevator's `last_move` is read but never changed.
pub fn repair_elevator<P: PathRepair + ?Sized>(
    repair: &P,
    elevator: &mut Elevator,
    floor_number: i32,
    rng: &mut dyn RngCore,
) {
    elevator.path = repair.repair(
        &elevator.path,
        elevator.position,
        elevator.last_move,
        floor_number,
        rng,
    );
}
