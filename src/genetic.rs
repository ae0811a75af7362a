//! Genetic operators for the elevator search: crossover and mutation.

use crate::chromosome::Elevator;
use crate::config::CrossoverStrategy;
use crate::individual::Member;
use crate::moves::Move;
use crate::repair::{repair_elevator, PathRepair, TabuRepair};
use rand::Rng;

/// Implements the genetic operators (crossover, mutation) for the elevator search.
pub struct Genetic {
    /// Which crossover the population pass uses
    pub strategy: CrossoverStrategy,
    /// Repair applied to neighbor-substitution offspring
    repair: Box<dyn PathRepair>,
}

impl Genetic {
    /// Create the operators with the default tabu repair.
    pub fn new(strategy: CrossoverStrategy) -> Self {
        Self::with_repair(strategy, Box::new(TabuRepair::default()))
    }

    /// Create the operators with a custom repair for neighbor-substitution offspring.
    pub fn with_repair(strategy: CrossoverStrategy, repair: Box<dyn PathRepair>) -> Self {
        Genetic { strategy, repair }
    }

    /// Produce two offspring from two parents, elevator by elevator.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Member,
        parent2: &Member,
        floor_number: i32,
        rng: &mut R,
    ) -> (Member, Member) {
        let mut offspring1 = Vec::with_capacity(parent1.elevators.len());
        let mut offspring2 = Vec::with_capacity(parent2.elevators.len());

        for (elevator1, elevator2) in parent1.elevators.iter().zip(&parent2.elevators) {
            let (child1, child2) = match self.strategy {
                CrossoverStrategy::WeightedMix => Self::weighted_mix(elevator1, elevator2, rng),
                CrossoverStrategy::NeighborRepair => {
                    self.neighbor_repair(elevator1, elevator2, floor_number, rng)
                }
            };
            offspring1.push(child1);
            offspring2.push(child2);
        }

        (Member::new(offspring1), Member::new(offspring2))
    }

    /// Fitness-weighted gene mixing.
    ///
    /// Genes on which the parents agree are copied. Otherwise each child draws the gene of
    /// one parent independently, with probability proportional to the parent elevator's
    /// fitness floored at zero (an even split when both are zero).
    pub fn weighted_mix<R: Rng>(
        parent1: &Elevator,
        parent2: &Elevator,
        rng: &mut R,
    ) -> (Elevator, Elevator) {
        let mut child1 = parent1.empty_offspring();
        let mut child2 = parent2.empty_offspring();

        let weight1 = parent1.fitness.max(0) as f64;
        let weight2 = parent2.fitness.max(0) as f64;
        let total = weight1 + weight2;
        let first_probability = if total == 0.0 { 0.5 } else { weight1 / total };

        for (&gene1, &gene2) in parent1.path.iter().zip(&parent2.path) {
            if gene1 == gene2 {
                child1.path.push(gene1);
                child2.path.push(gene1);
                continue;
            }

            let mut pick = || {
                if rng.gen_bool(first_probability) {
                    gene1
                } else {
                    gene2
                }
            };
            child1.path.push(pick());
            child2.path.push(pick());
        }

        (child1, child2)
    }

    /// Neighbor substitution followed by the repair collaborator.
    ///
    /// Where the parents disagree, each child takes a random neighbor of its own parent's
    /// gene instead of that gene.
    pub fn neighbor_repair<R: Rng>(
        &self,
        parent1: &Elevator,
        parent2: &Elevator,
        floor_number: i32,
        rng: &mut R,
    ) -> (Elevator, Elevator) {
        let mut child1 = parent1.empty_offspring();
        let mut child2 = parent2.empty_offspring();

        for (&gene1, &gene2) in parent1.path.iter().zip(&parent2.path) {
            child1.path.push(Self::offspring_move(gene1, gene2, rng));
            child2.path.push(Self::offspring_move(gene2, gene1, rng));
        }

        repair_elevator(self.repair.as_ref(), &mut child1, floor_number, &mut *rng);
        repair_elevator(self.repair.as_ref(), &mut child2, floor_number, &mut *rng);

        (child1, child2)
    }

    fn offspring_move<R: Rng>(own: Move, other: Move, rng: &mut R) -> Move {
        if own == other {
            return own;
        }
        let neighbors = own.neighbors();
        neighbors[rng.gen_range(0..neighbors.len())]
    }

    /// Cross adjacent pairs among the first `parents` members and append the offspring.
    ///
    /// The population grows by `parents` members; selection shrinks it back.
    pub fn crossover_population<R: Rng>(
        &self,
        members: &mut Vec<Member>,
        parents: usize,
        floor_number: i32,
        rng: &mut R,
    ) {
        let parents = parents.min(members.len());
        let mut offspring = Vec::with_capacity(parents);

        for pair in members[..parents].chunks_exact(2) {
            let (child1, child2) = self.crossover(&pair[0], &pair[1], floor_number, rng);
            offspring.push(child1);
            offspring.push(child2);
        }

        members.extend(offspring);
    }

    /// Replace each gene, with probability `mutation_rate / 1000`, by a uniformly random move.
    pub fn mutate<R: Rng>(&self, member: &mut Member, mutation_rate: u32, rng: &mut R) {
        for elevator in member.elevators.iter_mut() {
            for gene in elevator.path.iter_mut() {
                if rng.gen_range(0..1000) < mutation_rate {
                    *gene = Move::ALL[rng.gen_range(0..Move::ALL.len())];
                }
            }
        }
    }

    /// Mutate every member of the population.
    pub fn mutate_population<R: Rng>(
        &self,
        members: &mut [Member],
        mutation_rate: u32,
        rng: &mut R,
    ) {
        for member in members.iter_mut() {
            self.mutate(member, mutation_rate, rng);
        }
    }
}

impl Default for Genetic {
    fn default() -> Self {
        Genetic::new(CrossoverStrategy::WeightedMix)
    }
}
