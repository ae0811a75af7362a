//! Population management: initialization, elitist selection and best-member tracking.

use crate::config::Config;
use crate::individual::Member;
use crate::problem::Building;
use rand::Rng;
use std::cmp::Reverse;

/// Manages the members of the genetic search.
pub struct Population {
    /// Current members; sorted by descending fitness after selection
    pub members: Vec<Member>,
    /// Number of members kept by selection
    pub target_size: usize,
    /// Best member seen so far, independent of the current members
    best_member: Option<Member>,
}

impl Population {
    /// Create a new, empty population with the given configuration.
    pub fn new(config: &Config) -> Self {
        Population {
            members: Vec::with_capacity(2 * config.population_size),
            target_size: config.population_size,
            best_member: None,
        }
    }

    /// Fill the population with members whose paths are uniformly random.
    ///
    /// The paths are not legal yet and must be repaired before they are evaluated.
    pub fn initialize<R: Rng>(&mut self, building: &Building, path_length: usize, rng: &mut R) {
        self.members.clear();
        for _ in 0..self.target_size {
            self.members.push(Member::random(building, path_length, rng));
        }
    }

    /// Get the current number of members.
    pub fn get_pop_size(&self) -> usize {
        self.members.len()
    }

    /// Keep only the `target_size` fittest members, sorted best first.
    ///
    /// The sort is stable, so among equally fit members the earlier ones survive.
    pub fn select_survivors(&mut self) {
        self.members.sort_by_key(|m| Reverse(m.fitness));
        self.members.truncate(self.target_size);
    }

    /// Remember the current top member if it beats the best seen so far.
    ///
    /// Must run after selection. Returns `true` when the best member changed.
    pub fn save_best_member(&mut self) -> bool {
        let Some(top) = self.members.first() else {
            return false;
        };

        let improved = match &self.best_member {
            None => true,
            Some(best) => top.fitness > best.fitness,
        };
        if improved {
            self.best_member = Some(top.clone());
        }
        improved
    }

    /// Get the best member seen so far.
    pub fn get_best_member(&self) -> Option<&Member> {
        self.best_member.as_ref()
    }

    /// Get the fittest current member.
    pub fn get_top_member(&self) -> Option<&Member> {
        self.members.iter().max()
    }

    /// Average fitness of the current members.
    pub fn average_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.fitness as f64).sum::<f64>() / self.members.len() as f64
    }
}
