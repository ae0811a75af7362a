//! Fitness evaluation by simulating a member's plan over the planning horizon.
//!
//! A simulation runs on private copies of the member's elevators and of the waiting people,
//! so neither the member's plan nor the caller's people list is touched. Only the resulting
//! fitness values are written back.

use crate::chromosome::Elevator;
use crate::config::FitnessWeights;
use crate::individual::Member;
use crate::moves::Move;
use crate::problem::Person;
use rayon::prelude::*;

/// Result of simulating one member's plan to the end of the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Member fitness: waiting costs plus every elevator's cost
    pub fitness: i64,
    /// Accumulated cost of each elevator
    pub elevator_fitness: Vec<i64>,
    /// Sum of the per-timestep waiting costs
    pub waiting_cost: i64,
    /// Number of people dropped off at their destination
    pub delivered: usize,
    /// Number of people never picked up
    pub still_waiting: usize,
}

/// Stepwise simulation of one member's plan.
pub struct Simulation<'a> {
    weights: &'a FitnessWeights,
    elevators: Vec<Elevator>,
    waiting: Vec<Person>,
    delivered: Vec<Person>,
    waiting_cost: i64,
    timestep: usize,
    horizon: usize,
}

impl<'a> Simulation<'a> {
    /// Start a simulation from copies of the member's elevators and the waiting people.
    pub fn new(member: &Member, people: &[Person], weights: &'a FitnessWeights) -> Self {
        let mut elevators = member.elevators.clone();
        for elevator in elevators.iter_mut() {
            elevator.fitness = 0;
        }
        let horizon = elevators.iter().map(|e| e.path.len()).min().unwrap_or(0);

        Simulation {
            weights,
            elevators,
            waiting: people.to_vec(),
            delivered: Vec::new(),
            waiting_cost: 0,
            timestep: 0,
            horizon,
        }
    }

    /// Execute the next timestep for every elevator. Returns `false` once the horizon is reached.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let t = self.timestep;
        for elevator in self.elevators.iter_mut() {
            let mv = elevator.path[t];
            Self::execute(
                elevator,
                mv,
                &mut self.waiting,
                &mut self.delivered,
                self.weights,
            );
        }
        self.waiting_cost += self.waiting.len() as i64 * self.weights.waiting_time;
        self.timestep += 1;

        true
    }

    fn execute(
        elevator: &mut Elevator,
        mv: Move,
        waiting: &mut Vec<Person>,
        delivered: &mut Vec<Person>,
        weights: &FitnessWeights,
    ) {
        let aboard = elevator.load() as i64;

        match mv {
            Move::Down | Move::Up => {
                // Leaving a floor with passengers bound for it.
                let missed = elevator
                    .passengers
                    .iter()
                    .filter(|p| p.destination == elevator.position)
                    .count() as i64;
                elevator.fitness += missed * weights.missed_destination_floor;
                elevator.fitness += aboard * weights.journey_time;
                elevator.fitness += weights.move_penalty;
                elevator.position += mv.delta();
            }
            Move::Idle => {
                elevator.fitness += weights.no_move;
                elevator.fitness += aboard * weights.no_move_with_passenger;
                elevator.fitness += aboard * weights.journey_time;
            }
            Move::Doors => {
                elevator.fitness += weights.door_movement;

                let floor = elevator.position;
                let (arrived, staying): (Vec<Person>, Vec<Person>) = elevator
                    .passengers
                    .drain(..)
                    .partition(|p| p.destination == floor);
                elevator.passengers = staying;
                elevator.fitness += arrived.len() as i64 * weights.drop_out;
                delivered.extend(arrived);

                elevator.fitness += elevator.load() as i64 * weights.journey_time;

                let mut i = 0;
                while i < waiting.len() && elevator.has_room() {
                    if waiting[i].origin == floor {
                        elevator.passengers.push(waiting.remove(i));
                        elevator.fitness += weights.pick_up;
                    } else {
                        i += 1;
                    }
                }
            }
        }
    }

    /// Run the remaining timesteps and report the outcome.
    pub fn run(mut self) -> SimulationOutcome {
        while self.step() {}
        self.outcome()
    }

    /// Report the outcome of the timesteps executed so far.
    pub fn outcome(&self) -> SimulationOutcome {
        let elevator_fitness: Vec<i64> = self.elevators.iter().map(|e| e.fitness).collect();
        SimulationOutcome {
            fitness: self.fitness(),
            elevator_fitness,
            waiting_cost: self.waiting_cost,
            delivered: self.delivered.len(),
            still_waiting: self.waiting.len(),
        }
    }

    /// Fitness accumulated so far.
    pub fn fitness(&self) -> i64 {
        self.waiting_cost + self.elevators.iter().map(|e| e.fitness).sum::<i64>()
    }

    pub fn is_finished(&self) -> bool {
        self.timestep >= self.horizon
    }

    pub fn timestep(&self) -> usize {
        self.timestep
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn waiting(&self) -> &[Person] {
        &self.waiting
    }

    pub fn delivered(&self) -> &[Person] {
        &self.delivered
    }
}

/// Scores members by simulating their plans.
#[derive(Debug, Clone, Default)]
pub struct FitnessEvaluator {
    pub weights: FitnessWeights,
}

impl FitnessEvaluator {
    /// Create an evaluator with the given fitness constants.
    pub fn new(weights: FitnessWeights) -> Self {
        FitnessEvaluator { weights }
    }

    /// Simulate a member's plan without changing the member.
    pub fn simulate(&self, member: &Member, people: &[Person]) -> SimulationOutcome {
        Simulation::new(member, people, &self.weights).run()
    }

    /// Score a member. Only `fitness` fields are written.
    pub fn evaluate_member(&self, member: &mut Member, people: &[Person]) {
        let outcome = self.simulate(member, people);
        member.fitness = outcome.fitness;
        for (elevator, fitness) in member.elevators.iter_mut().zip(outcome.elevator_fitness) {
            elevator.fitness = fitness;
        }
    }

    /// Score every member in parallel. Each simulation owns its copy of `people`.
    pub fn evaluate_population(&self, members: &mut [Member], people: &[Person]) {
        members
            .par_iter_mut()
            .for_each(|member| self.evaluate_member(member, people));
    }
}
