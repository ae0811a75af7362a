//! Elevator move codes and the move legality table.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single elevator action for one timestep of the planning horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Move {
    Down,
    #[default]
    Idle,
    Up,
    Doors,
}

const AFTER_DOWN: [Move; 2] = [Move::Down, Move::Doors];
const AFTER_IDLE: [Move; 4] = [Move::Down, Move::Idle, Move::Up, Move::Doors];
const AFTER_UP: [Move; 2] = [Move::Up, Move::Doors];
const AFTER_DOORS: [Move; 3] = [Move::Down, Move::Idle, Move::Up];

impl Move {
    /// Every move code, in code order.
    pub const ALL: [Move; 4] = [Move::Down, Move::Idle, Move::Up, Move::Doors];

    /// The integer code of the move: -1 down, 0 idle, 1 up, 2 doors.
    pub fn code(self) -> i8 {
        match self {
            Move::Down => -1,
            Move::Idle => 0,
            Move::Up => 1,
            Move::Doors => 2,
        }
    }

    /// Floor change caused by this move.
    pub fn delta(self) -> i32 {
        match self {
            Move::Down => -1,
            Move::Up => 1,
            Move::Idle | Move::Doors => 0,
        }
    }

    /// Whether the move changes the floor.
    pub fn is_travel(self) -> bool {
        matches!(self, Move::Down | Move::Up)
    }

    /// Moves that may follow `previous`.
    ///
    /// A moving elevator has to open its doors before it can reverse or stop, and doors
    /// are never operated twice in a row.
    pub fn allowed_after(previous: Move) -> &'static [Move] {
        match previous {
            Move::Down => &AFTER_DOWN,
            Move::Idle => &AFTER_IDLE,
            Move::Up => &AFTER_UP,
            Move::Doors => &AFTER_DOORS,
        }
    }

    /// Check whether `self` may follow `previous`.
    pub fn is_allowed_after(self, previous: Move) -> bool {
        Move::allowed_after(previous).contains(&self)
    }

    /// Substitution candidates used by neighbor-substitution crossover: the moves allowed
    /// after `self`, excluding `self`.
    pub fn neighbors(self) -> Vec<Move> {
        Move::allowed_after(self)
            .iter()
            .copied()
            .filter(|&mv| mv != self)
            .collect()
    }

    /// The same travel in the opposite direction. Non-travel moves are returned unchanged.
    pub fn reversed(self) -> Move {
        match self {
            Move::Down => Move::Up,
            Move::Up => Move::Down,
            other => other,
        }
    }

    /// Single-character symbol used when printing plans.
    pub fn symbol(self) -> char {
        match self {
            Move::Down => 'v',
            Move::Idle => '.',
            Move::Up => '^',
            Move::Doors => 'D',
        }
    }
}

impl TryFrom<i8> for Move {
    type Error = ConfigError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Move::Down),
            0 => Ok(Move::Idle),
            1 => Ok(Move::Up),
            2 => Ok(Move::Doors),
            other => Err(ConfigError::UnknownMove(other)),
        }
    }
}

impl From<Move> for i8 {
    fn from(mv: Move) -> Self {
        mv.code()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Check a whole path against the legality table and the floor range.
///
/// `previous` is the move made just before the path starts and `position` the floor the
/// elevator starts on.
pub fn is_legal_path(path: &[Move], position: i32, previous: Move, floor_number: i32) -> bool {
    let mut floor = position;
    let mut last = previous;

    for &mv in path {
        if !mv.is_allowed_after(last) {
            return false;
        }
        floor += mv.delta();
        if floor < 0 || floor >= floor_number {
            return false;
        }
        last = mv;
    }

    true
}
