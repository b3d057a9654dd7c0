//! Per-poll signal calculations.
//!
//! Everything here is pure: the one-shot gating that turns a reading into
//! an alert lives with the session state.

pub mod crossover;
pub mod intraday;
pub mod volume;

pub use crossover::{CrossPolarity, averages_converged};
pub use intraday::{MoveDetector, MoveReading};
pub use volume::is_volume_spike;

/// Direction of an intraday move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(&self) -> char {
        match self {
            Direction::Up => '+',
            Direction::Down => '-',
        }
    }
}
