use bd_cabin::{CabinError, Tile};
use bd_core::{PassengerId, Tick};
use bd_order::OrderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Cabin(#[from] CabinError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("deadlock at {tick}: {} passengers made no progress", .stalled.len())]
    Deadlock {
        tick:    Tick,
        stalled: Vec<PassengerId>,
    },

    #[error("tile {tile} claimed by both {first} and {second}")]
    Occupancy {
        tile:   Tile,
        first:  PassengerId,
        second: PassengerId,
    },
}

/// Coarse failure category, for callers that only care what went wrong.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// Bad dimensions, policy, fraction, stall limit, or a seat the cabin
    /// cannot route to.
    Configuration,
    /// A generated order did not cover every seat exactly once.
    AssignmentInvariant,
    Deadlock,
    Occupancy,
}

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::Config(_) | SimError::Cabin(_) => ErrorKind::Configuration,
            SimError::Order(OrderError::Assignment { .. }) => ErrorKind::AssignmentInvariant,
            SimError::Order(_) => ErrorKind::Configuration,
            SimError::Deadlock { .. } => ErrorKind::Deadlock,
            SimError::Occupancy { .. } => ErrorKind::Occupancy,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
