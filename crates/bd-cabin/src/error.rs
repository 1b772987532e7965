//! Cabin error type.

use thiserror::Error;

use crate::{Seat, Tile};

/// Errors produced by `bd-cabin`.
#[derive(Debug, Error)]
pub enum CabinError {
    #[error("cabin needs at least one row and one seat per row (got {rows} × {seats_per_row})")]
    InvalidDimensions { rows: u16, seats_per_row: u8 },

    #[error("seats per row must be even to split across the aisle (got {0})")]
    OddSeatsPerRow(u8),

    #[error("at most {max} seats per row are supported (got {got})")]
    TooManySeats { got: u8, max: u8 },

    #[error("seat {0} is not part of this cabin")]
    SeatNotInMap(Seat),

    #[error("seat {seat} cannot be reached from {from}")]
    Unreachable { from: String, seat: Seat },
}

impl CabinError {
    /// `Unreachable` with a tile origin.
    pub(crate) fn unreachable_from(from: Option<Tile>, seat: Seat) -> Self {
        let from = match from {
            Some(tile) => tile.to_string(),
            None => "the gate".to_string(),
        };
        CabinError::Unreachable { from, seat }
    }
}

pub type CabinResult<T> = Result<T, CabinError>;
