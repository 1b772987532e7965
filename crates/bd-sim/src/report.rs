//! Per-tick snapshots handed back to callers.

use bd_cabin::Seat;
use bd_core::{PassengerId, Tick};

use crate::{Passenger, PassengerState, Position};

/// One passenger as seen at the end of a tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerView {
    pub id:       PassengerId,
    pub seat:     Seat,
    pub position: Position,
    pub state:    PassengerState,
    pub is_late:  bool,
}

impl From<&Passenger> for PassengerView {
    fn from(p: &Passenger) -> Self {
        Self {
            id:       p.spec.id,
            seat:     p.spec.seat,
            position: p.position,
            state:    p.state,
            is_late:  p.spec.is_late,
        }
    }
}

/// Result of one [`Sim::step`][crate::Sim::step].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// The tick that was processed.
    pub tick: Tick,
    /// `true` once every passenger is seated.
    pub done: bool,
    /// Every passenger, in id order.
    pub passengers: Vec<PassengerView>,
}

impl TickReport {
    pub fn seated_count(&self) -> usize {
        self.passengers.iter().filter(|p| p.state == PassengerState::Seated).count()
    }
}
