//! Passenger specifications produced by the order pipeline.

use bd_cabin::{Seat, SeatMap};
use bd_core::{PassengerId, SimRng, Tick};

use crate::order::verify_bijection;
use crate::OrderResult;

/// Everything fixed about a passenger before the first tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerSpec {
    /// Position in the policy's base order; stable for the run.
    pub id: PassengerId,
    pub seat: Seat,
    /// Position in the final gate queue (lower boards first).
    pub rank: u32,
    pub is_late: bool,
    pub bag_count: u8,
    /// Tick at which the passenger reaches the gate.
    pub activation_tick: Tick,
}

impl PassengerSpec {
    /// An on-time passenger whose rank equals its id.
    pub fn on_time(id: u32, seat: Seat, bag_count: u8) -> Self {
        Self {
            id: PassengerId(id),
            seat,
            rank: id,
            is_late: false,
            bag_count,
            activation_tick: Tick::ZERO,
        }
    }
}

/// Carry-on luggage distribution: uniform `0..=max_bags` per passenger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BagModel {
    pub max_bags: u8,
}

impl BagModel {
    /// Nobody carries luggage.
    pub const NONE: BagModel = BagModel { max_bags: 0 };

    pub fn draw(&self, rng: &mut SimRng) -> u8 {
        if self.max_bags == 0 {
            0
        } else {
            rng.gen_range(0..=self.max_bags)
        }
    }
}

impl Default for BagModel {
    fn default() -> Self {
        BagModel { max_bags: 2 }
    }
}

/// The full passenger list of a run, held in gate-queue (rank) order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Manifest {
    passengers: Vec<PassengerSpec>,
}

impl Manifest {
    /// Build from specs in any order; they are sorted by rank.
    pub fn new(mut passengers: Vec<PassengerSpec>) -> Self {
        passengers.sort_by_key(|p| p.rank);
        Self { passengers }
    }

    #[inline]
    pub fn passengers(&self) -> &[PassengerSpec] {
        &self.passengers
    }

    pub fn into_passengers(self) -> Vec<PassengerSpec> {
        self.passengers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn late_count(&self) -> usize {
        self.passengers.iter().filter(|p| p.is_late).count()
    }

    /// Seats in gate-queue order.
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.passengers.iter().map(|p| p.seat)
    }

    /// Check that the manifest still covers every seat of `map` exactly once.
    pub fn verify(&self, map: &SeatMap) -> OrderResult<()> {
        verify_bijection(map, self.seats())
    }
}
