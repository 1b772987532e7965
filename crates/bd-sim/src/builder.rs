//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeSet;

use bd_cabin::{CabinError, SeatMap};
use bd_core::SimClock;
use bd_order::{ActivationQueue, OrderError, PassengerSpec};

use crate::bins::OverheadBins;
use crate::config::{check_stall_limit, DEFAULT_STALL_LIMIT};
use crate::{
    BinModel, Passenger, SeatInterference, Sim, SimError, SimResult, StowModel, StowPoint,
};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SeatMap`]: the cabin
/// - `Vec<PassengerSpec>`: ids `0..n`, each on a distinct seat of the map
///   (a subset of the seats is fine)
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                 |
/// |----------------------|-------------------------|
/// | `.stow(m)`           | `StowModel::default()`  |
/// | `.stow_point(p)`     | `StowPoint::Seat`       |
/// | `.interference(i)`   | 1 tick per seated       |
/// | `.bins(b)`           | unlimited               |
/// | `.stall_limit(n)`    | 256                     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(map, manifest.into_passengers())
///     .stow(StowModel { ticks_per_bag: 3 })
///     .build()?;
/// let total = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    map:          SeatMap,
    passengers:   Vec<PassengerSpec>,
    stow:         StowModel,
    stow_point:   StowPoint,
    interference: SeatInterference,
    bins:         BinModel,
    stall_limit:  u64,
}

impl SimBuilder {
    pub fn new(map: SeatMap, passengers: Vec<PassengerSpec>) -> Self {
        Self {
            map,
            passengers,
            stow:         StowModel::default(),
            stow_point:   StowPoint::Seat,
            interference: SeatInterference::default(),
            bins:         BinModel::default(),
            stall_limit:  DEFAULT_STALL_LIMIT,
        }
    }

    pub fn stow(mut self, stow: StowModel) -> Self {
        self.stow = stow;
        self
    }

    pub fn stow_point(mut self, stow_point: StowPoint) -> Self {
        self.stow_point = stow_point;
        self
    }

    pub fn interference(mut self, interference: SeatInterference) -> Self {
        self.interference = interference;
        self
    }

    pub fn bins(mut self, bins: BinModel) -> Self {
        self.bins = bins;
        self
    }

    pub fn stall_limit(mut self, stall_limit: u64) -> Self {
        self.stall_limit = stall_limit;
        self
    }

    /// Validate the passengers and return a [`Sim`] at tick 0.
    ///
    /// # Errors
    ///
    /// - `Config` for an empty list, ids that are not exactly `0..n`, or a
    ///   stall limit that one passenger's stow or squeeze could exhaust.
    /// - `Cabin(SeatNotInMap)` for a seat outside the map.
    /// - `Order(Assignment)` when two passengers share a seat.
    pub fn build(mut self) -> SimResult<Sim> {
        if self.passengers.is_empty() {
            return Err(SimError::Config("no passengers to board".into()));
        }

        // ── Ids must index the passenger buffers directly ─────────────────
        self.passengers.sort_by_key(|p| p.id);
        if let Some((i, p)) = self
            .passengers
            .iter()
            .enumerate()
            .find(|(i, p)| p.id.index() != *i)
        {
            return Err(SimError::Config(format!(
                "passenger ids must be 0..{}; found {} at position {i}",
                self.passengers.len(),
                p.id
            )));
        }

        // ── Seats: inside the map, never shared ───────────────────────────
        let mut taken = vec![false; self.map.seat_count()];
        let mut duplicated = Vec::new();
        for p in &self.passengers {
            let idx = self.map.seat_index(p.seat).ok_or(CabinError::SeatNotInMap(p.seat))?;
            if std::mem::replace(&mut taken[idx], true) {
                duplicated.push(p.seat);
            }
        }
        if !duplicated.is_empty() {
            return Err(OrderError::Assignment {
                expected: self.passengers.len(),
                missing: Vec::new(),
                duplicated,
            }
            .into());
        }

        let longest_stow = self
            .passengers
            .iter()
            .map(|p| self.stow.delay(p.bag_count))
            .max()
            .unwrap_or(0);
        check_stall_limit(
            self.stall_limit,
            longest_stow.max(self.interference.ticks_per_seated),
        )?;

        let arrivals = ActivationQueue::build_from_manifest(&self.passengers);
        let front: Vec<Passenger> = self.passengers.into_iter().map(Passenger::new).collect();
        log::debug!(
            "built sim: {} passengers on {}x{} seats, {} activation ticks",
            front.len(),
            self.map.rows(),
            self.map.seats_per_row(),
            arrivals.tick_count()
        );

        Ok(Sim {
            map:          self.map,
            clock:        SimClock::new(),
            back:         Vec::with_capacity(front.len()),
            front,
            gate:         BTreeSet::new(),
            arrivals,
            stow:         self.stow,
            stow_point:   self.stow_point,
            interference: self.interference,
            bins:         OverheadBins::new(self.bins, self.map.rows()),
            stall_limit:  self.stall_limit,
            stalled_for:  0,
            seated:       0,
            total:        None,
            last_report:  None,
        })
    }
}
