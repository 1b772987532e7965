//! A seat permutation checked against its `SeatMap`.

use bd_cabin::{Seat, SeatMap};

use crate::{OrderError, OrderResult};

/// Seats in queue order.  Construction guarantees every seat of the map
/// appears exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardingOrder {
    seats: Vec<Seat>,
}

impl BoardingOrder {
    /// Wrap `seats` after verifying the bijection onto `map`.
    ///
    /// # Errors
    ///
    /// `Cabin(SeatNotInMap)` for a seat outside the map, `Assignment` when a
    /// seat is missing or repeated.
    pub fn new(map: &SeatMap, seats: Vec<Seat>) -> OrderResult<Self> {
        verify_bijection(map, seats.iter().copied())?;
        Ok(Self { seats })
    }

    #[inline]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

/// Check that `seats` visits every seat of `map` exactly once.
pub(crate) fn verify_bijection(
    map:   &SeatMap,
    seats: impl IntoIterator<Item = Seat>,
) -> OrderResult<()> {
    let mut seen = vec![false; map.seat_count()];
    let mut duplicated = Vec::new();
    for seat in seats {
        let idx = map
            .seat_index(seat)
            .ok_or(bd_cabin::CabinError::SeatNotInMap(seat))?;
        if std::mem::replace(&mut seen[idx], true) {
            duplicated.push(seat);
        }
    }

    let missing: Vec<Seat> = map
        .seats()
        .zip(&seen)
        .filter(|(_, seen)| !**seen)
        .map(|(seat, _)| seat)
        .collect();

    if missing.is_empty() && duplicated.is_empty() {
        Ok(())
    } else {
        Err(OrderError::Assignment {
            expected: map.seat_count(),
            missing,
            duplicated,
        })
    }
}
