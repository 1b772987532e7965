//! `SeatMap` — the immutable seat layout of the cabin.
//!
//! # Layout
//!
//! Seats are enumerated row-major: row `1..=rows`, letter `A..` within each
//! row.  [`SeatMap::seat_index`] is the position in that enumeration and is
//! used as a dense index for bijection checks and per-seat arrays.
//!
//! The first `half = seats_per_row / 2` letters are on the left side with `A`
//! at the window; the rest are on the right side with the last letter at the
//! window.

use crate::seat::MAX_SEATS_PER_ROW;
use crate::{CabinError, CabinResult, Placement, Seat, SeatLetter, Side, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatMap {
    rows: u16,
    seats_per_row: u8,
}

impl SeatMap {
    /// Build a map of `rows` rows with `seats_per_row` seats each.
    ///
    /// # Errors
    ///
    /// Fails when either dimension is zero, when `seats_per_row` is odd, or
    /// when it exceeds the 26-letter alphabet.
    pub fn new(rows: u16, seats_per_row: u8) -> CabinResult<Self> {
        if rows == 0 || seats_per_row == 0 {
            return Err(CabinError::InvalidDimensions { rows, seats_per_row });
        }
        if seats_per_row % 2 != 0 {
            return Err(CabinError::OddSeatsPerRow(seats_per_row));
        }
        if seats_per_row > MAX_SEATS_PER_ROW {
            return Err(CabinError::TooManySeats {
                got: seats_per_row,
                max: MAX_SEATS_PER_ROW,
            });
        }
        Ok(Self { rows, seats_per_row })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[inline]
    pub fn seats_per_row(&self) -> u8 {
        self.seats_per_row
    }

    /// Seats on each side of the aisle.
    #[inline]
    pub fn half(&self) -> u8 {
        self.seats_per_row / 2
    }

    #[inline]
    pub fn seat_count(&self) -> usize {
        self.rows as usize * self.seats_per_row as usize
    }

    // ── Enumeration ───────────────────────────────────────────────────────

    /// Letters of one row in alphabetical order.
    pub fn letters(&self) -> impl Iterator<Item = SeatLetter> + Clone {
        (0..self.seats_per_row).map(SeatLetter)
    }

    /// Every seat, ascending row then ascending letter.
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (1..=self.rows).flat_map(move |row| self.letters().map(move |l| Seat::new(row, l)))
    }

    /// Seats of `row` in alphabetical order.
    pub fn row_seats(&self, row: u16) -> impl Iterator<Item = Seat> + '_ {
        self.letters().map(move |l| Seat::new(row, l))
    }

    /// Letters on `side`, ordered window first.
    pub fn letters_on(&self, side: Side) -> Vec<SeatLetter> {
        let half = self.half();
        match side {
            Side::Left => (0..half).map(SeatLetter).collect(),
            Side::Right => (half..self.seats_per_row).rev().map(SeatLetter).collect(),
        }
    }

    /// Alternating-side window-to-aisle letter order: for six seats,
    /// `A F B E C D`.
    pub fn window_to_aisle_letters(&self) -> Vec<SeatLetter> {
        let left = self.letters_on(Side::Left);
        let right = self.letters_on(Side::Right);
        left.into_iter()
            .zip(right)
            .flat_map(|(l, r)| [l, r])
            .collect()
    }

    #[inline]
    pub fn contains(&self, seat: Seat) -> bool {
        (1..=self.rows).contains(&seat.row) && seat.letter.0 < self.seats_per_row
    }

    /// Dense row-major index of `seat`, or `None` if it is not in the map.
    #[inline]
    pub fn seat_index(&self, seat: Seat) -> Option<usize> {
        self.contains(seat).then(|| {
            (seat.row as usize - 1) * self.seats_per_row as usize + seat.letter.index()
        })
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn side(&self, letter: SeatLetter) -> Side {
        if letter.0 < self.half() { Side::Left } else { Side::Right }
    }

    /// Seats between the aisle and `letter`, inclusive: 1 next to the aisle,
    /// `half()` at the window.
    #[inline]
    pub fn depth(&self, letter: SeatLetter) -> u8 {
        let half = self.half();
        if letter.0 < half {
            half - letter.0
        } else {
            letter.0 - half + 1
        }
    }

    pub fn placement(&self, letter: SeatLetter) -> Placement {
        let depth = self.depth(letter);
        if depth == self.half() {
            Placement::Window
        } else if depth == 1 {
            Placement::Aisle
        } else {
            Placement::Middle
        }
    }

    /// The row tile a passenger stands on when it has reached `seat`.
    #[inline]
    pub fn seat_tile(&self, seat: Seat) -> Tile {
        Tile::Row {
            row:   seat.row,
            side:  self.side(seat.letter),
            depth: self.depth(seat.letter),
        }
    }

    /// The tile after `from` on the path to `seat`.
    ///
    /// `from == None` means the passenger is still at the gate.  Returns
    /// `Ok(None)` once `from` is the seat tile itself.
    ///
    /// # Errors
    ///
    /// `SeatNotInMap` for a foreign seat, `Unreachable` when `from` is not on
    /// the path (e.g. past the target row, or in a different row).
    pub fn next_tile(&self, from: Option<Tile>, seat: Seat) -> CabinResult<Option<Tile>> {
        if !self.contains(seat) {
            return Err(CabinError::SeatNotInMap(seat));
        }
        let side = self.side(seat.letter);
        let target_depth = self.depth(seat.letter);

        match from {
            None => Ok(Some(Tile::DOOR)),
            Some(Tile::Aisle { row }) if row < seat.row => Ok(Some(Tile::Aisle { row: row + 1 })),
            Some(Tile::Aisle { row }) if row == seat.row => {
                Ok(Some(Tile::Row { row, side, depth: 1 }))
            }
            Some(Tile::Row { row, side: s, depth })
                if row == seat.row && s == side && depth <= target_depth =>
            {
                if depth == target_depth {
                    Ok(None)
                } else {
                    Ok(Some(Tile::Row { row, side, depth: depth + 1 }))
                }
            }
            other => Err(CabinError::unreachable_from(other, seat)),
        }
    }

    /// Number of moves from the gate to `seat`.
    #[inline]
    pub fn path_len(&self, seat: Seat) -> u32 {
        self.seat_tile(seat).distance_from_gate()
    }
}
