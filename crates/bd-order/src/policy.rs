//! Boarding policies: the numeric selector 0–5 and its seat orders.
//!
//! | Id | Policy          | Order                                                   |
//! |----|-----------------|---------------------------------------------------------|
//! | 0  | `Random`        | uniform permutation of all seats                        |
//! | 1  | `BackToFront`   | rows back → front, letters shuffled per row             |
//! | 2  | `WindowToAisle` | rows back → front, alternating-side window → aisle      |
//! | 3  | `SkipRows`      | odd rows back → front, then even rows; letters shuffled |
//! | 4  | `Zones`         | 3 contiguous zones back → front, seats shuffled per zone|
//! | 5  | `FourGroups`    | 4 row-skipping, side-switching groups                   |
//!
//! # Four groups
//!
//! Each group starts at a row/side and walks forward two rows at a time,
//! switching side at every step:
//!
//! ```text
//! G1: last row left,  last-2 right, last-4 left,  …
//! G2: last row right, last-2 left,  last-4 right, …
//! G3: last-1 left,    last-3 right, …
//! G4: last-1 right,   last-3 left,  …
//! ```
//!
//! G1 ∪ G2 cover every seat of the rows with the same parity as the last
//! row, G3 ∪ G4 the rest.  Rows stay back → front inside a group; letters
//! are shuffled within each (row, side) block.

use std::fmt;
use std::str::FromStr;

use bd_cabin::{Seat, SeatMap, Side};
use bd_core::SimRng;

use crate::{BoardingOrder, OrderError, OrderResult};

/// Selector for a [`BoardingOrder`] strategy.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BoardingPolicy {
    #[default]
    Random        = 0,
    BackToFront   = 1,
    WindowToAisle = 2,
    SkipRows      = 3,
    Zones         = 4,
    FourGroups    = 5,
}

impl BoardingPolicy {
    pub const ALL: [BoardingPolicy; 6] = [
        BoardingPolicy::Random,
        BoardingPolicy::BackToFront,
        BoardingPolicy::WindowToAisle,
        BoardingPolicy::SkipRows,
        BoardingPolicy::Zones,
        BoardingPolicy::FourGroups,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            BoardingPolicy::Random        => "random",
            BoardingPolicy::BackToFront   => "back-to-front",
            BoardingPolicy::WindowToAisle => "window-to-aisle",
            BoardingPolicy::SkipRows      => "skip-rows",
            BoardingPolicy::Zones         => "zones",
            BoardingPolicy::FourGroups    => "four-groups",
        }
    }

    /// Produce the seat queue order for `map`.
    ///
    /// # Errors
    ///
    /// `Assignment` if the produced order is not a bijection onto the map's
    /// seats (a policy bug, never expected).
    pub fn generate(self, map: &SeatMap, rng: &mut SimRng) -> OrderResult<BoardingOrder> {
        let seats = match self {
            BoardingPolicy::Random => {
                let mut seats: Vec<Seat> = map.seats().collect();
                rng.shuffle(&mut seats);
                seats
            }
            BoardingPolicy::BackToFront => {
                let mut seats = Vec::with_capacity(map.seat_count());
                for row in (1..=map.rows()).rev() {
                    push_shuffled_row(map, row, rng, &mut seats);
                }
                seats
            }
            BoardingPolicy::WindowToAisle => {
                let letters = map.window_to_aisle_letters();
                let letters = &letters;
                (1..=map.rows())
                    .rev()
                    .flat_map(move |row| letters.iter().map(move |&l| Seat::new(row, l)))
                    .collect()
            }
            BoardingPolicy::SkipRows => {
                let mut seats = Vec::with_capacity(map.seat_count());
                let (odd, even): (Vec<u16>, Vec<u16>) =
                    (1..=map.rows()).rev().partition(|row| row % 2 == 1);
                for row in odd.into_iter().chain(even) {
                    push_shuffled_row(map, row, rng, &mut seats);
                }
                seats
            }
            BoardingPolicy::Zones => zones(map, rng),
            BoardingPolicy::FourGroups => four_groups(map, rng),
        };
        BoardingOrder::new(map, seats)
    }
}

/// Append `row`'s seats in a random letter order.
fn push_shuffled_row(map: &SeatMap, row: u16, rng: &mut SimRng, out: &mut Vec<Seat>) {
    let mut block: Vec<Seat> = map.row_seats(row).collect();
    rng.shuffle(&mut block);
    out.extend(block);
}

/// Back / middle / front zones of `rows / 3` rows each; the front zone takes
/// the remainder (all rows when there are fewer than three).
fn zones(map: &SeatMap, rng: &mut SimRng) -> Vec<Seat> {
    let rows_desc: Vec<u16> = (1..=map.rows()).rev().collect();
    let zone_size = rows_desc.len() / 3;
    let bounds = [0, zone_size, 2 * zone_size, rows_desc.len()];

    let mut seats = Vec::with_capacity(map.seat_count());
    for zone in bounds.windows(2) {
        let mut block: Vec<Seat> = rows_desc[zone[0]..zone[1]]
            .iter()
            .flat_map(|&row| map.row_seats(row))
            .collect();
        rng.shuffle(&mut block);
        seats.extend(block);
    }
    seats
}

fn four_groups(map: &SeatMap, rng: &mut SimRng) -> Vec<Seat> {
    let last = map.rows();
    let starts = [
        (last, Side::Left),
        (last, Side::Right),
        (last - 1, Side::Left),
        (last - 1, Side::Right),
    ];

    let mut seats = Vec::with_capacity(map.seat_count());
    for (start_row, start_side) in starts {
        if start_row == 0 {
            continue;
        }
        let (mut row, mut side) = (start_row, start_side);
        loop {
            let mut block: Vec<Seat> = map
                .letters_on(side)
                .into_iter()
                .map(|l| Seat::new(row, l))
                .collect();
            rng.shuffle(&mut block);
            seats.extend(block);

            if row <= 2 {
                break;
            }
            row -= 2;
            side = side.opposite();
        }
    }
    seats
}

impl TryFrom<u8> for BoardingPolicy {
    type Error = OrderError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        BoardingPolicy::ALL
            .get(id as usize)
            .copied()
            .ok_or(OrderError::UnknownPolicy(id))
    }
}

impl FromStr for BoardingPolicy {
    type Err = OrderError;

    /// Accepts the numeric id (`"2"`) or the name (`"window-to-aisle"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u8>() {
            return BoardingPolicy::try_from(id);
        }
        BoardingPolicy::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OrderError::UnknownPolicyName(s.to_string()))
    }
}

impl fmt::Display for BoardingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.name())
    }
}
