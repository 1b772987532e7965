//! Seat identity and derived placement attributes.

use std::fmt;

/// Highest number of seats per row the letter alphabet can label.
pub const MAX_SEATS_PER_ROW: u8 = 26;

/// Index of a seat letter within a row: `SeatLetter(0)` is `A`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatLetter(pub u8);

impl SeatLetter {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The printable letter (`'A'..='Z'`).
    #[inline]
    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parse `'A'..='Z'` (case-insensitive).
    pub fn from_char(c: char) -> Option<SeatLetter> {
        let c = c.to_ascii_uppercase();
        c.is_ascii_uppercase().then(|| SeatLetter(c as u8 - b'A'))
    }
}

impl fmt::Display for SeatLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Side of the aisle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Left => "left",
            Side::Right => "right",
        };
        write!(f, "{s}")
    }
}

/// Window / middle / aisle classification of a seat.
///
/// When a side has a single seat it is both window and aisle; `Window` wins.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    Window,
    Middle,
    Aisle,
}

/// A seat: 1-based row number plus letter.  Ordered by row, then letter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seat {
    pub row: u16,
    pub letter: SeatLetter,
}

impl Seat {
    #[inline]
    pub fn new(row: u16, letter: SeatLetter) -> Self {
        Self { row, letter }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}
