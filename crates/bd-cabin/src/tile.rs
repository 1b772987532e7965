//! Discrete walkable cells.
//!
//! Aisle tiles and in-row tiles are disjoint: a passenger that has turned
//! into its row no longer holds any aisle tile.  Seated passengers hold no
//! tile at all.

use std::fmt;

use crate::Side;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Aisle cell level with `row`.  `Aisle { row: 1 }` is the door tile.
    Aisle { row: u16 },
    /// Cell inside `row` on `side`, `depth` seats out from the aisle.
    Row { row: u16, side: Side, depth: u8 },
}

impl Tile {
    /// The boarding-door tile every passenger enters through.
    pub const DOOR: Tile = Tile::Aisle { row: 1 };

    #[inline]
    pub fn row(self) -> u16 {
        match self {
            Tile::Aisle { row } | Tile::Row { row, .. } => row,
        }
    }

    /// Number of moves from the gate to this tile.  Strictly increases along
    /// every seat path.
    #[inline]
    pub fn distance_from_gate(self) -> u32 {
        match self {
            Tile::Aisle { row } => row as u32,
            Tile::Row { row, depth, .. } => row as u32 + depth as u32,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Aisle { row } => write!(f, "aisle@{row}"),
            Tile::Row { row, side, depth } => write!(f, "row{row}/{side}/{depth}"),
        }
    }
}
