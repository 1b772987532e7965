//! `bd-cabin` — the static description of a single-aisle cabin.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`seat`]  | `Seat`, `SeatLetter`, `Side`, `Placement`                   |
//! | [`tile`]  | `Tile` — discrete walkable aisle/row cells                  |
//! | [`map`]   | `SeatMap` — seat enumeration, geometry, and seat paths      |
//! | [`error`] | `CabinError`, `CabinResult<T>`                              |
//!
//! # Geometry
//!
//! ```text
//!            left side         right side
//!   row r   A  B  C  |aisle|  D  E  F
//!   depth   3  2  1           1  2  3
//! ```
//!
//! Depth counts seats outward from the aisle.  Every passenger follows the
//! same path shape: the door tile `Aisle{1}`, down the aisle to its row,
//! then sideways through `Row{row, side, 1..=depth}`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod map;
pub mod seat;
pub mod tile;


pub use error::{CabinError, CabinResult};
pub use map::SeatMap;
pub use seat::{Placement, Seat, SeatLetter, Side};
pub use tile::Tile;
