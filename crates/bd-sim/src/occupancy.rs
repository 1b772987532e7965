//! Per-tick tile occupancy index and the tile sets derived from it.
//!
//! Rebuilt from scratch each tick: O(passengers), and only passengers on a
//! tile contribute.  With the `fx-hash` feature the maps use FxHash, which
//! is noticeably faster on small `Copy` keys like [`Tile`].

use bd_cabin::{SeatMap, Tile};
use bd_core::PassengerId;

use crate::{Passenger, SimError, SimResult};

#[cfg(feature = "fx-hash")]
pub type TileMap<V> = rustc_hash::FxHashMap<Tile, V>;
#[cfg(not(feature = "fx-hash"))]
pub type TileMap<V> = std::collections::HashMap<Tile, V>;

#[cfg(feature = "fx-hash")]
pub type TileSet = rustc_hash::FxHashSet<Tile>;
#[cfg(not(feature = "fx-hash"))]
pub type TileSet = std::collections::HashSet<Tile>;

/// `Tile → occupant` for every passenger standing on a tile.
///
/// # Errors
///
/// `Occupancy` if two passengers share a tile.
pub fn occupancy_index(passengers: &[Passenger]) -> SimResult<TileMap<PassengerId>> {
    let mut index = TileMap::default();
    for p in passengers {
        let Some(tile) = p.position.tile() else { continue };
        if let Some(first) = index.insert(tile, p.spec.id) {
            return Err(SimError::Occupancy { tile, first, second: p.spec.id });
        }
    }
    Ok(index)
}

/// Tiles whose occupant left them between `before` and `after`.
///
/// Both slices are indexed by passenger id.
pub fn vacated_tiles(before: &[Passenger], after: &[Passenger]) -> TileSet {
    before
        .iter()
        .zip(after)
        .filter(|(b, a)| b.position != a.position)
        .filter_map(|(b, _)| b.position.tile())
        .collect()
}

/// Seat tiles of every seated passenger.  Nobody stands on them, but
/// reaching a seat further in means getting past whoever sits there.
pub fn seated_tiles(map: &SeatMap, passengers: &[Passenger]) -> TileSet {
    passengers
        .iter()
        .filter(|p| p.is_seated())
        .map(|p| map.seat_tile(p.spec.seat))
        .collect()
}
