//! Overhead-bin fill levels.

use crate::BinModel;

/// Bags already in each row's overhead bin.
///
/// Read-only while a tick is planned.  A passenger's bags are loaded at
/// commit, in the tick it starts stowing, so the space is taken before any
/// later arrival looks at the bin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverheadBins {
    capacity: Option<u32>,
    /// Indexed by `row - 1`.
    fill: Vec<u32>,
}

impl OverheadBins {
    pub fn new(model: BinModel, rows: u16) -> Self {
        Self { capacity: model.bags_per_row, fill: vec![0; rows as usize] }
    }

    /// Bags stowed above `row` so far.
    pub fn fill(&self, row: u16) -> u32 {
        row.checked_sub(1)
            .and_then(|i| self.fill.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn has_room(&self, row: u16, bags: u8) -> bool {
        match self.capacity {
            None => true,
            Some(cap) => self.fill(row).saturating_add(bags as u32) <= cap,
        }
    }

    /// Should a passenger standing in the aisle at `row`, seated in
    /// `seat_row`, stow `bags` here?
    ///
    /// Passengers look down the aisle as far as their own row and use the
    /// bin with room closest to their seat.  With unlimited bins that is
    /// always their own row.  When no bin up to their row has room they
    /// keep the bags and stow them at the seat.
    pub fn stows_at(&self, row: u16, seat_row: u16, bags: u8) -> bool {
        if row > seat_row || !self.has_room(row, bags) {
            return false;
        }
        !(row + 1..=seat_row).any(|ahead| self.has_room(ahead, bags))
    }

    pub(crate) fn load(&mut self, row: u16, bags: u8) {
        if let Some(slot) = row.checked_sub(1).and_then(|i| self.fill.get_mut(i as usize)) {
            *slot += bags as u32;
        }
    }
}
