//! Run configuration, the stowing model, and the in-row and overhead-bin
//! rules.

use std::fmt;
use std::str::FromStr;

use bd_cabin::SeatMap;
use bd_order::{BagModel, BoardingPolicy, LateMode, OrderError};

use crate::{SimError, SimResult};

// ── Stowing ───────────────────────────────────────────────────────────────────

/// Ticks spent stowing luggage: `ticks_per_bag × bags`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StowModel {
    pub ticks_per_bag: u32,
}

impl StowModel {
    #[inline]
    pub fn delay(&self, bags: u8) -> u32 {
        self.ticks_per_bag.saturating_mul(bags as u32)
    }
}

impl Default for StowModel {
    fn default() -> Self {
        StowModel { ticks_per_bag: 2 }
    }
}

/// Where a passenger with luggage stops to stow it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StowPoint {
    /// On the seat tile, just before sitting down.
    #[default]
    Seat,
    /// On the aisle tile level with the passenger's row, blocking the aisle
    /// while the overhead bin is loaded.
    Aisle,
}

impl FromStr for StowPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seat" => Ok(StowPoint::Seat),
            "aisle" | "overhead" => Ok(StowPoint::Aisle),
            other => Err(format!("unknown stow point `{other}` (expected seat|aisle)")),
        }
    }
}

impl fmt::Display for StowPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StowPoint::Seat => write!(f, "seat"),
            StowPoint::Aisle => write!(f, "aisle"),
        }
    }
}

// ── Seat interference ─────────────────────────────────────────────────────────

/// Ticks lost getting a seated passenger out of the way.
///
/// A passenger walking into its row pays `ticks_per_seated` once for every
/// seat between the aisle and its own that is already taken.  `0` lets
/// passengers slip past seated neighbours for free.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatInterference {
    pub ticks_per_seated: u32,
}

impl SeatInterference {
    pub const NONE: SeatInterference = SeatInterference { ticks_per_seated: 0 };
}

impl Default for SeatInterference {
    fn default() -> Self {
        SeatInterference { ticks_per_seated: 1 }
    }
}

// ── Overhead bins ─────────────────────────────────────────────────────────────

/// Overhead-bin space per row, in bags.  Only consulted with
/// [`StowPoint::Aisle`]; `None` means the bins never fill up.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinModel {
    pub bags_per_row: Option<u32>,
}

// ── BoardingConfig ────────────────────────────────────────────────────────────

/// Default consecutive no-progress ticks before a run is declared deadlocked.
pub const DEFAULT_STALL_LIMIT: u64 = 256;

/// Everything [`initialize`][crate::initialize] needs to set up one run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardingConfig {
    pub rows: u16,

    /// Must be even; split evenly across the aisle.
    pub seats_per_row: u8,

    /// Numeric policy selector, `0..=5` (see [`BoardingPolicy`]).
    pub policy: u8,

    /// Fraction of passengers marked late, in `[0, 1]`.
    pub late_fraction: f64,

    pub late_mode: LateMode,

    /// Master RNG seed.  The same seed always produces the same tick count.
    pub seed: u64,

    pub bags: BagModel,

    pub stow: StowModel,

    pub stow_point: StowPoint,

    pub interference: SeatInterference,

    pub bins: BinModel,

    /// Consecutive ticks without any movement or state change after which a
    /// run fails with `Deadlock`.  Must exceed the longest stow delay and the
    /// interference delay.
    pub stall_limit: u64,
}

impl Default for BoardingConfig {
    fn default() -> Self {
        Self {
            rows:          33,
            seats_per_row: 6,
            policy:        BoardingPolicy::Random.id(),
            late_fraction: 0.0,
            late_mode:     LateMode::Immediate,
            seed:          42,
            bags:          BagModel::default(),
            stow:          StowModel::default(),
            stow_point:    StowPoint::Seat,
            interference:  SeatInterference::default(),
            bins:          BinModel::default(),
            stall_limit:   DEFAULT_STALL_LIMIT,
        }
    }
}

impl BoardingConfig {
    /// Check every field without running anything.
    ///
    /// # Errors
    ///
    /// `Cabin` for bad dimensions, `Order` for an unknown policy or a late
    /// fraction outside `[0, 1]`, `Config` for a stall limit that a single
    /// stow or squeeze could exhaust.
    pub fn validate(&self) -> SimResult<()> {
        self.seat_map()?;
        self.boarding_policy()?;
        if !(0.0..=1.0).contains(&self.late_fraction) {
            return Err(OrderError::InvalidLateFraction(self.late_fraction).into());
        }
        let longest_stow = self.stow.delay(self.bags.max_bags);
        check_stall_limit(self.stall_limit, longest_stow.max(self.interference.ticks_per_seated))
    }

    pub fn seat_map(&self) -> SimResult<SeatMap> {
        Ok(SeatMap::new(self.rows, self.seats_per_row)?)
    }

    pub fn boarding_policy(&self) -> SimResult<BoardingPolicy> {
        Ok(BoardingPolicy::try_from(self.policy)?)
    }
}

/// A single passenger may legitimately stand still for `longest_wait` ticks.
pub(crate) fn check_stall_limit(stall_limit: u64, longest_wait: u32) -> SimResult<()> {
    if stall_limit <= longest_wait as u64 {
        return Err(SimError::Config(format!(
            "stall limit {stall_limit} must exceed the longest stow or interference delay \
             ({longest_wait} ticks)"
        )));
    }
    Ok(())
}
