//! Runtime passenger state.

use std::fmt;

use bd_cabin::Tile;
use bd_order::PassengerSpec;

/// Where a passenger is.  Seated passengers hold no tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Not yet on board (including passengers still on their way to the gate).
    Gate,
    On(Tile),
    Seated,
}

impl Position {
    #[inline]
    pub fn tile(self) -> Option<Tile> {
        match self {
            Position::On(tile) => Some(tile),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Gate => write!(f, "gate"),
            Position::On(tile) => write!(f, "{tile}"),
            Position::Seated => write!(f, "seated"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassengerState {
    Waiting,
    Walking,
    /// Loading luggage; `remaining` ticks until done.
    Stowing { remaining: u32 },
    /// Waiting in the row for a seated neighbour to let it past.
    Squeezing { remaining: u32 },
    Seated,
}

impl PassengerState {
    /// `true` when both values are the same variant, ignoring the stowing
    /// countdown.
    #[inline]
    pub fn same_kind(self, other: PassengerState) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    pub fn name(self) -> &'static str {
        match self {
            PassengerState::Waiting => "waiting",
            PassengerState::Walking => "walking",
            PassengerState::Stowing { .. } => "stowing",
            PassengerState::Squeezing { .. } => "squeezing",
            PassengerState::Seated => "seated",
        }
    }
}

impl fmt::Display for PassengerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassengerState::Stowing { remaining } => write!(f, "stowing({remaining})"),
            PassengerState::Squeezing { remaining } => write!(f, "squeezing({remaining})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// One passenger as the simulator sees it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Passenger {
    pub spec: PassengerSpec,
    pub position: Position,
    pub state: PassengerState,
    /// Luggage already stowed, or none to stow.
    pub stowed: bool,
    /// Deepest in-row tile whose seated occupant has already been squeezed
    /// past; `0` before entering the row.
    pub squeezed_to: u8,
}

impl Passenger {
    pub fn new(spec: PassengerSpec) -> Self {
        Self {
            spec,
            position:    Position::Gate,
            state:       PassengerState::Waiting,
            stowed:      spec.bag_count == 0,
            squeezed_to: 0,
        }
    }

    #[inline]
    pub fn is_seated(&self) -> bool {
        self.state == PassengerState::Seated
    }

    /// Moved or changed state kind between two snapshots.
    #[inline]
    pub fn progressed_from(&self, before: &Passenger) -> bool {
        self.position != before.position || !self.state.same_kind(before.state)
    }

    /// Started loading luggage between two snapshots (or stowed it in zero
    /// ticks).
    #[inline]
    pub fn began_stowing_from(&self, before: &Passenger) -> bool {
        let stowing = |p: &Passenger| p.stowed || matches!(p.state, PassengerState::Stowing { .. });
        !stowing(before) && stowing(self)
    }
}
