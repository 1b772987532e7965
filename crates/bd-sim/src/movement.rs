//! Per-passenger move planning.
//!
//! [`plan`] is a pure function of one passenger and a read-only
//! [`StepContext`]; the tick loop calls it once per planning pass and never
//! lets it see another passenger's *new* state.  That makes every pass
//! order-independent and safe to run in parallel.
//!
//! Opening more tiles can only let more passengers move, never fewer, which
//! is what lets the tick loop repeat passes until the vacated set settles.

use bd_cabin::{CabinError, SeatMap, Tile};
use bd_core::PassengerId;

use crate::bins::OverheadBins;
use crate::occupancy::{TileMap, TileSet};
use crate::{
    Passenger, PassengerState, Position, SeatInterference, SimResult, StowModel, StowPoint,
};

/// Everything a passenger may look at while planning its move.
pub struct StepContext<'a> {
    pub map:          &'a SeatMap,
    /// Occupancy at the start of the tick.
    pub occupancy:    &'a TileMap<PassengerId>,
    /// Tiles found to empty this tick by earlier passes.  Empty in the draft.
    pub vacated:      &'a TileSet,
    /// Seat tiles of passengers seated at the start of the tick.
    pub seated:       &'a TileSet,
    pub bins:         &'a OverheadBins,
    /// The only passenger allowed to step from the gate onto the door tile.
    pub gate_head:    Option<PassengerId>,
    pub stow:         StowModel,
    pub stow_point:   StowPoint,
    pub interference: SeatInterference,
}

impl StepContext<'_> {
    /// Free at the start of the tick, or emptied this tick.
    #[inline]
    fn is_open(&self, tile: Tile) -> bool {
        !self.occupancy.contains_key(&tile) || self.vacated.contains(&tile)
    }

    /// Does `p` stop to stow its luggage on `tile`?
    fn stows_on(&self, p: &Passenger, tile: Tile) -> bool {
        if p.stowed {
            return false;
        }
        let seat = p.spec.seat;
        match (self.stow_point, tile) {
            (StowPoint::Aisle, Tile::Aisle { row }) => {
                self.bins.stows_at(row, seat.row, p.spec.bag_count)
            }
            // Under the seat, or no bin on the way had room.
            _ => tile == self.map.seat_tile(seat),
        }
    }

    /// `(depth, ticks)` when stepping onto `to` means squeezing past a
    /// seated passenger that `p` has not yet got past.
    fn squeeze(&self, p: &Passenger, to: Tile) -> Option<(u8, u32)> {
        let Tile::Row { depth, .. } = to else { return None };
        let ticks = self.interference.ticks_per_seated;
        (ticks > 0 && depth > p.squeezed_to && self.seated.contains(&to)).then_some((depth, ticks))
    }
}

/// The passenger's state after this tick.
///
/// # Errors
///
/// `Cabin(Unreachable)` if the passenger is somewhere its path never goes.
pub fn plan(p: &Passenger, ctx: &StepContext<'_>) -> SimResult<Passenger> {
    let mut next = *p;
    let seat = p.spec.seat;

    match p.state {
        PassengerState::Seated => {}

        PassengerState::Waiting => {
            if ctx.gate_head == Some(p.spec.id) {
                if let Some(door) = ctx.map.next_tile(None, seat)? {
                    if ctx.is_open(door) {
                        enter(&mut next, door, ctx);
                    }
                }
            }
        }

        PassengerState::Walking => walk(&mut next, ctx)?,

        PassengerState::Squeezing { remaining } => {
            if remaining > 1 {
                next.state = PassengerState::Squeezing { remaining: remaining - 1 };
            } else {
                next.state = PassengerState::Walking;
                walk(&mut next, ctx)?;
            }
        }

        PassengerState::Stowing { remaining } => {
            if remaining > 1 {
                next.state = PassengerState::Stowing { remaining: remaining - 1 };
            } else {
                next.stowed = true;
                if on_tile(p)? == ctx.map.seat_tile(seat) {
                    sit(&mut next);
                } else {
                    next.state = PassengerState::Walking;
                }
            }
        }
    }
    Ok(next)
}

/// One step along the path from the current tile, if nothing is in the way.
fn walk(next: &mut Passenger, ctx: &StepContext<'_>) -> SimResult<()> {
    let tile = on_tile(next)?;
    match ctx.map.next_tile(Some(tile), next.spec.seat)? {
        None => sit(next),
        Some(to) => {
            if let Some((depth, ticks)) = ctx.squeeze(next, to) {
                next.squeezed_to = depth;
                next.state = PassengerState::Squeezing { remaining: ticks };
            } else if ctx.is_open(to) {
                enter(next, to, ctx);
            }
            // Otherwise blocked; hold position.
        }
    }
    Ok(())
}

/// Step onto `tile` and apply the arrival rules.
fn enter(next: &mut Passenger, tile: Tile, ctx: &StepContext<'_>) {
    next.position = Position::On(tile);
    next.state = PassengerState::Walking;

    if ctx.stows_on(next, tile) {
        let delay = ctx.stow.delay(next.spec.bag_count);
        if delay > 0 {
            next.state = PassengerState::Stowing { remaining: delay };
            return;
        }
        next.stowed = true;
    }
    if next.stowed && tile == ctx.map.seat_tile(next.spec.seat) {
        sit(next);
    }
}

#[inline]
fn sit(next: &mut Passenger) {
    next.position = Position::Seated;
    next.state = PassengerState::Seated;
}

fn on_tile(p: &Passenger) -> SimResult<Tile> {
    p.position.tile().ok_or_else(|| {
        CabinError::Unreachable { from: p.position.to_string(), seat: p.spec.seat }.into()
    })
}
