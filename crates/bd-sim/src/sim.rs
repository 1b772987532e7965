//! The `Sim` struct and its tick loop.

use std::collections::BTreeSet;

use bd_cabin::{SeatMap, Tile};
use bd_core::{PassengerId, SimClock, Tick};
use bd_order::{ActivationQueue, Boarder};

use crate::bins::OverheadBins;
use crate::movement::{plan, StepContext};
use crate::occupancy::{occupancy_index, seated_tiles, vacated_tiles, TileSet};
use crate::{
    NoopObserver, Passenger, PassengerView, Position, SeatInterference, SimError, SimObserver,
    SimResult, StowModel, StowPoint, TickReport,
};

/// A ready-to-step boarding run.
///
/// Each call to [`step`](Sim::step) processes tick `now` and then advances
/// the clock:
///
/// 1. **Activation**: passengers due at `now` join the gate, ordered by rank.
/// 2. **Snapshot**: `Tile → occupant` index of the current buffer, plus the
///    seat tiles of everyone already seated.
/// 3. **Draft pass**: every move planned from the snapshot alone.  Tiles
///    whose occupant moves in the draft count as vacated.
/// 4. **Settle passes**: every move planned again from the snapshot plus
///    the vacated set, until a pass opens no new tile.  A whole queue
///    closes up in one tick behind a passenger that moves, and nobody moves
///    more than one tile.
/// 5. **Commit**: the back buffer is checked for tile exclusivity, new
///    overhead-bin loads are recorded, then the buffers swap.
/// 6. **Completion / stall check**.
///
/// Every tile has exactly one predecessor on any seat path, so at most one
/// passenger can plan to enter it; the commit check guards that invariant.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or
/// [`initialize`][crate::initialize].
pub struct Sim {
    pub(crate) map: SeatMap,
    pub(crate) clock: SimClock,

    /// Current passenger state, indexed by `PassengerId`.
    pub(crate) front: Vec<Passenger>,
    /// Scratch buffer the planning passes write into.
    pub(crate) back: Vec<Passenger>,

    /// Activated passengers not yet on board, lowest rank first.
    pub(crate) gate: BTreeSet<Boarder>,
    /// Passengers that have not reached the gate yet.
    pub(crate) arrivals: ActivationQueue,

    pub(crate) stow: StowModel,
    pub(crate) stow_point: StowPoint,
    pub(crate) interference: SeatInterference,
    pub(crate) bins: OverheadBins,

    pub(crate) stall_limit: u64,
    /// Consecutive ticks without progress.
    pub(crate) stalled_for: u64,

    pub(crate) seated: usize,
    pub(crate) total: Option<Tick>,
    pub(crate) last_report: Option<TickReport>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Process one tick.
    ///
    /// Once every passenger is seated this is a no-op that returns the final
    /// report again.
    ///
    /// # Errors
    ///
    /// `Deadlock` after `stall_limit` ticks without progress, `Occupancy`
    /// if two passengers would share a tile, `Cabin` if a passenger is off
    /// its path.
    pub fn step(&mut self) -> SimResult<TickReport> {
        self.step_observed(&mut NoopObserver)
    }

    /// Step until every passenger is seated and return the total tick count.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Tick> {
        loop {
            if let Some(total) = self.total {
                observer.on_sim_end(total);
                return Ok(total);
            }
            self.step_observed(observer)?;
        }
    }

    /// `Some(n)` once done: one past the tick the last passenger sat down.
    #[inline]
    pub fn total_ticks(&self) -> Option<Tick> {
        self.total
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.total.is_some()
    }

    /// The tick the next `step` will process.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn seat_map(&self) -> &SeatMap {
        &self.map
    }

    /// Current passenger state, in id order.
    #[inline]
    pub fn passengers(&self) -> &[Passenger] {
        &self.front
    }

    /// Overhead-bin fill levels so far.
    #[inline]
    pub fn bins(&self) -> &OverheadBins {
        &self.bins
    }

    /// The report of the most recent step, if any.
    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    pub fn seated_count(&self) -> usize {
        self.seated
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickReport> {
        if let (Some(_), Some(report)) = (self.total, &self.last_report) {
            return Ok(report.clone());
        }

        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;

        let done = self.seated == self.front.len();
        if done {
            let total = now + 1;
            self.total = Some(total);
            log::info!("all {} passengers seated after {} ticks", self.front.len(), total.0);
        }

        let report = TickReport {
            tick:       now,
            done,
            passengers: self.front.iter().map(PassengerView::from).collect(),
        };
        observer.on_tick_end(&report);
        self.last_report = Some(report.clone());
        self.clock.advance();
        Ok(report)
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // ── Phase 1: activation ───────────────────────────────────────────
        let due = self.arrivals.drain_through(now);
        if !due.is_empty() {
            log::trace!("{now}: {} passengers reached the gate", due.len());
            self.gate.extend(due);
        }

        // ── Phase 2: snapshot ─────────────────────────────────────────────
        let occupancy = occupancy_index(&self.front)?;
        let seated = seated_tiles(&self.map, &self.front);
        let gate_head = self.gate.first().map(|b| b.id);

        // ── Phases 3–4: draft, then settle until no further tile opens ───
        let mut vacated = TileSet::default();
        loop {
            let ctx = StepContext {
                map:          &self.map,
                occupancy:    &occupancy,
                vacated:      &vacated,
                seated:       &seated,
                bins:         &self.bins,
                gate_head,
                stow:         self.stow,
                stow_point:   self.stow_point,
                interference: self.interference,
            };
            plan_into(&self.front, &ctx, &mut self.back)?;
            // Vacated tiles only ever grow, so an unchanged count is a fixed point.
            let opened = vacated_tiles(&self.front, &self.back);
            if opened.len() == vacated.len() {
                break;
            }
            vacated = opened;
        }

        // ── Phase 5: commit ───────────────────────────────────────────────
        occupancy_index(&self.back)?;

        let mut progressed = false;
        for (before, after) in self.front.iter().zip(&self.back) {
            if !after.progressed_from(before) {
                continue;
            }
            progressed = true;
            if before.position == Position::Gate {
                self.gate.remove(&Boarder::from(&after.spec));
            }
            if let Some(Tile::Aisle { row }) = after.position.tile() {
                if after.began_stowing_from(before) {
                    self.bins.load(row, after.spec.bag_count);
                }
            }
            if after.is_seated() && !before.is_seated() {
                self.seated += 1;
                observer.on_passenger_seated(after.spec.id, now);
            }
        }
        std::mem::swap(&mut self.front, &mut self.back);

        // ── Phase 6: stall detection ──────────────────────────────────────
        let on_board = !self.gate.is_empty() || self.front.iter().any(|p| p.position.tile().is_some());
        if progressed || !on_board {
            self.stalled_for = 0;
            return Ok(());
        }
        self.stalled_for += 1;
        if self.stalled_for >= self.stall_limit {
            let stalled: Vec<PassengerId> = self
                .front
                .iter()
                .filter(|p| p.position.tile().is_some())
                .map(|p| p.spec.id)
                .chain(self.gate.iter().map(|b| b.id))
                .collect();
            log::warn!(
                "{now}: no progress for {} ticks; {} passengers stalled",
                self.stalled_for,
                stalled.len()
            );
            return Err(SimError::Deadlock { tick: now, stalled });
        }
        Ok(())
    }
}

/// Plan every passenger against `ctx`, overwriting `out`.
fn plan_into(front: &[Passenger], ctx: &StepContext<'_>, out: &mut Vec<Passenger>) -> SimResult<()> {
    #[cfg(not(feature = "parallel"))]
    {
        out.clear();
        for p in front {
            out.push(plan(p, ctx)?);
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        *out = front
            .par_iter()
            .map(|p| plan(p, ctx))
            .collect::<SimResult<Vec<Passenger>>>()?;
    }

    Ok(())
}
