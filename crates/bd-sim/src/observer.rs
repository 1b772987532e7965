//! Simulation observer trait for progress reporting and tracing.

use bd_core::{PassengerId, Tick};

use crate::TickReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: seat-time recorder
///
/// ```rust,ignore
/// struct SeatTimes(Vec<(PassengerId, Tick)>);
///
/// impl SimObserver for SeatTimes {
///     fn on_passenger_seated(&mut self, id: PassengerId, tick: Tick) {
///         self.0.push((id, tick));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after each tick with the full passenger snapshot.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once per passenger, in the tick it sits down.
    fn on_passenger_seated(&mut self, _id: PassengerId, _tick: Tick) {}

    /// Called once after the final tick.  `total_ticks` is one past the tick
    /// in which the last passenger sat down.
    fn on_sim_end(&mut self, _total_ticks: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
