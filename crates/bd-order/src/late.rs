//! Late-arrival perturbation of a boarding order.
//!
//! # Modes
//!
//! - **Immediate**: each late passenger draws a distinct offset from
//!   `1..=n + 10`.  Its activation tick is that offset and the queue is
//!   stably re-sorted by `base_index + offset`, so late passengers are
//!   interleaved further back at mutually distinct ticks.
//! - **AfterEveryone**: late passengers are held back until the on-time
//!   passengers would have finished boarding on their own, then board in a
//!   freshly shuffled order.  "Would have finished" comes from a
//!   [`CompletionEstimator`]; `bd-sim` answers it with a dry run.

use std::fmt;
use std::str::FromStr;

use bd_core::{SimRng, Tick};

use crate::{BagModel, BoardingOrder, Manifest, OrderError, OrderResult, PassengerSpec};

/// Offsets for Immediate mode are drawn from `1..=n + IMMEDIATE_OFFSET_SLACK`.
pub const IMMEDIATE_OFFSET_SLACK: usize = 10;

/// Relative distance from an integer below which a late-count product is
/// taken to be that integer.
const LATE_COUNT_TOLERANCE: f64 = 1e-9;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LateMode {
    #[default]
    Immediate,
    AfterEveryone,
}

impl FromStr for LateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "immediate" | "yes" => Ok(LateMode::Immediate),
            "after" | "after-everyone" | "no" => Ok(LateMode::AfterEveryone),
            other => Err(format!("unknown late mode `{other}` (expected immediate|after)")),
        }
    }
}

impl fmt::Display for LateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LateMode::Immediate => "immediate",
            LateMode::AfterEveryone => "after-everyone",
        };
        write!(f, "{s}")
    }
}

/// Answers "how many ticks would these passengers take to board alone?".
///
/// The returned tick count is one past the tick at which the last of them
/// sits down, so it is strictly greater than that tick.
pub trait CompletionEstimator {
    fn completion_tick(&self, passengers: &[PassengerSpec]) -> OrderResult<Tick>;
}

impl<F> CompletionEstimator for F
where
    F: Fn(&[PassengerSpec]) -> OrderResult<Tick>,
{
    fn completion_tick(&self, passengers: &[PassengerSpec]) -> OrderResult<Tick> {
        self(passengers)
    }
}

/// Turns a [`BoardingOrder`] into a [`Manifest`]: draws bags, picks late
/// passengers, and assigns ranks and activation ticks.
#[derive(Clone, Copy, Debug)]
pub struct LateArrivalScheduler {
    late_fraction: f64,
    mode: LateMode,
    bags: BagModel,
}

impl LateArrivalScheduler {
    /// # Errors
    ///
    /// `InvalidLateFraction` unless `late_fraction` is a finite value in
    /// `[0, 1]`.
    pub fn new(late_fraction: f64, mode: LateMode) -> OrderResult<Self> {
        if !(0.0..=1.0).contains(&late_fraction) {
            return Err(OrderError::InvalidLateFraction(late_fraction));
        }
        Ok(Self { late_fraction, mode, bags: BagModel::default() })
    }

    pub fn with_bags(mut self, bags: BagModel) -> Self {
        self.bags = bags;
        self
    }

    #[inline]
    pub fn mode(&self) -> LateMode {
        self.mode
    }

    /// `⌊late_fraction × passenger_count⌋`.
    ///
    /// Fractions usually arrive as `percent / 100.0`, so a product that lands
    /// within rounding noise of an integer counts as that integer:
    /// `0.29 × 100` is 28.999… in `f64` but must mark 29 passengers.
    pub fn late_count(&self, passenger_count: usize) -> usize {
        let exact = self.late_fraction * passenger_count as f64;
        let nearest = exact.round();
        let count = if (exact - nearest).abs() <= LATE_COUNT_TOLERANCE * nearest.max(1.0) {
            nearest
        } else {
            exact.floor()
        };
        (count as usize).min(passenger_count)
    }

    /// Build the manifest for `order`.
    ///
    /// RNG consumption order is fixed: bags (base order), late selection,
    /// then the mode-specific draws.  `estimator` is only consulted in
    /// `AfterEveryone` mode with at least one late passenger.
    pub fn schedule<E: CompletionEstimator + ?Sized>(
        &self,
        order:     &BoardingOrder,
        rng:       &mut SimRng,
        estimator: &E,
    ) -> OrderResult<Manifest> {
        let n = order.len();
        let mut specs: Vec<PassengerSpec> = order
            .seats()
            .iter()
            .enumerate()
            .map(|(i, &seat)| PassengerSpec::on_time(i as u32, seat, self.bags.draw(rng)))
            .collect();

        let late_count = self.late_count(n);
        if late_count == 0 {
            return Ok(Manifest::new(specs));
        }
        for i in rng.sample_indices(n, late_count) {
            specs[i].is_late = true;
        }
        log::debug!("marked {late_count} of {n} passengers late ({})", self.mode);

        let specs = match self.mode {
            LateMode::Immediate => interleave(specs, late_count, rng),
            LateMode::AfterEveryone => hold_back(specs, rng, estimator)?,
        };
        Ok(Manifest::new(specs))
    }
}

/// Immediate mode: distinct positive offsets, re-sorted by base + offset.
fn interleave(specs: Vec<PassengerSpec>, late_count: usize, rng: &mut SimRng) -> Vec<PassengerSpec> {
    let n = specs.len();
    let offsets = rng.sample_indices(n + IMMEDIATE_OFFSET_SLACK, late_count);

    let (on_time, mut late): (Vec<PassengerSpec>, Vec<PassengerSpec>) =
        specs.into_iter().partition(|s| !s.is_late);
    for (spec, offset) in late.iter_mut().zip(offsets) {
        spec.activation_tick = Tick(offset as u64 + 1);
    }

    let mut keyed: Vec<(u64, PassengerSpec)> = on_time
        .into_iter()
        .chain(late)
        .map(|spec| (spec.id.0 as u64 + spec.activation_tick.0, spec))
        .collect();

    // Stable: ties keep base order.
    keyed.sort_by_key(|&(key, spec)| (key, spec.id));
    keyed
        .into_iter()
        .enumerate()
        .map(|(rank, (_, mut spec))| {
            spec.rank = rank as u32;
            spec
        })
        .collect()
}

/// AfterEveryone mode: on-time passengers keep their order; late ones are
/// shuffled behind them and released once the on-time crowd is seated.
fn hold_back<E: CompletionEstimator + ?Sized>(
    specs:     Vec<PassengerSpec>,
    rng:       &mut SimRng,
    estimator: &E,
) -> OrderResult<Vec<PassengerSpec>> {
    let (mut on_time, mut late): (Vec<PassengerSpec>, Vec<PassengerSpec>) =
        specs.into_iter().partition(|s| !s.is_late);

    for (rank, spec) in on_time.iter_mut().enumerate() {
        spec.rank = rank as u32;
    }
    let release = estimator.completion_tick(&on_time)?;
    log::debug!(
        "{} on-time passengers board alone in {} ticks; releasing {} late passengers at {release}",
        on_time.len(),
        release.0,
        late.len()
    );

    rng.shuffle(&mut late);
    let first_late_rank = on_time.len();
    for (k, spec) in late.iter_mut().enumerate() {
        spec.rank = (first_late_rank + k) as u32;
        spec.activation_tick = release;
    }

    on_time.extend(late);
    Ok(on_time)
}
