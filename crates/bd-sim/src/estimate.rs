//! Completion estimate by dry run.

use bd_cabin::SeatMap;
use bd_core::{PassengerId, Tick};
use bd_order::{CompletionEstimator, OrderError, OrderResult, PassengerSpec};

use crate::{
    BinModel, BoardingConfig, NoopObserver, SeatInterference, SimBuilder, SimResult, StowModel,
    StowPoint,
};

/// Answers [`CompletionEstimator`] by boarding the given passengers alone
/// with the real tick loop and the run's movement settings.
#[derive(Clone, Copy, Debug)]
pub struct DryRunEstimator {
    pub map:          SeatMap,
    pub stow:         StowModel,
    pub stow_point:   StowPoint,
    pub interference: SeatInterference,
    pub bins:         BinModel,
    pub stall_limit:  u64,
}

impl DryRunEstimator {
    /// The estimator matching the run `config` describes on `map`.
    pub fn from_config(map: SeatMap, config: &BoardingConfig) -> Self {
        Self {
            map,
            stow:         config.stow,
            stow_point:   config.stow_point,
            interference: config.interference,
            bins:         config.bins,
            stall_limit:  config.stall_limit,
        }
    }

    /// Total ticks for `passengers` boarding on their own.  Ids are
    /// renumbered in the given order; an empty list takes no time.
    pub fn dry_run(&self, passengers: &[PassengerSpec]) -> SimResult<Tick> {
        if passengers.is_empty() {
            return Ok(Tick::ZERO);
        }
        let specs: Vec<PassengerSpec> = passengers
            .iter()
            .enumerate()
            .map(|(i, spec)| PassengerSpec { id: PassengerId(i as u32), ..*spec })
            .collect();
        SimBuilder::new(self.map, specs)
            .stow(self.stow)
            .stow_point(self.stow_point)
            .interference(self.interference)
            .bins(self.bins)
            .stall_limit(self.stall_limit)
            .build()?
            .run(&mut NoopObserver)
    }
}

impl CompletionEstimator for DryRunEstimator {
    fn completion_tick(&self, passengers: &[PassengerSpec]) -> OrderResult<Tick> {
        self.dry_run(passengers).map_err(|e| OrderError::Estimator(e.to_string()))
    }
}
