//! `bd-sim` — the boarding tick loop.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`config`]    | `BoardingConfig`, stowing, interference and bin models   |
//! | [`bins`]      | `OverheadBins` fill levels                               |
//! | [`passenger`] | Runtime `Passenger`, `Position`, `PassengerState`        |
//! | [`movement`]  | Pure per-passenger move planning                         |
//! | [`occupancy`] | Per-tick `Tile → PassengerId` index                      |
//! | [`sim`]       | `Sim`: double-buffered tick loop with settle passes      |
//! | [`builder`]   | `SimBuilder`                                             |
//! | [`estimate`]  | `DryRunEstimator` for AfterEveryone late arrivals        |
//! | [`report`]    | `TickReport`, `PassengerView`                            |
//! | [`observer`]  | `SimObserver`, `NoopObserver`                            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs every planning pass on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the occupancy index.                         |
//! | `serde`    | `Serialize`/`Deserialize` on config and reports.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bd_sim::{initialize, BoardingConfig, NoopObserver};
//!
//! let mut sim = initialize(&BoardingConfig { policy: 2, ..Default::default() })?;
//! let total = sim.run(&mut NoopObserver)?;
//! ```

pub mod bins;
pub mod builder;
pub mod config;
pub mod error;
pub mod estimate;
pub mod movement;
pub mod observer;
pub mod occupancy;
pub mod passenger;
pub mod report;
pub mod sim;


pub use bins::OverheadBins;
pub use builder::SimBuilder;
pub use config::{BinModel, BoardingConfig, SeatInterference, StowModel, StowPoint};
pub use error::{ErrorKind, SimError, SimResult};
pub use estimate::DryRunEstimator;
pub use observer::{NoopObserver, SimObserver};
pub use passenger::{Passenger, PassengerState, Position};
pub use report::{PassengerView, TickReport};
pub use sim::Sim;

use bd_core::SimRng;
use bd_order::LateArrivalScheduler;

/// Build the seat map, generate the boarding order, schedule late arrivals,
/// and return a [`Sim`] ready for its first `step`.
///
/// # Errors
///
/// Any [`BoardingConfig::validate`] failure, or a generated manifest that
/// is not a bijection over the seats.
pub fn initialize(config: &BoardingConfig) -> SimResult<Sim> {
    config.validate()?;
    let map = config.seat_map()?;
    let policy = config.boarding_policy()?;

    let mut rng = SimRng::new(config.seed);
    let order = policy.generate(&map, &mut rng)?;

    let estimator = DryRunEstimator::from_config(map, config);
    let manifest = LateArrivalScheduler::new(config.late_fraction, config.late_mode)?
        .with_bags(config.bags)
        .schedule(&order, &mut rng, &estimator)?;
    manifest.verify(&map)?;

    log::debug!(
        "initialized {}x{} cabin, policy {policy}, {} late ({}), seed {}",
        map.rows(),
        map.seats_per_row(),
        manifest.late_count(),
        config.late_mode,
        config.seed
    );

    SimBuilder::new(map, manifest.into_passengers())
        .stow(config.stow)
        .stow_point(config.stow_point)
        .interference(config.interference)
        .bins(config.bins)
        .stall_limit(config.stall_limit)
        .build()
}
