//! `bd-order` — who boards when.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`policy`]     | `BoardingPolicy` (selector 0–5) and seat-order generation |
//! | [`order`]      | `BoardingOrder` — a verified seat permutation             |
//! | [`manifest`]   | `PassengerSpec`, `Manifest`, `BagModel`                   |
//! | [`late`]       | `LateArrivalScheduler`, `LateMode`, `CompletionEstimator` |
//! | [`activation`] | `ActivationQueue` — tick → passengers reaching the gate   |
//! | [`error`]      | `OrderError`, `OrderResult<T>`                            |
//!
//! # Pipeline
//!
//! ```text
//! SeatMap ──BoardingPolicy::generate──▶ BoardingOrder
//!         ──LateArrivalScheduler::schedule──▶ Manifest (rank + activation tick)
//!         ──ActivationQueue::build_from_manifest──▶ consumed by bd-sim
//! ```
//!
//! Every random choice draws from an injected [`bd_core::SimRng`], so a
//! seed fully determines the manifest.

pub mod activation;
pub mod error;
pub mod late;
pub mod manifest;
pub mod order;
pub mod policy;

#[cfg(test)]
mod tests;

pub use activation::{ActivationQueue, Boarder};
pub use error::{OrderError, OrderResult};
pub use late::{CompletionEstimator, LateArrivalScheduler, LateMode};
pub use manifest::{BagModel, Manifest, PassengerSpec};
pub use order::BoardingOrder;
pub use policy::BoardingPolicy;
