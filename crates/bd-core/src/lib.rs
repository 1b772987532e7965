//! `bd-core` — foundational types for the `rust_boarding` simulator.
//!
//! Every other `bd-*` crate depends on this one.  It has no `bd-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`ids`]     | `PassengerId`                                     |
//! | [`time`]    | `Tick`, `SimClock`                                |
//! | [`rng`]     | `SimRng` (seeded, injectable)                     |
//! | [`error`]   | `BdError`, `BdResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BdError, BdResult};
pub use ids::PassengerId;
pub use rng::SimRng;
pub use time::{SimClock, Tick};
