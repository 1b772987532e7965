//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `BdError` where they
//! surface a core failure.

use thiserror::Error;

/// The common base error for `bd-*` crates.
#[derive(Debug, Error)]
pub enum BdError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `bd-core`.
pub type BdResult<T> = Result<T, BdError>;
