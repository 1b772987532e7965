use bd_cabin::{CabinError, Seat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("unknown boarding policy {0} (expected 0..=5)")]
    UnknownPolicy(u8),

    #[error("unknown boarding policy `{0}` (expected 0..=5 or a policy name)")]
    UnknownPolicyName(String),

    #[error("late fraction must be within [0, 1] (got {0})")]
    InvalidLateFraction(f64),

    #[error(
        "boarding order is not a bijection over {expected} seats: {} missing, {} duplicated",
        .missing.len(),
        .duplicated.len()
    )]
    Assignment {
        expected:   usize,
        missing:    Vec<Seat>,
        duplicated: Vec<Seat>,
    },

    #[error("completion estimate failed: {0}")]
    Estimator(String),

    #[error(transparent)]
    Cabin(#[from] CabinError),
}

pub type OrderResult<T> = Result<T, OrderError>;
