//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! `#[from]` variant.

use thiserror::Error;

use crate::SimTime;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("reaction rate must be finite and > 0, got {0}")]
    InvalidRate(f64),

    #[error("clock cannot move backwards from {now} to {requested}")]
    ClockRegression { now: SimTime, requested: SimTime },
}

/// Shorthand result type for `pt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
