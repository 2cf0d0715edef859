//! Failures detected while validating a search before its first poll round.
//!
//! Once the loop has started there is no error path: the objective is assumed
//! total and free of side effects.

use thiserror::Error;

/// Errors returned by [`CompassSearch`](crate::vector::CompassSearch) and
/// [`MultiStart`](crate::vector::MultiStart).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("initial point must have at least one dimension")]
    InvalidDimension,

    #[error("step_size must be finite and positive")]
    StepSize,

    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("reduction must lie strictly between 0 and 1")]
    Reduction,

    /// The objective returned NaN or an infinity at the initial point.
    #[error("objective is not finite at the initial point")]
    NonFiniteObjective,

    #[error("multi-start requires at least one starting point")]
    NoStartingPoints,

    /// A sampling box had non-finite or inverted bounds.
    #[error("bounds for dimension {dimension} must be finite with low <= high and a finite width")]
    InvalidBounds { dimension: usize },
}
