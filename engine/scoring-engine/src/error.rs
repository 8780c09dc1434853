//! Error types for the scoring engine

use thiserror::Error;

/// Errors raised while building scoring inputs.
///
/// The scoring operations themselves never fail; these only come out of
/// parsers and validating constructors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    #[error("Season length must be positive, got {0}")]
    InvalidSeasonLength(u32),

    #[error("Week must be positive, got {0}")]
    InvalidWeek(u32),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
