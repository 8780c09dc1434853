//! Error types for the league analyzer service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No league selected: pass --league or set `leagues` in the configuration")]
    NoLeagueSelected,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Scoring configuration error: {0}")]
    Scoring(#[from] scoring_engine::ScoringError),
}
