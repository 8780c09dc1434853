//! Error types for the league data fetchers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request to {url} failed with status {status}")]
    Api { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scrape error: {message}")]
    Scrape { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn scrape(message: impl Into<String>) -> Self {
        Self::Scrape { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
