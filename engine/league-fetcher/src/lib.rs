//! League data fetchers
//!
//! Pulls league state from Sleeper, season and weekly projections from
//! FantasyPros and trade values from FantasyCalc, and hands them to the
//! scoring engine as plain in-memory tables through [`LeagueDataSource`].

pub mod config;
pub mod error;
pub mod identity;
pub mod market;
pub mod models;
pub mod projections;
pub mod sleeper;
pub mod source;

pub use config::FetcherConfig;
pub use error::FetchError;
pub use identity::PlayerIdCache;
pub use market::MarketValueClient;
pub use models::{DraftResult, LeagueMetadata, LeagueRosters, TradeRecord};
pub use projections::ProjectionScraper;
pub use sleeper::SleeperClient;
pub use source::{HttpLeagueDataSource, LeagueDataSource};
