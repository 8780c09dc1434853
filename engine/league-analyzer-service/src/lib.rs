//! League Analyzer service library
//!
//! Configuration, logging and the report layer behind the `league-analyzer`
//! command line tool.

pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod reports;

pub use config::{load_config, save_config, OutputFormat, ServiceConfig};
pub use error::ServiceError;
pub use logging::initialize_logging_with_config;
pub use reports::{LeagueAnalyzer, Report};
