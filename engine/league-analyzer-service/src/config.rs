//! Service configuration management
//!
//! Sources are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `LEAGUE_ANALYZER__*` environment variables
//! (double underscore between nested keys, e.g.
//! `LEAGUE_ANALYZER__LOGGING__LEVEL=debug`).

use anyhow::{Context, Result};
use league_fetcher::FetcherConfig;
use scoring_engine::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ServiceError;

pub const ENV_PREFIX: &str = "LEAGUE_ANALYZER";

/// Main service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Tracked league ids; the first one is used when no league is given
    pub leagues: Vec<String>,

    /// Report output format
    pub output: OutputFormat,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Data source configuration
    pub fetcher: FetcherConfig,

    /// Scoring constants
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "compact".to_string() }
    }
}

impl ServiceConfig {
    /// Reject settings the reports cannot run with
    pub fn validate(&self) -> Result<(), ServiceError> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ServiceError::InvalidConfig {
                    message: format!("invalid log level: {other}"),
                })
            }
        }

        match self.logging.format.as_str() {
            "json" | "pretty" | "compact" => {}
            other => {
                return Err(ServiceError::InvalidConfig {
                    message: format!("invalid log format: {other}"),
                })
            }
        }

        if self.fetcher.http.timeout_secs == 0 {
            return Err(ServiceError::InvalidConfig {
                message: "HTTP timeout must be at least one second".to_string(),
            });
        }

        self.scoring.validate()?;
        Ok(())
    }

    /// League to report on: the explicit one, else the first tracked league
    pub fn resolve_league(&self, explicit: Option<&str>) -> Result<String, ServiceError> {
        explicit
            .map(str::to_string)
            .or_else(|| self.leagues.first().cloned())
            .ok_or(ServiceError::NoLeagueSelected)
    }

    /// Render as TOML, e.g. to seed a config file
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Load configuration from an optional TOML file and the environment.
///
/// The base layer takes the fetcher and scoring crates' own environment
/// overrides (`SLEEPER_API_BASE_URL`, `SCORING_DRAFT_SCALING`, ...).
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let base = ServiceConfig {
        fetcher: FetcherConfig::from_env(),
        scoring: ScoringConfig::from_env()?,
        ..ServiceConfig::default()
    };
    let mut builder = config::Config::builder().add_source(
        config::Config::try_from(&base).context("Failed to build default configuration")?,
    );

    if let Some(path) = path {
        tracing::debug!("Loading configuration from file: {:?}", path);
        builder = builder.add_source(
            config::File::from(path).format(config::FileFormat::Toml).required(true),
        );
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("leagues")
            .try_parsing(true),
    );

    let config: ServiceConfig = builder
        .build()
        .context("Failed to read configuration sources")?
        .try_deserialize()
        .context("Failed to parse configuration")?;

    config.validate()?;
    Ok(config)
}

/// Write the default configuration as TOML
pub fn save_config(config: &ServiceConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    std::fs::write(path, config.to_toml()?)
        .with_context(|| format!("Failed to write configuration: {:?}", path))
}
