use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the league data fetchers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Sleeper league API
    pub sleeper: SleeperConfig,

    /// FantasyPros projection pages
    pub projections: ProjectionsConfig,

    /// FantasyCalc market values
    pub market: MarketConfig,

    /// Shared HTTP client settings
    pub http: HttpConfig,

    /// On-disk player identity cache
    pub identity_cache: IdentityCacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeperConfig {
    pub api_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionsConfig {
    /// Base URL; pages live at `{base_url}/{position}.php?week=...`
    pub base_url: String,

    /// `week` query value for full-season projections
    pub season_week: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub api_base_url: String,
    pub is_dynasty: bool,
    pub num_qbs: u32,
    pub num_teams: u32,
    /// Points per reception (0, 0.5 or 1)
    pub ppr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityCacheConfig {
    /// JSON file holding player id -> identity
    pub path: PathBuf,

    /// Refresh the file once it is older than this
    pub max_age_hours: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            sleeper: SleeperConfig::default(),
            projections: ProjectionsConfig::default(),
            market: MarketConfig::default(),
            http: HttpConfig::default(),
            identity_cache: IdentityCacheConfig::default(),
        }
    }
}

impl Default for SleeperConfig {
    fn default() -> Self {
        Self { api_base_url: "https://api.sleeper.app/v1".to_string() }
    }
}

impl Default for ProjectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.fantasypros.com/nfl/projections".to_string(),
            season_week: "draft".to_string(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.fantasycalc.com".to_string(),
            is_dynasty: false,
            num_qbs: 1,
            num_teams: 12,
            ppr: 1.0,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
        }
    }
}

impl Default for IdentityCacheConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("data/player_ids.json"), max_age_hours: 24 }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SLEEPER_API_BASE_URL") {
            config.sleeper.api_base_url = url;
        }

        if let Ok(url) = std::env::var("FANTASYPROS_BASE_URL") {
            config.projections.base_url = url;
        }

        if let Ok(url) = std::env::var("FANTASYCALC_API_BASE_URL") {
            config.market.api_base_url = url;
        }

        if let Ok(teams) = std::env::var("FANTASYCALC_NUM_TEAMS") {
            config.market.num_teams = teams.parse().unwrap_or(12);
        }

        if let Ok(ppr) = std::env::var("FANTASYCALC_PPR") {
            config.market.ppr = ppr.parse().unwrap_or(1.0);
        }

        if let Ok(timeout) = std::env::var("FETCHER_TIMEOUT_SECS") {
            config.http.timeout_secs = timeout.parse().unwrap_or(30);
        }

        if let Ok(path) = std::env::var("PLAYER_ID_CACHE_PATH") {
            config.identity_cache.path = PathBuf::from(path);
        }

        if let Ok(hours) = std::env::var("PLAYER_ID_CACHE_MAX_AGE_HOURS") {
            config.identity_cache.max_age_hours = hours.parse().unwrap_or(24);
        }

        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// FantasyCalc current-values endpoint with the configured league shape
    pub fn market_values_url(&self) -> String {
        let m = &self.market;
        format!(
            "{}/values/current?isDynasty={}&numQbs={}&numTeams={}&ppr={}",
            m.api_base_url, m.is_dynasty, m.num_qbs, m.num_teams, m.ppr
        )
    }

    /// FantasyPros projection page; `week` of `None` means the full season
    pub fn projections_url(&self, position: &str, week: Option<u32>) -> String {
        let week = week.map(|w| w.to_string()).unwrap_or_else(|| self.projections.season_week.clone());
        format!("{}/{}.php?week={}", self.projections.base_url, position, week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = FetcherConfig::default();
        assert_eq!(
            config.market_values_url(),
            "https://api.fantasycalc.com/values/current?isDynasty=false&numQbs=1&numTeams=12&ppr=1"
        );
        assert_eq!(
            config.projections_url("qb", None),
            "https://www.fantasypros.com/nfl/projections/qb.php?week=draft"
        );
        assert_eq!(
            config.projections_url("dst", Some(5)),
            "https://www.fantasypros.com/nfl/projections/dst.php?week=5"
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: FetcherConfig =
            serde_json::from_str(r#"{"identity_cache": {"max_age_hours": 6}}"#).unwrap();
        assert_eq!(config.identity_cache.max_age_hours, 6);
        assert_eq!(config.identity_cache.path, PathBuf::from("data/player_ids.json"));
        assert_eq!(config.sleeper.api_base_url, "https://api.sleeper.app/v1");
    }

    #[test]
    fn test_half_ppr_url() {
        let mut config = FetcherConfig::default();
        config.market.ppr = 0.5;
        assert!(config.market_values_url().ends_with("ppr=0.5"));
    }
}
