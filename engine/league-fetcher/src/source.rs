//! The league data boundary consumed by the reports
//!
//! Every operation is infallible from the caller's side: failures are logged
//! and turned into an empty value, which the reports present as "not enough
//! data".

use crate::config::FetcherConfig;
use crate::error::Result;
use crate::identity::{identities_from_players, PlayerIdCache};
use crate::market::MarketValueClient;
use crate::models::{DraftResult, LeagueMetadata, LeagueRosters, SleeperTransaction, TradeRecord};
use crate::projections::ProjectionScraper;
use crate::sleeper::SleeperClient;
use async_trait::async_trait;
use scoring_engine::{MatchupEntry, PlayerDirectory, PlayerProjection};
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::{info, warn};

#[async_trait]
pub trait LeagueDataSource: Send + Sync {
    /// `None` when the league cannot be loaded
    async fn fetch_league_metadata(&self, league_id: &str) -> Option<LeagueMetadata>;

    async fn fetch_rosters_and_users(&self, league_id: &str) -> LeagueRosters;

    async fn fetch_draft_picks(&self, league_id: &str) -> DraftResult;

    async fn fetch_season_projections(&self) -> Vec<PlayerProjection>;

    /// Weekly projected points keyed by player name
    async fn fetch_weekly_projections(&self, week: u32) -> HashMap<String, f64>;

    async fn fetch_matchups(&self, league_id: &str, week: u32) -> Vec<MatchupEntry>;

    async fn fetch_trades(&self, league_id: &str) -> Vec<TradeRecord>;

    /// Market value keyed by player name
    async fn fetch_market_values(&self) -> HashMap<String, f64>;

    /// Player id -> identity lookup, used as the scorers' `IdentityResolver`
    async fn player_directory(&self) -> PlayerDirectory;
}

/// Live implementation over Sleeper, FantasyPros and FantasyCalc
pub struct HttpLeagueDataSource {
    sleeper: SleeperClient,
    projections: ProjectionScraper,
    market: MarketValueClient,
    identity_cache: PlayerIdCache,
    directory: OnceCell<PlayerDirectory>,
    default_season_length: u32,
}

impl HttpLeagueDataSource {
    pub fn new(config: FetcherConfig, default_season_length: u32) -> Result<Self> {
        Ok(Self {
            sleeper: SleeperClient::new(&config)?,
            projections: ProjectionScraper::new(config.clone())?,
            market: MarketValueClient::new(config.clone())?,
            identity_cache: PlayerIdCache::new(&config.identity_cache),
            directory: OnceCell::new(),
            default_season_length,
        })
    }

    async fn draft(&self, league_id: &str) -> Result<DraftResult> {
        let drafts = self.sleeper.drafts(league_id).await?;
        let Some(draft) = drafts.into_iter().next() else {
            return Ok(DraftResult::default());
        };

        let picks = self.sleeper.draft_picks(&draft.draft_id).await?;
        let scoreable: Vec<_> = picks.iter().filter_map(|p| p.to_draft_pick()).collect();
        if scoreable.len() < picks.len() {
            warn!("Skipped {} unnamed picks in draft {}", picks.len() - scoreable.len(), draft.draft_id);
        }

        Ok(DraftResult {
            scheduled_start: draft.scheduled_start(),
            draft_id: Some(draft.draft_id),
            status: draft.status,
            picks: scoreable,
        })
    }

    async fn rosters(&self, league_id: &str) -> Result<LeagueRosters> {
        let users = self.sleeper.users(league_id).await?;
        let rosters = self.sleeper.rosters(league_id).await?;
        Ok(LeagueRosters::from_sleeper(&users, &rosters))
    }

    async fn trades(&self, league_id: &str) -> Result<Vec<TradeRecord>> {
        let league = self.sleeper.league(league_id).await?;
        let current_week = league.into_metadata(self.default_season_length).current_week;

        let mut rounds = Vec::new();
        for round in 1..=current_week {
            rounds.push((round, self.sleeper.transactions(league_id, round).await));
        }
        let trades = completed_trades(rounds);
        info!("Found {} trades in league {} through week {}", trades.len(), league_id, current_week);
        Ok(trades)
    }
}

#[async_trait]
impl LeagueDataSource for HttpLeagueDataSource {
    async fn fetch_league_metadata(&self, league_id: &str) -> Option<LeagueMetadata> {
        match self.sleeper.league(league_id).await {
            Ok(league) => Some(league.into_metadata(self.default_season_length)),
            Err(e) => {
                warn!("Failed to fetch league {}: {}", league_id, e);
                None
            }
        }
    }

    async fn fetch_rosters_and_users(&self, league_id: &str) -> LeagueRosters {
        or_neutral(self.rosters(league_id).await, "rosters")
    }

    async fn fetch_draft_picks(&self, league_id: &str) -> DraftResult {
        or_neutral(self.draft(league_id).await, "draft picks")
    }

    async fn fetch_season_projections(&self) -> Vec<PlayerProjection> {
        or_neutral(self.projections.season_projections().await, "season projections")
    }

    async fn fetch_weekly_projections(&self, week: u32) -> HashMap<String, f64> {
        or_neutral(self.projections.weekly_projections(week).await, "weekly projections")
    }

    async fn fetch_matchups(&self, league_id: &str, week: u32) -> Vec<MatchupEntry> {
        let matchups = or_neutral(self.sleeper.matchups(league_id, week).await, "matchups");
        matchups.into_iter().map(MatchupEntry::from).collect()
    }

    async fn fetch_trades(&self, league_id: &str) -> Vec<TradeRecord> {
        or_neutral(self.trades(league_id).await, "trades")
    }

    async fn fetch_market_values(&self) -> HashMap<String, f64> {
        or_neutral(self.market.current_values().await, "market values")
    }

    async fn player_directory(&self) -> PlayerDirectory {
        self.directory
            .get_or_init(|| async {
                self.identity_cache
                    .directory(|| async {
                        let players = self.sleeper.players().await?;
                        Ok(identities_from_players(players))
                    })
                    .await
            })
            .await
            .clone()
    }
}

/// Trades from every round that loaded; a failed round is logged and skipped
fn completed_trades(rounds: Vec<(u32, Result<Vec<SleeperTransaction>>)>) -> Vec<TradeRecord> {
    rounds
        .into_iter()
        .flat_map(|(round, result)| or_neutral(result, &format!("transactions for round {round}")))
        .filter(|t| t.is_trade() && t.status.as_deref() != Some("failed"))
        .map(TradeRecord::from)
        .collect()
}

fn or_neutral<T: Default>(result: Result<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to fetch {}: {}", what, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn test_failures_become_empty_values() {
        let failed: Result<Vec<PlayerProjection>> = Err(FetchError::Api {
            status: 503,
            url: "https://api.sleeper.app/v1/league/1".to_string(),
        });
        assert!(or_neutral(failed, "projections").is_empty());

        let ok: Result<HashMap<String, f64>> = Ok([("Josh Allen".to_string(), 9000.0)].into());
        assert_eq!(or_neutral(ok, "market values").len(), 1);
    }

    fn transaction(kind: &str, status: &str, player_id: &str) -> SleeperTransaction {
        serde_json::from_value(serde_json::json!({
            "type": kind,
            "status": status,
            "roster_ids": [1, 2],
            "adds": {(player_id): 1},
            "drops": {(player_id): 2}
        }))
        .unwrap()
    }

    #[test]
    fn test_failed_round_keeps_other_rounds() {
        let rounds = vec![
            (1, Ok(vec![transaction("trade", "complete", "4984")])),
            (2, Err(FetchError::Api { status: 500, url: "https://api.sleeper.app/v1/x".to_string() })),
            (3, Ok(vec![
                transaction("trade", "complete", "6794"),
                transaction("waiver", "complete", "1466"),
                transaction("trade", "failed", "7564"),
            ])),
        ];

        let trades = completed_trades(rounds);
        assert_eq!(trades.len(), 2);
        assert!(trades[0].adds.contains_key("4984"));
        assert!(trades[1].adds.contains_key("6794"));
    }

    #[test]
    fn test_http_source_builds_from_defaults() {
        assert!(HttpLeagueDataSource::new(FetcherConfig::default(), 14).is_ok());
    }
}
