//! Sleeper API integration

use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use crate::models::{
    SleeperDraft, SleeperDraftPick, SleeperLeague, SleeperMatchup, SleeperPlayer, SleeperRoster,
    SleeperTransaction, SleeperUser,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

/// Sleeper API client
#[derive(Debug)]
pub struct SleeperClient {
    base_url: String,
    client: Client,
}

impl SleeperClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { base_url: config.sleeper.api_base_url.trim_end_matches('/').to_string(), client })
    }

    pub async fn league(&self, league_id: &str) -> Result<SleeperLeague> {
        self.get_json(&format!("/league/{league_id}")).await
    }

    pub async fn users(&self, league_id: &str) -> Result<Vec<SleeperUser>> {
        self.get_list(&format!("/league/{league_id}/users")).await
    }

    pub async fn rosters(&self, league_id: &str) -> Result<Vec<SleeperRoster>> {
        self.get_list(&format!("/league/{league_id}/rosters")).await
    }

    pub async fn drafts(&self, league_id: &str) -> Result<Vec<SleeperDraft>> {
        self.get_list(&format!("/league/{league_id}/drafts")).await
    }

    pub async fn draft_picks(&self, draft_id: &str) -> Result<Vec<SleeperDraftPick>> {
        self.get_list(&format!("/draft/{draft_id}/picks")).await
    }

    pub async fn matchups(&self, league_id: &str, week: u32) -> Result<Vec<SleeperMatchup>> {
        self.get_list(&format!("/league/{league_id}/matchups/{week}")).await
    }

    /// Transactions are bucketed by week ("round")
    pub async fn transactions(
        &self,
        league_id: &str,
        round: u32,
    ) -> Result<Vec<SleeperTransaction>> {
        self.get_list(&format!("/league/{league_id}/transactions/{round}")).await
    }

    /// Full NFL players table keyed by player id (several MB)
    pub async fn players(&self) -> Result<HashMap<String, SleeperPlayer>> {
        let players: Option<HashMap<String, SleeperPlayer>> = self.get_json("/players/nfl").await?;
        Ok(players.unwrap_or_default())
    }

    /// Sleeper answers `null` instead of `[]` for some empty collections
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let list: Option<Vec<T>> = self.get_json(path).await?;
        Ok(list.unwrap_or_default())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Api { status: response.status().as_u16(), url });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
