//! FantasyCalc redraft trade values

use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use crate::models::MarketValue;
use reqwest::Client;
use std::collections::HashMap;
use tracing::info;

pub struct MarketValueClient {
    config: FetcherConfig,
    client: Client,
}

impl MarketValueClient {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    /// Current values keyed by player name
    pub async fn current_values(&self) -> Result<HashMap<String, f64>> {
        let url = self.config.market_values_url();
        info!("Fetching market values from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Api { status: response.status().as_u16(), url });
        }
        let rows: Vec<MarketValue> = response.json().await?;
        Ok(values_by_name(rows))
    }
}

/// Later rows win when a name repeats
pub fn values_by_name(rows: Vec<MarketValue>) -> HashMap<String, f64> {
    rows.into_iter().map(|row| (row.player.name, row.value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_by_name() {
        let rows: Vec<MarketValue> = serde_json::from_str(
            r#"[
                {"player": {"name": "Ja'Marr Chase", "sleeperId": "7564"}, "value": 10150},
                {"player": {"name": "Bijan Robinson"}, "value": 9870.5}
            ]"#,
        )
        .unwrap();

        let values = values_by_name(rows);
        assert_eq!(values.len(), 2);
        assert_eq!(values["Ja'Marr Chase"], 10150.0);
        assert_eq!(values["Bijan Robinson"], 9870.5);
    }

    #[test]
    fn test_empty_response() {
        assert!(values_by_name(Vec::new()).is_empty());
    }
}
