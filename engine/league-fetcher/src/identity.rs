//! On-disk player identity cache
//!
//! Sleeper's players table is large and changes slowly, so it is kept in a
//! JSON file and re-fetched only once the file is older than the configured
//! tolerance. A stale file is better than nothing: when the refresh fails the
//! old contents are still served.

use crate::config::IdentityCacheConfig;
use crate::error::Result;
use crate::models::SleeperPlayer;
use chrono::{DateTime, Duration, Utc};
use scoring_engine::{PlayerDirectory, PlayerIdentity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// About a century; keeps the age inside chrono's range
const MAX_AGE_HOURS_CAP: u64 = 876_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheFile {
    fetched_at: DateTime<Utc>,
    players: Vec<PlayerIdentity>,
}

/// Read-through cache of player id -> identity
#[derive(Debug, Clone)]
pub struct PlayerIdCache {
    path: PathBuf,
    max_age: Duration,
}

impl PlayerIdCache {
    pub fn new(config: &IdentityCacheConfig) -> Self {
        Self {
            path: config.path.clone(),
            max_age: Duration::hours(config.max_age_hours.min(MAX_AGE_HOURS_CAP) as i64),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serve the cached directory, refreshing through `refresh` when the file
    /// is missing or stale
    pub async fn directory<F, Fut>(&self, refresh: F) -> PlayerDirectory
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<PlayerIdentity>>>,
    {
        self.directory_at(Utc::now(), refresh).await
    }

    pub async fn directory_at<F, Fut>(&self, now: DateTime<Utc>, refresh: F) -> PlayerDirectory
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<PlayerIdentity>>>,
    {
        let cached = match self.read() {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Ignoring unreadable player cache {}: {}", self.path.display(), e);
                None
            }
        };

        if let Some(file) = &cached {
            if now - file.fetched_at <= self.max_age {
                debug!("Using {} cached players from {}", file.players.len(), self.path.display());
                return PlayerDirectory::from_identities(file.players.clone());
            }
        }

        match refresh().await {
            Ok(players) => {
                info!("Refreshed player cache with {} players", players.len());
                if let Err(e) = self.write(&CacheFile { fetched_at: now, players: players.clone() }) {
                    warn!("Failed to write player cache {}: {}", self.path.display(), e);
                }
                PlayerDirectory::from_identities(players)
            }
            Err(e) => match cached {
                Some(file) => {
                    warn!("Player refresh failed, serving stale cache from {}: {}", file.fetched_at, e);
                    PlayerDirectory::from_identities(file.players)
                }
                None => {
                    warn!("Player refresh failed and no cache exists: {}", e);
                    PlayerDirectory::new()
                }
            },
        }
    }

    fn read(&self) -> Result<Option<CacheFile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn write(&self, file: &CacheFile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(file)?)?;
        Ok(())
    }
}

/// Identities for every player with a usable name
pub fn identities_from_players(players: HashMap<String, SleeperPlayer>) -> Vec<PlayerIdentity> {
    players.iter().filter_map(|(id, player)| player.to_identity(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use scoring_engine::{IdentityResolver, Position};
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir, max_age_hours: u64) -> PlayerIdCache {
        PlayerIdCache::new(&IdentityCacheConfig {
            path: dir.path().join("cache").join("player_ids.json"),
            max_age_hours,
        })
    }

    fn allen() -> Vec<PlayerIdentity> {
        vec![PlayerIdentity {
            player_id: "4984".to_string(),
            name: "Josh Allen".to_string(),
            position: Some(Position::QB),
        }]
    }

    fn kelce() -> Vec<PlayerIdentity> {
        vec![PlayerIdentity {
            player_id: "1466".to_string(),
            name: "Travis Kelce".to_string(),
            position: Some(Position::TE),
        }]
    }

    fn unavailable() -> Result<Vec<PlayerIdentity>> {
        Err(FetchError::scrape("offline"))
    }

    #[test]
    fn test_missing_file_refreshes_and_writes() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 24);

        let directory = tokio_test::block_on(cache.directory(|| async { Ok(allen()) }));
        assert_eq!(directory.display_name("4984"), "Josh Allen");
        assert!(cache.path().exists());
    }

    #[test]
    fn test_fresh_file_skips_refresh() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 24);
        let now = Utc::now();

        tokio_test::block_on(cache.directory_at(now, || async { Ok(allen()) }));
        let directory = tokio_test::block_on(
            cache.directory_at(now + Duration::hours(1), || async { Ok(kelce()) }),
        );

        assert_eq!(directory.display_name("4984"), "Josh Allen");
        assert!(directory.resolve("1466").is_none());
    }

    #[test]
    fn test_stale_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 24);
        let now = Utc::now();

        tokio_test::block_on(cache.directory_at(now, || async { Ok(allen()) }));
        let directory = tokio_test::block_on(
            cache.directory_at(now + Duration::hours(25), || async { Ok(kelce()) }),
        );

        assert_eq!(directory.display_name("1466"), "Travis Kelce");
        assert!(directory.resolve("4984").is_none());
    }

    #[test]
    fn test_stale_file_survives_failed_refresh() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 24);
        let now = Utc::now();

        tokio_test::block_on(cache.directory_at(now, || async { Ok(allen()) }));
        let directory = tokio_test::block_on(
            cache.directory_at(now + Duration::days(7), || async { unavailable() }),
        );

        assert_eq!(directory.display_name("4984"), "Josh Allen");
    }

    #[test]
    fn test_no_file_and_failed_refresh_is_empty() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 24);

        let directory = tokio_test::block_on(cache.directory(|| async { unavailable() }));
        assert!(directory.is_empty());
        assert_eq!(directory.display_name("4984"), "Unknown Player");
    }

    #[test]
    fn test_corrupt_file_is_refreshed() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 24);
        std::fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
        std::fs::write(cache.path(), "not json").unwrap();

        let directory = tokio_test::block_on(cache.directory(|| async { Ok(kelce()) }));
        assert_eq!(directory.display_name("1466"), "Travis Kelce");
    }

    #[test]
    fn test_identities_from_players() {
        let players: HashMap<String, SleeperPlayer> = serde_json::from_str(
            r#"{
                "4984": {"full_name": "Josh Allen", "position": "QB"},
                "BUF": {"first_name": "Buffalo", "last_name": "Bills", "position": "DEF"},
                "0": {"position": "OL"}
            }"#,
        )
        .unwrap();

        let mut identities = identities_from_players(players);
        identities.sort_by(|a, b| a.player_id.cmp(&b.player_id));
        assert_eq!(identities.len(), 2);
        assert_eq!(identities[0].name, "Josh Allen");
        assert_eq!(identities[1].name, "Buffalo Bills");
    }
}
