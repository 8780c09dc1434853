//! Wire models for Sleeper and FantasyCalc, and their conversions into
//! scoring-engine inputs

use chrono::{DateTime, TimeZone, Utc};
use scoring_engine::{
    owner_for, DraftPick, IdentityResolver, MatchupEntry, PlayerIdentity, Position, RosterId,
    StandingsRow, Trade, TradeSide,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Sleeper league response (subset we read)
#[derive(Debug, Clone, Deserialize)]
pub struct SleeperLeague {
    pub league_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub settings: LeagueSettings,
    #[serde(default)]
    pub scoring_settings: HashMap<String, f64>,
    #[serde(default)]
    pub draft_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueSettings {
    /// Current week ("leg" in Sleeper terms)
    #[serde(default)]
    pub leg: Option<u32>,
    #[serde(default)]
    pub season_length: Option<u32>,
    #[serde(default)]
    pub playoff_week_start: Option<u32>,
}

/// League metadata handed to the scoring layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueMetadata {
    pub league_id: String,
    pub name: String,
    pub season: Option<String>,
    pub scoring_settings: HashMap<String, f64>,
    pub season_length: u32,
    pub current_week: u32,
}

impl SleeperLeague {
    /// Regular-season length falls back to the week before the playoffs,
    /// then to `default_season_length`
    pub fn into_metadata(self, default_season_length: u32) -> LeagueMetadata {
        let season_length = self
            .settings
            .season_length
            .filter(|l| *l > 0)
            .or_else(|| self.settings.playoff_week_start.filter(|w| *w > 1).map(|w| w - 1))
            .unwrap_or(default_season_length);
        let current_week = self.settings.leg.unwrap_or(1).max(1);
        let name = self.name.unwrap_or_else(|| league_label(&self.league_id));

        LeagueMetadata {
            league_id: self.league_id,
            name,
            season: self.season,
            scoring_settings: self.scoring_settings,
            season_length,
            current_week,
        }
    }
}

/// Display label for a league whose metadata is unavailable
pub fn league_label(league_id: &str) -> String {
    format!("League {league_id}")
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperRoster {
    pub roster_id: RosterId,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub settings: RosterSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    /// Whole points for
    #[serde(default)]
    pub fpts: f64,
    /// Hundredths of a point
    #[serde(default)]
    pub fpts_decimal: Option<f64>,
}

impl RosterSettings {
    pub fn points_for(&self) -> f64 {
        self.fpts + self.fpts_decimal.unwrap_or(0.0) / 100.0
    }
}

/// Rosters joined with their owners
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueRosters {
    pub roster_to_owner: HashMap<RosterId, String>,
    pub standings: Vec<StandingsRow>,
}

impl LeagueRosters {
    /// Rosters without a known owner are labelled "Team {id}"
    pub fn from_sleeper(users: &[SleeperUser], rosters: &[SleeperRoster]) -> Self {
        let user_names: HashMap<&str, String> = users
            .iter()
            .map(|u| {
                let name = u
                    .display_name
                    .clone()
                    .or_else(|| u.username.clone())
                    .unwrap_or_else(|| u.user_id.clone());
                (u.user_id.as_str(), name)
            })
            .collect();

        let mut roster_to_owner = HashMap::new();
        for roster in rosters {
            if let Some(owner) = roster.owner_id.as_deref().and_then(|id| user_names.get(id)) {
                roster_to_owner.insert(roster.roster_id, owner.clone());
            }
        }

        let standings = rosters
            .iter()
            .map(|r| StandingsRow {
                roster_id: r.roster_id,
                owner: owner_for(&roster_to_owner, r.roster_id),
                wins: r.settings.wins,
                losses: r.settings.losses,
                points_for: r.settings.points_for(),
            })
            .collect();

        Self { roster_to_owner, standings }
    }

    pub fn roster_ids(&self) -> Vec<RosterId> {
        self.standings.iter().map(|s| s.roster_id).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperDraft {
    pub draft_id: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub start_time: Option<i64>,
}

impl SleeperDraft {
    pub fn scheduled_start(&self) -> Option<DateTime<Utc>> {
        self.start_time.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperDraftPick {
    #[serde(default)]
    pub roster_id: Option<RosterId>,
    pub pick_no: u32,
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub metadata: PickMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickMetadata {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl SleeperDraftPick {
    /// Picks without a roster or a player name cannot be scored
    pub fn to_draft_pick(&self) -> Option<DraftPick> {
        let roster_id = self.roster_id?;
        let name = [self.metadata.first_name.as_deref(), self.metadata.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            return None;
        }
        Some(DraftPick { roster_id, draft_slot: self.pick_no, player_name: name })
    }
}

/// Draft state plus its scoreable picks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftResult {
    pub draft_id: Option<String>,
    pub status: Option<String>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub picks: Vec<DraftPick>,
}

impl DraftResult {
    pub fn has_picks(&self) -> bool {
        !self.picks.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperMatchup {
    pub roster_id: RosterId,
    /// Null for teams on bye
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub players_points: Option<HashMap<String, f64>>,
}

impl From<SleeperMatchup> for MatchupEntry {
    fn from(m: SleeperMatchup) -> Self {
        Self {
            roster_id: m.roster_id,
            matchup_id: m.matchup_id.unwrap_or(0),
            starters: m.starters.unwrap_or_default(),
            players_points: m.players_points.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperTransaction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub roster_ids: Vec<RosterId>,
    /// player id -> receiving roster
    #[serde(default)]
    pub adds: Option<BTreeMap<String, RosterId>>,
    /// player id -> sending roster
    #[serde(default)]
    pub drops: Option<BTreeMap<String, RosterId>>,
}

impl SleeperTransaction {
    pub fn is_trade(&self) -> bool {
        self.kind == "trade"
    }
}

/// Asset movement for one trade, by player id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub roster_ids: Vec<RosterId>,
    pub adds: BTreeMap<String, RosterId>,
    pub drops: BTreeMap<String, RosterId>,
}

impl From<SleeperTransaction> for TradeRecord {
    fn from(t: SleeperTransaction) -> Self {
        Self {
            roster_ids: t.roster_ids,
            adds: t.adds.unwrap_or_default(),
            drops: t.drops.unwrap_or_default(),
        }
    }
}

impl TradeRecord {
    /// Split by receiving roster: side A gets what the first roster added,
    /// side B what the second added. Unresolved ids stay as raw ids.
    pub fn to_trade(&self, identities: &dyn IdentityResolver) -> Trade {
        let side = |roster_id: Option<RosterId>| TradeSide {
            roster_id,
            assets: match roster_id {
                Some(id) => self
                    .adds
                    .iter()
                    .filter(|(_, receiver)| **receiver == id)
                    .map(|(player_id, _)| identities.name_or_id(player_id))
                    .collect(),
                None => Vec::new(),
            },
        };

        Trade {
            side_a: side(self.roster_ids.first().copied()),
            side_b: side(self.roster_ids.get(1).copied()),
        }
    }
}

/// Entry in Sleeper's full players table
#[derive(Debug, Clone, Deserialize)]
pub struct SleeperPlayer {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl SleeperPlayer {
    /// Team defenses have no full name; they use "City Nickname"
    pub fn to_identity(&self, player_id: &str) -> Option<PlayerIdentity> {
        let name = self.full_name.clone().filter(|n| !n.trim().is_empty()).or_else(|| {
            match (self.first_name.as_deref(), self.last_name.as_deref()) {
                (Some(first), Some(last)) => Some(format!("{first} {last}")),
                _ => None,
            }
        })?;
        Some(PlayerIdentity {
            player_id: player_id.to_string(),
            name,
            position: self.position.as_deref().and_then(|p| p.parse::<Position>().ok()),
        })
    }
}

/// FantasyCalc value row
#[derive(Debug, Clone, Deserialize)]
pub struct MarketValue {
    pub player: MarketPlayer,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketPlayer {
    pub name: String,
    #[serde(default, rename = "sleeperId")]
    pub sleeper_id: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}
