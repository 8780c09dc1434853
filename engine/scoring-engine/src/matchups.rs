//! Weekly matchup grouping and selection
//!
//! Sleeper lists one row per roster per week; rows sharing a `matchup_id`
//! play each other and `matchup_id == 0` is a bye. Groups carry two
//! aggregates so the two default-selection policies can run side by side:
//! the highest average power score ("Matchup of the Week") and the lowest
//! average closeness score ("Closest Matchup").

use crate::identity::IdentityResolver;
use crate::models::{owner_for, MatchupEntry, RosterId};
use crate::power::PowerRankings;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Label for starters whose position is unknown
pub const UNKNOWN_POSITION: &str = "?";

/// Rosters facing each other in one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupGroup {
    pub matchup_id: u32,
    /// Indexes into the entries the group was built from, in encounter order
    pub entry_indexes: Vec<usize>,
    pub roster_ids: Vec<RosterId>,
    pub owners: Vec<String>,
    /// Mean power score over owners present in the rankings
    pub avg_power: Option<f64>,
    /// Mean closeness score over owners present in the rankings
    pub avg_closeness: Option<f64>,
}

impl MatchupGroup {
    /// "alice vs bob"
    pub fn label(&self) -> String {
        self.owners.join(" vs ")
    }
}

/// Which matchup to feature by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Highest average power score
    MatchupOfTheWeek,
    /// Lowest average closeness score
    ClosestMatchup,
}

impl SelectionStrategy {
    /// Index of the selected group; the first group wins a tie
    pub fn select(&self, groups: &[MatchupGroup]) -> Option<usize> {
        let mut selected: Option<(usize, f64)> = None;
        for (index, group) in groups.iter().enumerate() {
            let metric = match self {
                SelectionStrategy::MatchupOfTheWeek => group.avg_power,
                SelectionStrategy::ClosestMatchup => group.avg_closeness,
            };
            let Some(value) = metric else { continue };
            let better = match (self, selected) {
                (_, None) => true,
                (SelectionStrategy::MatchupOfTheWeek, Some((_, best))) => value > best,
                (SelectionStrategy::ClosestMatchup, Some((_, best))) => value < best,
            };
            if better {
                selected = Some((index, value));
            }
        }
        selected.map(|(index, _)| index)
    }

    pub fn headline(&self) -> &'static str {
        match self {
            SelectionStrategy::MatchupOfTheWeek => "Matchup of the Week",
            SelectionStrategy::ClosestMatchup => "Closest Matchup of the Week",
        }
    }
}

/// Groups matchup rows and scores each group
#[derive(Debug, Default)]
pub struct MatchupGrouper;

impl MatchupGrouper {
    pub fn new() -> Self {
        Self
    }

    pub fn group(
        &self,
        entries: &[MatchupEntry],
        roster_to_owner: &HashMap<RosterId, String>,
        rankings: &PowerRankings,
    ) -> Vec<MatchupGroup> {
        let mut groups: Vec<MatchupGroup> = Vec::new();
        let mut by_id: HashMap<u32, usize> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.matchup_id == 0 {
                continue;
            }
            let slot = *by_id.entry(entry.matchup_id).or_insert_with(|| {
                groups.push(MatchupGroup {
                    matchup_id: entry.matchup_id,
                    entry_indexes: Vec::new(),
                    roster_ids: Vec::new(),
                    owners: Vec::new(),
                    avg_power: None,
                    avg_closeness: None,
                });
                groups.len() - 1
            });
            let group = &mut groups[slot];
            group.entry_indexes.push(index);
            group.roster_ids.push(entry.roster_id);
            group.owners.push(owner_for(roster_to_owner, entry.roster_id));
        }

        for group in &mut groups {
            let rows: Vec<_> = group.owners.iter().filter_map(|o| rankings.by_owner(o)).collect();
            if !rows.is_empty() {
                let n = rows.len() as f64;
                group.avg_power = Some(rows.iter().map(|r| r.power_score).sum::<f64>() / n);
                group.avg_closeness = Some(rows.iter().map(|r| r.closeness_score).sum::<f64>() / n);
            }
        }

        groups
    }
}

/// A starter's line for the matchup views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterLine {
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub projected_points: f64,
    pub actual_points: f64,
    /// Highest actual score on this lineup (ties all marked)
    pub top_scorer: bool,
}

/// One side of a matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLineup {
    pub roster_id: RosterId,
    pub owner: String,
    pub starters: Vec<StarterLine>,
}

impl TeamLineup {
    /// Build the starter lines for a roster's matchup row. Projections are
    /// keyed by display name and default to 0.
    pub fn build(
        entry: &MatchupEntry,
        roster_to_owner: &HashMap<RosterId, String>,
        identities: &dyn IdentityResolver,
        weekly_projections: &HashMap<String, f64>,
    ) -> Self {
        let mut starters: Vec<StarterLine> = entry
            .starters
            .iter()
            .map(|player_id| {
                let identity = identities.resolve(player_id);
                let player_name = identity
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| identities.display_name(player_id));
                let position = identity
                    .and_then(|p| p.position)
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| UNKNOWN_POSITION.to_string());
                StarterLine {
                    player_id: player_id.clone(),
                    projected_points: weekly_projections.get(&player_name).copied().unwrap_or(0.0),
                    actual_points: entry.players_points.get(player_id).copied().unwrap_or(0.0),
                    player_name,
                    position,
                    top_scorer: false,
                }
            })
            .collect();

        if let Some(max) =
            starters.iter().map(|s| s.actual_points).max_by(|a, b| a.total_cmp(b))
        {
            for starter in &mut starters {
                starter.top_scorer = starter.actual_points == max;
            }
        }

        Self { roster_id: entry.roster_id, owner: owner_for(roster_to_owner, entry.roster_id), starters }
    }

    /// Summed actual points per position label
    pub fn points_by_position(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for starter in &self.starters {
            *totals.entry(starter.position.clone()).or_insert(0.0) += starter.actual_points;
        }
        totals
    }

    pub fn total_actual(&self) -> f64 {
        self.starters.iter().map(|s| s.actual_points).sum()
    }

    pub fn total_projected(&self) -> f64 {
        self.starters.iter().map(|s| s.projected_points).sum()
    }
}

/// Head-to-head comparison at one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAdvantage {
    pub position: String,
    pub home_points: f64,
    pub away_points: f64,
    /// Owner with more points, or "Tie"
    pub winner: String,
}

/// Compare two lineups position by position, in QB/RB/WR/TE/K/DST order
/// with unknown positions last
pub fn position_advantage(home: &TeamLineup, away: &TeamLineup) -> Vec<PositionAdvantage> {
    let home_totals = home.points_by_position();
    let away_totals = away.points_by_position();

    let mut positions: Vec<&String> = home_totals.keys().chain(away_totals.keys()).collect();
    positions.sort_by_key(|p| (position_order(p), p.to_string()));
    positions.dedup();

    positions
        .into_iter()
        .map(|position| {
            let home_points = home_totals.get(position).copied().unwrap_or(0.0);
            let away_points = away_totals.get(position).copied().unwrap_or(0.0);
            let winner = if home_points > away_points {
                home.owner.clone()
            } else if away_points > home_points {
                away.owner.clone()
            } else {
                "Tie".to_string()
            };
            PositionAdvantage { position: position.clone(), home_points, away_points, winner }
        })
        .collect()
}

fn position_order(label: &str) -> usize {
    crate::models::Position::ALL
        .iter()
        .position(|p| p.as_str() == label)
        .unwrap_or(crate::models::Position::ALL.len())
}
