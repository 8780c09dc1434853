use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Sleeper roster identifier (1-based within a league)
pub type RosterId = u32;

/// Fantasy position of a projected player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    // Lowercase aliases accept keys from case-folding config sources
    #[serde(alias = "qb")]
    QB,
    #[serde(alias = "rb")]
    RB,
    #[serde(alias = "wr")]
    WR,
    #[serde(alias = "te")]
    TE,
    #[serde(alias = "k")]
    K,
    #[serde(alias = "dst")]
    DST,
}

impl Position {
    pub const ALL: [Position; 6] =
        [Position::QB, Position::RB, Position::WR, Position::TE, Position::K, Position::DST];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            // Sleeper says "DEF", FantasyPros says "DST"
            "DST" | "DEF" | "D/ST" => Ok(Position::DST),
            other => Err(ScoringError::UnknownPosition(other.to_string())),
        }
    }
}

/// Season-long projection for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProjection {
    /// Display name (e.g., "Josh Allen"), the join key across sources
    pub name: String,
    pub position: Position,
    pub projected_points: f64,
}

impl PlayerProjection {
    pub fn new(name: impl Into<String>, position: Position, projected_points: f64) -> Self {
        Self { name: name.into(), position, projected_points }
    }
}

/// A single selection in a league draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    pub roster_id: RosterId,
    /// Overall pick number, 1-based
    pub draft_slot: u32,
    pub player_name: String,
}

/// Current record for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub roster_id: RosterId,
    pub owner: String,
    pub wins: u32,
    pub losses: u32,
    pub points_for: f64,
}

impl StandingsRow {
    /// Win fraction with an empty record treated as 0-for-1
    pub fn win_pct(&self) -> f64 {
        let games = self.wins + self.losses;
        let games = if games == 0 { 1 } else { games };
        self.wins as f64 / games as f64
    }
}

/// One roster's row in a week's matchup listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupEntry {
    pub roster_id: RosterId,
    /// 0 marks a bye week
    pub matchup_id: u32,
    /// Starter player ids in lineup order
    pub starters: Vec<String>,
    /// Actual points per player id
    pub players_points: HashMap<String, f64>,
}

/// Letter grade shared by the draft and trade graders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fallback label for a roster whose owner could not be resolved
pub fn team_label(roster_id: RosterId) -> String {
    format!("Team {roster_id}")
}

/// Resolve a roster's owner, falling back to the synthetic team label
pub fn owner_for(roster_to_owner: &HashMap<RosterId, String>, roster_id: RosterId) -> String {
    roster_to_owner.get(&roster_id).cloned().unwrap_or_else(|| team_label(roster_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!("qb".parse::<Position>().unwrap(), Position::QB);
        assert_eq!(" WR ".parse::<Position>().unwrap(), Position::WR);
        assert_eq!("DEF".parse::<Position>().unwrap(), Position::DST);
        assert!(matches!("LB".parse::<Position>(), Err(ScoringError::UnknownPosition(p)) if p == "LB"));
    }

    #[test]
    fn test_position_keys_accept_lowercase() {
        let ranks: HashMap<Position, usize> = serde_json::from_str(r#"{"qb": 12, "WR": 40}"#).unwrap();
        assert_eq!(ranks[&Position::QB], 12);
        assert_eq!(ranks[&Position::WR], 40);
    }

    #[test]
    fn test_win_pct_handles_empty_record() {
        let row = StandingsRow {
            roster_id: 1,
            owner: "alice".to_string(),
            wins: 0,
            losses: 0,
            points_for: 0.0,
        };
        assert_eq!(row.win_pct(), 0.0);

        let row = StandingsRow { wins: 3, losses: 1, ..row };
        assert_eq!(row.win_pct(), 0.75);
    }

    #[test]
    fn test_owner_fallback() {
        let mut owners = HashMap::new();
        owners.insert(1, "alice".to_string());
        assert_eq!(owner_for(&owners, 1), "alice");
        assert_eq!(owner_for(&owners, 7), "Team 7");
    }

    #[test]
    fn test_grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(serde_json::to_string(&Grade::CMinus).unwrap(), "\"C-\"");
        assert_eq!(Grade::F.to_string(), "F");
    }
}
