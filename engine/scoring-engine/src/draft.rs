//! Draft score aggregation
//!
//! A team's draft score is the sum of VORP over its picks. Players missing
//! from the projections (rookies, deep sleepers) contribute 0.

use crate::models::{DraftPick, RosterId};
use crate::vorp::VorpTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One drafted player with the value it contributed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickValue {
    pub player_name: String,
    pub draft_slot: u32,
    pub value: f64,
}

/// Summed draft value for one roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDraftScore {
    pub roster_id: RosterId,
    pub score: f64,
    /// Picks in draft order
    pub picks: Vec<PickValue>,
}

impl TeamDraftScore {
    fn empty(roster_id: RosterId) -> Self {
        Self { roster_id, score: 0.0, picks: Vec::new() }
    }

    /// Highest-value pick; the earliest pick wins a tie
    pub fn best_pick(&self) -> Option<&PickValue> {
        self.picks.iter().fold(None, |best, pick| match best {
            Some(current) if current.value >= pick.value => Some(current),
            _ => Some(pick),
        })
    }

    /// Lowest-value pick; the earliest pick wins a tie
    pub fn worst_pick(&self) -> Option<&PickValue> {
        self.picks.iter().fold(None, |worst, pick| match worst {
            Some(current) if current.value <= pick.value => Some(current),
            _ => Some(pick),
        })
    }
}

/// Draft scores for every roster, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftScores {
    teams: Vec<TeamDraftScore>,
}

impl DraftScores {
    pub fn teams(&self) -> &[TeamDraftScore] {
        &self.teams
    }

    pub fn get(&self, roster_id: RosterId) -> Option<&TeamDraftScore> {
        self.teams.iter().find(|t| t.roster_id == roster_id)
    }

    /// Draft score for a roster, 0 when the roster drafted nobody we know
    pub fn score_or_zero(&self, roster_id: RosterId) -> f64 {
        self.get(roster_id).map(|t| t.score).unwrap_or(0.0)
    }

    /// Scores as (roster, score) pairs in first-seen order
    pub fn scores(&self) -> Vec<(RosterId, f64)> {
        self.teams.iter().map(|t| (t.roster_id, t.score)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }
}

/// Sums VORP over each roster's picks
#[derive(Debug, Default)]
pub struct DraftScoreAggregator;

impl DraftScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate picks into per-roster scores
    pub fn aggregate(&self, picks: &[DraftPick], vorp: &VorpTable) -> DraftScores {
        self.aggregate_for_rosters(&[], picks, vorp)
    }

    /// Aggregate picks, seeding `rosters` first so teams without picks still
    /// appear with a score of 0
    pub fn aggregate_for_rosters(
        &self,
        rosters: &[RosterId],
        picks: &[DraftPick],
        vorp: &VorpTable,
    ) -> DraftScores {
        let mut teams: Vec<TeamDraftScore> =
            rosters.iter().map(|id| TeamDraftScore::empty(*id)).collect();
        let mut index: HashMap<RosterId, usize> =
            teams.iter().enumerate().map(|(i, t)| (t.roster_id, i)).collect();

        let mut ordered: Vec<&DraftPick> = picks.iter().collect();
        ordered.sort_by_key(|p| p.draft_slot);

        let mut unprojected = 0usize;
        for pick in ordered {
            let value = match vorp.get(&pick.player_name) {
                Some(value) => value,
                None => {
                    unprojected += 1;
                    0.0
                }
            };

            let slot = *index.entry(pick.roster_id).or_insert_with(|| {
                teams.push(TeamDraftScore::empty(pick.roster_id));
                teams.len() - 1
            });
            let team = &mut teams[slot];
            team.score += value;
            team.picks.push(PickValue {
                player_name: pick.player_name.clone(),
                draft_slot: pick.draft_slot,
                value,
            });
        }

        debug!(
            "Aggregated {} picks across {} rosters ({} without projections)",
            picks.len(),
            teams.len(),
            unprojected
        );

        DraftScores { teams }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::models::{PlayerProjection, Position};
    use crate::vorp::VorpCalculator;

    fn vorp_table() -> VorpTable {
        let projections = vec![
            PlayerProjection::new("Josh Allen", Position::QB, 380.0),
            PlayerProjection::new("Jalen Hurts", Position::QB, 360.0),
            PlayerProjection::new("Jared Goff", Position::QB, 300.0),
            PlayerProjection::new("Travis Kelce", Position::TE, 200.0),
            PlayerProjection::new("Sam LaPorta", Position::TE, 180.0),
        ];
        VorpCalculator::new(ScoringConfig::default()).calculate(&projections)
    }

    fn pick(roster_id: RosterId, draft_slot: u32, name: &str) -> DraftPick {
        DraftPick { roster_id, draft_slot, player_name: name.to_string() }
    }

    #[test]
    fn test_scores_sum_vorp_per_roster() {
        let picks = vec![
            pick(1, 1, "Josh Allen"),
            pick(2, 2, "Jalen Hurts"),
            pick(2, 3, "Travis Kelce"),
            pick(1, 4, "Sam LaPorta"),
            pick(1, 5, "Jared Goff"),
        ];
        let scores = DraftScoreAggregator::new().aggregate(&picks, &vorp_table());

        assert_eq!(scores.score_or_zero(1), 80.0);
        assert_eq!(scores.score_or_zero(2), 80.0);
        assert_eq!(scores.get(1).unwrap().picks.len(), 3);
    }

    #[test]
    fn test_unprojected_players_count_as_zero() {
        let picks = vec![pick(3, 1, "Undrafted Rookie"), pick(3, 2, "Josh Allen")];
        let scores = DraftScoreAggregator::new().aggregate(&picks, &vorp_table());

        let team = scores.get(3).unwrap();
        assert_eq!(team.score, 80.0);
        assert_eq!(team.picks[0].value, 0.0);
    }

    #[test]
    fn test_best_and_worst_pick_ties_go_to_earliest() {
        let picks = vec![
            pick(1, 1, "Jared Goff"),
            pick(1, 12, "Rookie A"),
            pick(1, 13, "Josh Allen"),
            pick(1, 24, "Rookie B"),
        ];
        let scores = DraftScoreAggregator::new().aggregate(&picks, &vorp_table());
        let team = scores.get(1).unwrap();

        assert_eq!(team.best_pick().unwrap().player_name, "Josh Allen");
        // Goff and both rookies are worth 0; Goff was picked first
        assert_eq!(team.worst_pick().unwrap().player_name, "Jared Goff");
    }

    #[test]
    fn test_seeded_rosters_without_picks() {
        let picks = vec![pick(2, 1, "Josh Allen")];
        let scores =
            DraftScoreAggregator::new().aggregate_for_rosters(&[1, 2, 3], &picks, &vorp_table());

        assert_eq!(scores.len(), 3);
        assert_eq!(scores.score_or_zero(1), 0.0);
        assert!(scores.get(3).unwrap().best_pick().is_none());
        assert_eq!(scores.scores(), vec![(1, 0.0), (2, 80.0), (3, 0.0)]);
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let picks = vec![pick(1, 2, "Josh Allen"), pick(2, 1, "Travis Kelce")];
        let vorp = vorp_table();
        let aggregator = DraftScoreAggregator::new();

        let first = aggregator.aggregate(&picks, &vorp);
        let second = aggregator.aggregate(&picks, &vorp);
        assert_eq!(first, second);

        for team in first.teams() {
            let summed: f64 = team.picks.iter().map(|p| p.value).sum();
            assert_eq!(summed, team.score);
        }
        // Ordered by draft slot, so roster 2 is seen first
        assert_eq!(first.teams()[0].roster_id, 2);
    }
}
