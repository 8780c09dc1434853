//! Power rankings
//!
//! A team's power score blends its in-season record with its draft
//! projection. Early in the season the draft carries the weight; each week
//! shifts weight linearly onto the record:
//!
//! ```text
//! weeks_remaining   = max(season_length - week, 0)
//! projection_weight = weeks_remaining / season_length
//! record_weight     = 1 - projection_weight
//! record_score      = 0.6 * norm(win%) + 0.4 * norm(points_for)
//! power_score       = record_weight * record_score + projection_weight * draft
//! ```
//!
//! `norm` is min-max scaling onto 0-100 with a small epsilon in the
//! denominator. The draft term follows [`DraftScaling`].

use crate::config::{DraftScaling, PowerParameters};
use crate::draft::DraftScores;
use crate::error::ScoringError;
use crate::models::{RosterId, StandingsRow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the league is in its regular season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonProgress {
    season_length: u32,
    current_week: u32,
}

impl SeasonProgress {
    /// `current_week` may run past `season_length` during the playoffs
    pub fn new(season_length: u32, current_week: u32) -> Result<Self, ScoringError> {
        if season_length == 0 {
            return Err(ScoringError::InvalidSeasonLength(season_length));
        }
        if current_week == 0 {
            return Err(ScoringError::InvalidWeek(current_week));
        }
        Ok(Self { season_length, current_week })
    }

    pub fn season_length(&self) -> u32 {
        self.season_length
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    /// Same season, different week
    pub fn at_week(&self, week: u32) -> Result<Self, ScoringError> {
        Self::new(self.season_length, week)
    }

    pub fn weights(&self) -> BlendWeights {
        let remaining = self.season_length.saturating_sub(self.current_week);
        let projection = remaining as f64 / self.season_length as f64;
        BlendWeights { projection, record: 1.0 - projection }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub projection: f64,
    pub record: f64,
}

/// One team's line in the power rankings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRow {
    pub rank: usize,
    pub roster_id: RosterId,
    pub owner: String,
    pub wins: u32,
    pub losses: u32,
    pub points_for: f64,
    pub win_pct: f64,
    pub win_pct_score: f64,
    pub points_for_score: f64,
    /// Summed VORP before any scaling
    pub draft_score: f64,
    /// Draft term that entered the blend
    pub draft_component: f64,
    pub record_score: f64,
    pub power_score: f64,
    /// Half win%, half draft; used to pick the closest matchup
    pub closeness_score: f64,
}

/// Power rankings for one week, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerRankings {
    pub week: u32,
    pub weights: Option<BlendWeights>,
    pub rows: Vec<PowerRow>,
}

impl PowerRankings {
    pub fn by_owner(&self, owner: &str) -> Option<&PowerRow> {
        self.rows.iter().find(|r| r.owner == owner)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single owner's power score for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub week: u32,
    pub owner: String,
    pub power_score: f64,
}

/// Blends standings and draft scores into power rankings
pub struct PowerScoreBlender {
    params: PowerParameters,
}

impl PowerScoreBlender {
    pub fn new(params: PowerParameters) -> Self {
        Self { params }
    }

    /// Rank every team in `standings`. Teams without a draft score get 0.
    pub fn rank(
        &self,
        standings: &[StandingsRow],
        draft: &DraftScores,
        progress: SeasonProgress,
    ) -> PowerRankings {
        if standings.is_empty() {
            return PowerRankings { week: progress.current_week(), weights: None, rows: Vec::new() };
        }

        let weights = progress.weights();
        let eps = self.params.normalization_epsilon;

        let win_pcts: Vec<f64> = standings.iter().map(StandingsRow::win_pct).collect();
        let points_for: Vec<f64> = standings.iter().map(|s| s.points_for).collect();
        let drafts: Vec<f64> = standings.iter().map(|s| draft.score_or_zero(s.roster_id)).collect();

        let win_scores = min_max_scale(&win_pcts, eps);
        let pf_scores = min_max_scale(&points_for, eps);
        let draft_components = match self.params.draft_scaling {
            DraftScaling::Raw => drafts.clone(),
            DraftScaling::MinMax => min_max_scale(&drafts, eps),
        };

        let mut rows: Vec<PowerRow> = standings
            .iter()
            .enumerate()
            .map(|(i, standing)| {
                let record_score = self.params.win_pct_weight * win_scores[i]
                    + self.params.points_for_weight * pf_scores[i];
                let power_score =
                    weights.record * record_score + weights.projection * draft_components[i];
                let closeness_score = self.params.closeness_win_weight * (win_pcts[i] * 100.0)
                    + self.params.closeness_draft_weight * draft_components[i];

                PowerRow {
                    rank: 0,
                    roster_id: standing.roster_id,
                    owner: standing.owner.clone(),
                    wins: standing.wins,
                    losses: standing.losses,
                    points_for: standing.points_for,
                    win_pct: win_pcts[i],
                    win_pct_score: win_scores[i],
                    points_for_score: pf_scores[i],
                    draft_score: drafts[i],
                    draft_component: draft_components[i],
                    record_score,
                    power_score,
                    closeness_score,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.power_score.total_cmp(&a.power_score));
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i + 1;
        }

        debug!(
            "Ranked {} teams for week {} (record weight {:.3}, projection weight {:.3})",
            rows.len(),
            progress.current_week(),
            weights.record,
            weights.projection
        );

        PowerRankings { week: progress.current_week(), weights: Some(weights), rows }
    }

    /// Power scores for weeks 1 through the current week against today's
    /// standings. Only the time weights change between weeks.
    pub fn trend(
        &self,
        standings: &[StandingsRow],
        draft: &DraftScores,
        progress: SeasonProgress,
    ) -> Vec<TrendPoint> {
        let mut points = Vec::new();
        for week in 1..=progress.current_week() {
            let Ok(at_week) = progress.at_week(week) else { continue };
            let rankings = self.rank(standings, draft, at_week);
            points.extend(rankings.rows.into_iter().map(|row| TrendPoint {
                week,
                owner: row.owner,
                power_score: row.power_score,
            }));
        }
        points
    }
}

impl Default for PowerScoreBlender {
    fn default() -> Self {
        Self::new(PowerParameters::default())
    }
}

/// Scale onto 0-100 with `eps` keeping an all-equal column at 0
pub fn min_max_scale(values: &[f64], eps: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values.iter().map(|v| 100.0 * (v - min) / (max - min + eps)).collect()
}
