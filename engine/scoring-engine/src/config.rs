use crate::error::ScoringError;
use crate::models::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Replacement-level VORP parameters
    pub vorp: VorpParameters,

    /// Draft grading parameters
    pub grading: GradingParameters,

    /// Power ranking parameters
    pub power: PowerParameters,

    /// Trade grading thresholds
    pub trades: TradeThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VorpParameters {
    /// Rank (1-based) of the replacement-level player per position.
    /// Positions missing here use the worst player in the cohort.
    pub replacement_ranks: HashMap<Position, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingParameters {
    /// z above this is an A
    pub a_cutoff: f64,

    /// z above this (and at most `a_cutoff`) is a B; mirrored for D/F
    pub b_cutoff: f64,
}

/// How draft scores enter the power blend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftScaling {
    /// Use the summed VORP as-is
    Raw,
    /// Min-max scale draft scores to 0-100 like win% and points-for
    MinMax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerParameters {
    /// Weight of normalized win% inside the record score
    pub win_pct_weight: f64,

    /// Weight of normalized points-for inside the record score
    pub points_for_weight: f64,

    /// Added to min-max denominators so an all-tied league does not divide by zero
    pub normalization_epsilon: f64,

    /// Draft score treatment for the projection half of the blend
    pub draft_scaling: DraftScaling,

    /// Weight of win% (as 0-100) in the closeness score
    pub closeness_win_weight: f64,

    /// Weight of the draft component in the closeness score
    pub closeness_draft_weight: f64,

    /// Regular season length used when league settings omit it
    pub default_season_length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeThresholds {
    /// Value difference strictly above this is an A
    pub a_above: f64,
    pub b_above: f64,
    /// An even swap lands in the C band
    pub c_at_least: f64,
    /// At or below this is an F
    pub d_above: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            vorp: VorpParameters::default(),
            grading: GradingParameters::default(),
            power: PowerParameters::default(),
            trades: TradeThresholds::default(),
        }
    }
}

impl Default for VorpParameters {
    fn default() -> Self {
        let mut ranks = HashMap::new();
        ranks.insert(Position::QB, 13);
        ranks.insert(Position::RB, 25);
        ranks.insert(Position::WR, 37);
        ranks.insert(Position::TE, 13);
        Self { replacement_ranks: ranks }
    }
}

impl Default for GradingParameters {
    fn default() -> Self {
        Self { a_cutoff: 1.0, b_cutoff: 0.5 }
    }
}

impl Default for PowerParameters {
    fn default() -> Self {
        Self {
            win_pct_weight: 0.6,
            points_for_weight: 0.4,
            normalization_epsilon: 1e-6,
            draft_scaling: DraftScaling::MinMax,
            closeness_win_weight: 0.5,
            closeness_draft_weight: 0.5,
            default_season_length: 14,
        }
    }
}

impl Default for TradeThresholds {
    fn default() -> Self {
        Self { a_above: 20.0, b_above: 10.0, c_at_least: 0.0, d_above: -10.0 }
    }
}

impl ScoringConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ScoringError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply `SCORING_*` overrides read through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScoringError> {
        let mut config = Self::default();

        if let Some(scaling) = lookup("SCORING_DRAFT_SCALING") {
            config.power.draft_scaling = match scaling.to_ascii_lowercase().as_str() {
                "raw" => DraftScaling::Raw,
                "min_max" | "minmax" => DraftScaling::MinMax,
                other => {
                    return Err(ScoringError::InvalidConfig {
                        message: format!("unknown draft scaling '{other}'"),
                    })
                }
            };
        }

        if let Some(length) = lookup("SCORING_SEASON_LENGTH") {
            config.power.default_season_length =
                length.trim().parse().map_err(|_| ScoringError::InvalidConfig {
                    message: "SCORING_SEASON_LENGTH must be a positive integer".to_string(),
                })?;
        }

        for position in [Position::QB, Position::RB, Position::WR, Position::TE] {
            let key = format!("SCORING_REPLACEMENT_RANK_{position}");
            if let Some(rank) = lookup(&key) {
                let rank: usize = rank.parse().map_err(|_| ScoringError::InvalidConfig {
                    message: format!("{key} must be a positive integer"),
                })?;
                config.vorp.replacement_ranks.insert(position, rank);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject parameter sets the scorers cannot use
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.vorp.replacement_ranks.values().any(|rank| *rank == 0) {
            return Err(ScoringError::InvalidConfig {
                message: "replacement ranks are 1-based".to_string(),
            });
        }
        if self.grading.b_cutoff > self.grading.a_cutoff {
            return Err(ScoringError::InvalidConfig {
                message: "grade B cutoff must not exceed the A cutoff".to_string(),
            });
        }
        if self.power.normalization_epsilon <= 0.0 {
            return Err(ScoringError::InvalidConfig {
                message: "normalization epsilon must be positive".to_string(),
            });
        }
        if self.power.default_season_length == 0 {
            return Err(ScoringError::InvalidSeasonLength(0));
        }
        let t = &self.trades;
        if !(t.a_above >= t.b_above && t.b_above >= t.c_at_least && t.c_at_least >= t.d_above) {
            return Err(ScoringError::InvalidConfig {
                message: "trade thresholds must be descending".to_string(),
            });
        }
        Ok(())
    }

    /// Replacement rank for a position, `None` meaning "worst in cohort"
    pub fn replacement_rank(&self, position: Position) -> Option<usize> {
        self.vorp.replacement_ranks.get(&position).copied()
    }
}
