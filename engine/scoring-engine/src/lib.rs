//! Scoring engine for fantasy football leagues
//!
//! Turns projections, draft results, standings, matchups and market values
//! into VORP, draft grades, power rankings, featured matchups and trade
//! grades. Everything here is pure computation over in-memory inputs; the
//! fetching side lives in `league-fetcher`.

pub mod config;
pub mod draft;
pub mod error;
pub mod grades;
pub mod identity;
pub mod matchups;
pub mod models;
pub mod power;
pub mod trades;
pub mod vorp;

pub use config::{
    DraftScaling, GradingParameters, PowerParameters, ScoringConfig, TradeThresholds,
    VorpParameters,
};
pub use draft::{DraftScoreAggregator, DraftScores, PickValue, TeamDraftScore};
pub use error::ScoringError;
pub use grades::{GradeAssigner, GradedScore, GradingStrategy, PopulationStats};
pub use identity::{IdentityResolver, PlayerDirectory, PlayerIdentity, UNKNOWN_PLAYER};
pub use matchups::{
    position_advantage, MatchupGroup, MatchupGrouper, PositionAdvantage, SelectionStrategy,
    StarterLine, TeamLineup, UNKNOWN_POSITION,
};
pub use models::*;
pub use power::{
    min_max_scale, BlendWeights, PowerRankings, PowerRow, PowerScoreBlender, SeasonProgress,
    TrendPoint,
};
pub use trades::{Trade, TradeEvaluation, TradeGrader, TradeSide};
pub use vorp::{ReplacementLevel, VorpCalculator, VorpTable};
