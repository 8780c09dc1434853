//! Trade grading against external market values
//!
//! Each side's received assets are summed at market value; the grade
//! reflects side A's net gain.

use crate::config::TradeThresholds;
use crate::models::{Grade, RosterId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Assets one roster received in a trade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeSide {
    pub roster_id: Option<RosterId>,
    /// Player display names
    pub assets: Vec<String>,
}

/// A completed trade between two sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side_a: TradeSide,
    pub side_b: TradeSide,
}

/// A graded trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvaluation {
    pub side_a: TradeSide,
    pub side_b: TradeSide,
    pub side_a_value: f64,
    pub side_b_value: f64,
    pub value_diff: f64,
    pub grade: Grade,
}

/// Grades trades by the difference in summed market value
pub struct TradeGrader {
    thresholds: TradeThresholds,
}

impl TradeGrader {
    pub fn new(thresholds: TradeThresholds) -> Self {
        Self { thresholds }
    }

    /// Assets missing from `market_values` are worth 0
    pub fn evaluate(&self, trade: &Trade, market_values: &HashMap<String, f64>) -> TradeEvaluation {
        let side_a_value = side_value(&trade.side_a, market_values);
        let side_b_value = side_value(&trade.side_b, market_values);
        let value_diff = side_a_value - side_b_value;

        TradeEvaluation {
            side_a: trade.side_a.clone(),
            side_b: trade.side_b.clone(),
            side_a_value,
            side_b_value,
            value_diff,
            grade: self.grade(value_diff),
        }
    }

    pub fn grade(&self, value_diff: f64) -> Grade {
        let t = &self.thresholds;
        if value_diff > t.a_above {
            Grade::A
        } else if value_diff > t.b_above {
            Grade::B
        } else if value_diff >= t.c_at_least {
            Grade::C
        } else if value_diff > t.d_above {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl Default for TradeGrader {
    fn default() -> Self {
        Self::new(TradeThresholds::default())
    }
}

fn side_value(side: &TradeSide, market_values: &HashMap<String, f64>) -> f64 {
    side.assets.iter().map(|a| market_values.get(a).copied().unwrap_or(0.0)).sum()
}
