//! Letter grades for a population of team scores
//!
//! Two strategies are supported and callers pick one explicitly:
//!
//! * [`GradingStrategy::ZScore`] bands each team by its z-score against the
//!   population mean and standard deviation (A, B, C, D, F).
//! * [`GradingStrategy::Ranked`] grades by finishing position: first gets an
//!   A+, last gets a D, everyone else walks a fixed ladder.

use crate::config::GradingParameters;
use crate::models::Grade;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Spread treated as zero, relative to the magnitude of the mean
const RELATIVE_STDEV_TOLERANCE: f64 = 1e-12;

/// Ladder for the ranked strategy, indexed by `rank - 1`
const RANKED_LADDER: [Grade; 6] =
    [Grade::A, Grade::BPlus, Grade::B, Grade::CPlus, Grade::C, Grade::CMinus];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingStrategy {
    ZScore,
    Ranked,
}

/// Grade assigned to one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedScore<K> {
    pub id: K,
    pub score: f64,
    pub grade: Grade,
    /// Only set by the z-score strategy
    pub z_score: Option<f64>,
}

/// Population mean and standard deviation (N denominator)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub mean: f64,
    pub stdev: f64,
}

impl PopulationStats {
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self { mean: 0.0, stdev: 0.0 };
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Self { mean, stdev: variance.sqrt() }
    }

    /// True when the spread is zero up to rounding noise
    pub fn is_degenerate(&self) -> bool {
        self.stdev <= RELATIVE_STDEV_TOLERANCE * self.mean.abs().max(1.0)
    }

    /// z-score with a zero spread replaced by 1
    pub fn z_score(&self, score: f64) -> f64 {
        let stdev = if self.is_degenerate() { 1.0 } else { self.stdev };
        (score - self.mean) / stdev
    }
}

/// Assigns letter grades to team scores
pub struct GradeAssigner {
    params: GradingParameters,
}

impl GradeAssigner {
    pub fn new(params: GradingParameters) -> Self {
        Self { params }
    }

    /// Grade every entity with the chosen strategy, keeping input order
    pub fn assign<K: Clone>(
        &self,
        strategy: GradingStrategy,
        scores: &[(K, f64)],
    ) -> Vec<GradedScore<K>> {
        match strategy {
            GradingStrategy::ZScore => self.assign_z_score(scores),
            GradingStrategy::Ranked => self.assign_ranked(scores),
        }
    }

    pub fn assign_z_score<K: Clone>(&self, scores: &[(K, f64)]) -> Vec<GradedScore<K>> {
        let values: Vec<f64> = scores.iter().map(|(_, s)| *s).collect();
        let stats = PopulationStats::from_scores(&values);

        if stats.is_degenerate() && !scores.is_empty() {
            debug!("All {} scores are equal; using unit spread", scores.len());
        }

        scores
            .iter()
            .map(|(id, score)| {
                let z = stats.z_score(*score);
                GradedScore { id: id.clone(), score: *score, grade: self.band(z), z_score: Some(z) }
            })
            .collect()
    }

    pub fn assign_ranked<K: Clone>(&self, scores: &[(K, f64)]) -> Vec<GradedScore<K>> {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        // Stable: equal scores keep the earlier entity ahead
        order.sort_by(|a, b| scores[*b].1.total_cmp(&scores[*a].1));

        let last = scores.len();
        let mut grades = vec![Grade::C; scores.len()];
        for (position, index) in order.into_iter().enumerate() {
            let rank = position + 1;
            grades[index] = if rank == 1 {
                Grade::APlus
            } else if rank == last {
                Grade::D
            } else {
                RANKED_LADDER[(rank - 1).min(RANKED_LADDER.len() - 1)]
            };
        }

        scores
            .iter()
            .zip(grades)
            .map(|((id, score), grade)| GradedScore {
                id: id.clone(),
                score: *score,
                grade,
                z_score: None,
            })
            .collect()
    }

    /// Map a z-score onto the A-F bands
    pub fn band(&self, z: f64) -> Grade {
        let a = self.params.a_cutoff;
        let b = self.params.b_cutoff;
        if z > a {
            Grade::A
        } else if z > b {
            Grade::B
        } else if z > -b {
            Grade::C
        } else if z > -a {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl Default for GradeAssigner {
    fn default() -> Self {
        Self::new(GradingParameters::default())
    }
}
