//! Replacement-level value over replacement player (VORP)
//!
//! Projections are grouped by position and ranked by projected points. The
//! player at the position's replacement rank sets the baseline; every player
//! in the cohort scores `points - baseline`, so players below replacement get
//! negative values.
//!
//! Players are keyed by display name because that is the only identity the
//! projection site shares with the league API. Two players with the same full
//! name collide: the later row overwrites the earlier one in the output map.
//! Spelling drift between sources ("D.J. Moore" vs "DJ Moore") shows up as a
//! missing lookup downstream and scores 0.

use crate::config::ScoringConfig;
use crate::models::{PlayerProjection, Position};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Per-position replacement baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplacementLevel {
    pub position: Position,
    /// Players in the cohort
    pub cohort_size: usize,
    /// 1-based rank actually used after clamping to the cohort
    pub rank: usize,
    pub points: f64,
}

/// VORP values keyed by player name, plus the baselines that produced them
#[derive(Debug, Clone, Default)]
pub struct VorpTable {
    values: HashMap<String, f64>,
    levels: BTreeMap<Position, ReplacementLevel>,
}

impl VorpTable {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn replacement_level(&self, position: Position) -> Option<&ReplacementLevel> {
        self.levels.get(&position)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Calculates VORP from season projections
pub struct VorpCalculator {
    config: ScoringConfig,
}

impl VorpCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Build the VORP table for a projection set.
    ///
    /// Rows with non-finite or negative points are dropped rather than scored
    /// as zero.
    pub fn calculate(&self, projections: &[PlayerProjection]) -> VorpTable {
        let mut cohorts: BTreeMap<Position, Vec<&PlayerProjection>> = BTreeMap::new();
        let mut dropped = 0usize;

        for projection in projections {
            if !projection.projected_points.is_finite() || projection.projected_points < 0.0 {
                dropped += 1;
                continue;
            }
            cohorts.entry(projection.position).or_default().push(projection);
        }

        if dropped > 0 {
            warn!("Dropped {} projections with unusable point totals", dropped);
        }

        let mut table = VorpTable::default();

        for (position, mut cohort) in cohorts {
            // Stable sort: equal projections keep their input order
            cohort.sort_by(|a, b| b.projected_points.total_cmp(&a.projected_points));

            let size = cohort.len();
            let rank = self.config.replacement_rank(position).unwrap_or(size).clamp(1, size);
            let baseline = cohort[rank - 1].projected_points;

            debug!(
                "Replacement level for {}: rank {} of {} at {:.2} pts",
                position, rank, size, baseline
            );

            for projection in &cohort {
                table
                    .values
                    .insert(projection.name.clone(), projection.projected_points - baseline);
            }
            table.levels.insert(
                position,
                ReplacementLevel { position, cohort_size: size, rank, points: baseline },
            );
        }

        table
    }
}
