//! Report composition
//!
//! Each report fetches what it needs through a [`LeagueDataSource`], runs the
//! scorers and shapes rows for display. Missing data never fails a report:
//! it becomes [`Report::NotEnoughData`] with a message for the reader.

use chrono::{DateTime, Utc};
use league_fetcher::models::league_label;
use league_fetcher::{LeagueDataSource, LeagueMetadata, LeagueRosters};
use scoring_engine::{
    owner_for, position_advantage, DraftScoreAggregator, DraftScores, Grade, GradeAssigner,
    GradingStrategy, MatchupEntry, MatchupGroup, MatchupGrouper, PositionAdvantage,
    PowerRankings, PowerScoreBlender, RosterId, ScoringConfig, SeasonProgress, SelectionStrategy,
    TeamLineup, TradeGrader, VorpCalculator,
};
use serde::Serialize;
use tracing::{info, warn};

/// Headline for a matchup picked by hand rather than by strategy
pub const SELECTED_MATCHUP: &str = "Selected Matchup";

/// Outcome of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Report<T> {
    Ready(T),
    NotEnoughData(String),
}

impl<T> Report<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Report::Ready(value) => Some(value),
            Report::NotEnoughData(_) => None,
        }
    }

    fn missing(message: impl Into<String>) -> Self {
        Report::NotEnoughData(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueEntry {
    pub league_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftReport {
    pub league: String,
    pub strategy: GradingStrategy,
    pub rows: Vec<DraftRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftRow {
    pub rank: usize,
    pub roster_id: RosterId,
    pub owner: String,
    /// Rounded to one decimal
    pub score: f64,
    pub grade: Grade,
    pub best_pick: String,
    pub worst_pick: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerReport {
    pub league: String,
    pub season_length: u32,
    pub rankings: PowerRankings,
}

/// One owner's power score by week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub owner: String,
    pub points: Vec<(u32, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupView {
    pub league: String,
    pub week: u32,
    pub headline: String,
    pub matchups: Vec<MatchupGroup>,
    /// Index into `matchups`
    pub selected: usize,
    pub lineups: Vec<TeamLineup>,
    /// Only filled in for completed weeks
    pub position_advantage: Vec<PositionAdvantage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeReport {
    pub league: String,
    pub rows: Vec<TradeRow>,
    /// Set when market values could not be loaded
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub side_a_owner: String,
    pub side_a_players: Vec<String>,
    pub side_a_value: f64,
    pub side_b_owner: String,
    pub side_b_players: Vec<String>,
    pub side_b_value: f64,
    pub value_diff: f64,
    pub grade: Grade,
}

/// League-wide state shared by the power and matchup reports
struct SeasonContext {
    metadata: LeagueMetadata,
    progress: SeasonProgress,
    rosters: LeagueRosters,
    rankings: PowerRankings,
    draft: DraftScores,
}

/// Runs reports against a data source
pub struct LeagueAnalyzer<'a> {
    source: &'a dyn LeagueDataSource,
    scoring: ScoringConfig,
}

impl<'a> LeagueAnalyzer<'a> {
    pub fn new(source: &'a dyn LeagueDataSource, scoring: ScoringConfig) -> Self {
        Self { source, scoring }
    }

    /// Display names for tracked leagues, falling back to "League {id}"
    pub async fn league_directory(&self, league_ids: &[String]) -> Vec<LeagueEntry> {
        let mut entries = Vec::with_capacity(league_ids.len());
        for league_id in league_ids {
            let name = self
                .source
                .fetch_league_metadata(league_id)
                .await
                .map(|m| m.name)
                .unwrap_or_else(|| league_label(league_id));
            entries.push(LeagueEntry { league_id: league_id.clone(), name });
        }
        entries
    }

    pub async fn draft_grades(&self, league_id: &str, strategy: GradingStrategy) -> Report<DraftReport> {
        let league = self.league_name(league_id).await;
        let draft = self.source.fetch_draft_picks(league_id).await;
        if !draft.has_picks() {
            return Report::missing(draft_pending_message(draft.scheduled_start));
        }

        let projections = self.source.fetch_season_projections().await;
        if projections.is_empty() {
            return Report::missing("Projections are unavailable, so the draft cannot be graded");
        }

        let rosters = self.source.fetch_rosters_and_users(league_id).await;
        let vorp = VorpCalculator::new(self.scoring.clone()).calculate(&projections);
        let scores =
            DraftScoreAggregator::new().aggregate_for_rosters(&rosters.roster_ids(), &draft.picks, &vorp);
        let graded =
            GradeAssigner::new(self.scoring.grading.clone()).assign(strategy, &scores.scores());

        let mut rows: Vec<(f64, DraftRow)> = graded
            .into_iter()
            .map(|g| {
                let team = scores.get(g.id);
                let best_pick = team
                    .and_then(|t| t.best_pick())
                    .map(|p| format!("{} ({:+.1})", p.player_name, p.value))
                    .unwrap_or_else(|| "-".to_string());
                let worst_pick = team
                    .and_then(|t| t.worst_pick())
                    .map(|p| format!("{} ({:.1})", p.player_name, p.value))
                    .unwrap_or_else(|| "-".to_string());
                let row = DraftRow {
                    rank: 0,
                    roster_id: g.id,
                    owner: owner_for(&rosters.roster_to_owner, g.id),
                    score: round1(g.score),
                    grade: g.grade,
                    best_pick,
                    worst_pick,
                };
                (g.score, row)
            })
            .collect();

        rows.sort_by(|a, b| b.0.total_cmp(&a.0));
        let rows: Vec<DraftRow> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (_, row))| DraftRow { rank: i + 1, ..row })
            .collect();

        info!("Graded {} drafts in {}", rows.len(), league);
        Report::Ready(DraftReport { league, strategy, rows })
    }

    pub async fn power_rankings(&self, league_id: &str) -> Report<PowerReport> {
        match self.season_context(league_id).await {
            Ok(context) => Report::Ready(PowerReport {
                league: context.metadata.name,
                season_length: context.progress.season_length(),
                rankings: context.rankings,
            }),
            Err(message) => Report::missing(message),
        }
    }

    /// Power score per owner for weeks 1 through the current week
    pub async fn power_trend(&self, league_id: &str) -> Report<Vec<TrendSeries>> {
        let context = match self.season_context(league_id).await {
            Ok(context) => context,
            Err(message) => return Report::missing(message),
        };

        let points = PowerScoreBlender::new(self.scoring.power.clone()).trend(
            &context.rosters.standings,
            &context.draft,
            context.progress,
        );

        let mut series: Vec<TrendSeries> = Vec::new();
        for point in points {
            match series.iter_mut().find(|s| s.owner == point.owner) {
                Some(existing) => existing.points.push((point.week, point.power_score)),
                None => series.push(TrendSeries {
                    owner: point.owner,
                    points: vec![(point.week, point.power_score)],
                }),
            }
        }
        Report::Ready(series)
    }

    /// Current week's matchups, featuring the Matchup of the Week unless
    /// `matchup_id` picks another
    pub async fn matchup_preview(&self, league_id: &str, matchup_id: Option<u32>) -> Report<MatchupView> {
        let context = match self.season_context(league_id).await {
            Ok(context) => context,
            Err(message) => return Report::missing(message),
        };
        let week = context.metadata.current_week;
        self.matchup_view(&context, week, SelectionStrategy::MatchupOfTheWeek, matchup_id, false)
            .await
    }

    /// Last week's results, featuring the closest matchup unless
    /// `matchup_id` picks another
    pub async fn matchup_summary(&self, league_id: &str, matchup_id: Option<u32>) -> Report<MatchupView> {
        let context = match self.season_context(league_id).await {
            Ok(context) => context,
            Err(message) => return Report::missing(message),
        };
        let Some(week) = context.metadata.current_week.checked_sub(1).filter(|w| *w > 0) else {
            return Report::missing("No completed week to summarize yet");
        };
        self.matchup_view(&context, week, SelectionStrategy::ClosestMatchup, matchup_id, true)
            .await
    }

    pub async fn trade_report(&self, league_id: &str) -> Report<TradeReport> {
        let league = self.league_name(league_id).await;
        let records = self.source.fetch_trades(league_id).await;
        if records.is_empty() {
            return Report::missing("No trades found for this league");
        }

        let values = self.source.fetch_market_values().await;
        let warning = values.is_empty().then(|| {
            warn!("No market values for {}; every asset is valued at 0", league);
            "Market values are unavailable, grades may be inaccurate".to_string()
        });

        let directory = self.source.player_directory().await;
        let rosters = self.source.fetch_rosters_and_users(league_id).await;
        let grader = TradeGrader::new(self.scoring.trades.clone());
        let owner = |roster_id: Option<RosterId>| {
            roster_id.map(|id| owner_for(&rosters.roster_to_owner, id)).unwrap_or_else(|| "-".to_string())
        };

        let rows = records
            .iter()
            .map(|record| {
                let evaluation = grader.evaluate(&record.to_trade(&directory), &values);
                TradeRow {
                    side_a_owner: owner(evaluation.side_a.roster_id),
                    side_a_players: evaluation.side_a.assets,
                    side_a_value: evaluation.side_a_value,
                    side_b_owner: owner(evaluation.side_b.roster_id),
                    side_b_players: evaluation.side_b.assets,
                    side_b_value: evaluation.side_b_value,
                    value_diff: evaluation.value_diff,
                    grade: evaluation.grade,
                }
            })
            .collect();

        Report::Ready(TradeReport { league, rows, warning })
    }

    async fn league_name(&self, league_id: &str) -> String {
        self.source
            .fetch_league_metadata(league_id)
            .await
            .map(|m| m.name)
            .unwrap_or_else(|| league_label(league_id))
    }

    /// Draft scores for every roster. Without picks or projections every
    /// team scores 0.
    async fn draft_scores(&self, league_id: &str, rosters: &LeagueRosters) -> DraftScores {
        let aggregator = DraftScoreAggregator::new();
        let draft = self.source.fetch_draft_picks(league_id).await;
        if !draft.has_picks() {
            return aggregator.aggregate_for_rosters(&rosters.roster_ids(), &[], &Default::default());
        }

        let projections = self.source.fetch_season_projections().await;
        if projections.is_empty() {
            warn!("No projections for {}; draft scores default to 0", league_id);
        }
        let vorp = VorpCalculator::new(self.scoring.clone()).calculate(&projections);
        aggregator.aggregate_for_rosters(&rosters.roster_ids(), &draft.picks, &vorp)
    }

    async fn season_context(&self, league_id: &str) -> Result<SeasonContext, String> {
        let metadata = self
            .source
            .fetch_league_metadata(league_id)
            .await
            .ok_or_else(|| format!("{} could not be loaded", league_label(league_id)))?;
        let progress = SeasonProgress::new(metadata.season_length, metadata.current_week)
            .map_err(|e| format!("Season settings are unusable: {e}"))?;

        let rosters = self.source.fetch_rosters_and_users(league_id).await;
        if rosters.standings.is_empty() {
            return Err("No standings available for this league".to_string());
        }

        let draft = self.draft_scores(league_id, &rosters).await;
        let rankings = PowerScoreBlender::new(self.scoring.power.clone()).rank(
            &rosters.standings,
            &draft,
            progress,
        );

        Ok(SeasonContext { metadata, progress, rosters, rankings, draft })
    }

    async fn matchup_view(
        &self,
        context: &SeasonContext,
        week: u32,
        strategy: SelectionStrategy,
        matchup_id: Option<u32>,
        completed: bool,
    ) -> Report<MatchupView> {
        let entries: Vec<MatchupEntry> =
            self.source.fetch_matchups(&context.metadata.league_id, week).await;
        let groups =
            MatchupGrouper::new().group(&entries, &context.rosters.roster_to_owner, &context.rankings);
        if groups.is_empty() {
            return Report::missing(format!("No matchups found for week {week}"));
        }

        let featured = strategy.select(&groups);
        let selected = match matchup_id {
            Some(id) => match groups.iter().position(|g| g.matchup_id == id) {
                Some(index) => index,
                None => return Report::missing(format!("Matchup {id} not found in week {week}")),
            },
            None => featured.unwrap_or(0),
        };
        let headline = if Some(selected) == featured { strategy.headline() } else { SELECTED_MATCHUP };

        let directory = self.source.player_directory().await;
        let projections = self.source.fetch_weekly_projections(week).await;
        let lineups: Vec<TeamLineup> = groups[selected]
            .entry_indexes
            .iter()
            .map(|i| {
                TeamLineup::build(&entries[*i], &context.rosters.roster_to_owner, &directory, &projections)
            })
            .collect();

        let advantages = match (completed, lineups.first(), lineups.get(1)) {
            (true, Some(home), Some(away)) => position_advantage(home, away),
            _ => Vec::new(),
        };

        Report::Ready(MatchupView {
            league: context.metadata.name.clone(),
            week,
            headline: headline.to_string(),
            matchups: groups,
            selected,
            lineups,
            position_advantage: advantages,
        })
    }
}

fn draft_pending_message(scheduled_start: Option<DateTime<Utc>>) -> String {
    match scheduled_start {
        Some(start) => format!(
            "Draft not yet complete, scheduled for {}",
            start.format("%Y-%m-%d %H:%M UTC")
        ),
        None => "No draft picks found and no draft time is set".to_string(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use league_fetcher::DraftResult;
    use league_fetcher::TradeRecord;
    use scoring_engine::{
        DraftPick, PlayerDirectory, PlayerIdentity, PlayerProjection, Position, StandingsRow,
    };
    use std::collections::{BTreeMap, HashMap};

    #[derive(Default)]
    struct FakeSource {
        metadata: Option<LeagueMetadata>,
        rosters: LeagueRosters,
        draft: DraftResult,
        projections: Vec<PlayerProjection>,
        matchups: Vec<MatchupEntry>,
        trades: Vec<TradeRecord>,
        market_values: HashMap<String, f64>,
        directory: PlayerDirectory,
    }

    #[async_trait]
    impl LeagueDataSource for FakeSource {
        async fn fetch_league_metadata(&self, _league_id: &str) -> Option<LeagueMetadata> {
            self.metadata.clone()
        }

        async fn fetch_rosters_and_users(&self, _league_id: &str) -> LeagueRosters {
            self.rosters.clone()
        }

        async fn fetch_draft_picks(&self, _league_id: &str) -> DraftResult {
            self.draft.clone()
        }

        async fn fetch_season_projections(&self) -> Vec<PlayerProjection> {
            self.projections.clone()
        }

        async fn fetch_weekly_projections(&self, _week: u32) -> HashMap<String, f64> {
            [("Josh Allen".to_string(), 24.5), ("Jalen Hurts".to_string(), 22.0)].into()
        }

        async fn fetch_matchups(&self, _league_id: &str, _week: u32) -> Vec<MatchupEntry> {
            self.matchups.clone()
        }

        async fn fetch_trades(&self, _league_id: &str) -> Vec<TradeRecord> {
            self.trades.clone()
        }

        async fn fetch_market_values(&self) -> HashMap<String, f64> {
            self.market_values.clone()
        }

        async fn player_directory(&self) -> PlayerDirectory {
            self.directory.clone()
        }
    }

    fn standing(roster_id: RosterId, owner: &str, wins: u32, losses: u32, points_for: f64) -> StandingsRow {
        StandingsRow { roster_id, owner: owner.to_string(), wins, losses, points_for }
    }

    fn entry(roster_id: RosterId, matchup_id: u32, player_id: &str, points: f64) -> MatchupEntry {
        MatchupEntry {
            roster_id,
            matchup_id,
            starters: vec![player_id.to_string()],
            players_points: [(player_id.to_string(), points)].into(),
        }
    }

    fn league() -> FakeSource {
        FakeSource {
            metadata: Some(LeagueMetadata {
                league_id: "L1".to_string(),
                name: "Dynasty Degens".to_string(),
                season: Some("2024".to_string()),
                scoring_settings: HashMap::new(),
                season_length: 14,
                current_week: 3,
            }),
            rosters: LeagueRosters {
                roster_to_owner: [(1, "alice".to_string()), (2, "bob".to_string())].into(),
                standings: vec![standing(1, "alice", 2, 0, 250.0), standing(2, "bob", 0, 2, 200.0)],
            },
            draft: DraftResult {
                draft_id: Some("D1".to_string()),
                status: Some("complete".to_string()),
                scheduled_start: None,
                picks: vec![
                    DraftPick { roster_id: 1, draft_slot: 1, player_name: "Josh Allen".to_string() },
                    DraftPick { roster_id: 2, draft_slot: 2, player_name: "Jalen Hurts".to_string() },
                ],
            },
            projections: vec![
                PlayerProjection::new("Josh Allen", Position::QB, 400.0),
                PlayerProjection::new("Jalen Hurts", Position::QB, 350.0),
                PlayerProjection::new("Dak Prescott", Position::QB, 300.0),
            ],
            matchups: vec![entry(1, 1, "4984", 30.0), entry(2, 1, "6904", 25.0)],
            trades: vec![TradeRecord {
                roster_ids: vec![1, 2],
                adds: BTreeMap::from([("6904".to_string(), 1), ("4984".to_string(), 2)]),
                drops: BTreeMap::from([("4984".to_string(), 1), ("6904".to_string(), 2)]),
            }],
            market_values: [("Josh Allen".to_string(), 9000.0), ("Jalen Hurts".to_string(), 8000.0)]
                .into(),
            directory: PlayerDirectory::from_identities([
                PlayerIdentity {
                    player_id: "4984".to_string(),
                    name: "Josh Allen".to_string(),
                    position: Some(Position::QB),
                },
                PlayerIdentity {
                    player_id: "6904".to_string(),
                    name: "Jalen Hurts".to_string(),
                    position: Some(Position::QB),
                },
            ]),
        }
    }

    fn analyzer(source: &FakeSource) -> LeagueAnalyzer<'_> {
        LeagueAnalyzer::new(source, ScoringConfig::default())
    }

    #[tokio::test]
    async fn test_league_directory_falls_back_to_label() {
        let named = league();
        let entries = analyzer(&named).league_directory(&["L1".to_string()]).await;
        assert_eq!(entries[0].name, "Dynasty Degens");

        let unnamed = FakeSource::default();
        let entries = analyzer(&unnamed).league_directory(&["77".to_string()]).await;
        assert_eq!(entries, vec![LeagueEntry { league_id: "77".to_string(), name: "League 77".to_string() }]);
    }

    #[tokio::test]
    async fn test_draft_grades_rank_by_score() {
        let source = league();
        let report = analyzer(&source).draft_grades("L1", GradingStrategy::Ranked).await;
        let report = report.ready().unwrap();

        assert_eq!(report.league, "Dynasty Degens");
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].rank, 1);
        assert_eq!(report.rows[0].owner, "alice");
        assert_eq!(report.rows[0].score, 100.0);
        assert_eq!(report.rows[0].grade, Grade::APlus);
        assert_eq!(report.rows[0].best_pick, "Josh Allen (+100.0)");
        assert_eq!(report.rows[1].owner, "bob");
        assert_eq!(report.rows[1].grade, Grade::D);
        assert_eq!(report.rows[1].worst_pick, "Jalen Hurts (50.0)");
    }

    #[tokio::test]
    async fn test_draft_grades_wait_for_picks() {
        let mut source = league();
        source.draft = DraftResult::default();
        let report = analyzer(&source).draft_grades("L1", GradingStrategy::ZScore).await;
        assert!(matches!(report, Report::NotEnoughData(ref m) if m.contains("no draft time")));

        source.draft.scheduled_start = Utc.timestamp_opt(1_725_000_000, 0).single();
        let report = analyzer(&source).draft_grades("L1", GradingStrategy::ZScore).await;
        assert!(matches!(report, Report::NotEnoughData(ref m) if m.starts_with("Draft not yet complete")));
    }

    #[tokio::test]
    async fn test_draft_grades_need_projections() {
        let mut source = league();
        source.projections.clear();
        let report = analyzer(&source).draft_grades("L1", GradingStrategy::ZScore).await;
        assert!(matches!(report, Report::NotEnoughData(_)));
    }

    #[tokio::test]
    async fn test_power_rankings() {
        let source = league();
        let report = analyzer(&source).power_rankings("L1").await.ready().unwrap();
        assert_eq!(report.season_length, 14);
        assert_eq!(report.rankings.week, 3);
        assert_eq!(report.rankings.rows[0].owner, "alice");
        assert_eq!(report.rankings.rows[1].rank, 2);
    }

    #[tokio::test]
    async fn test_power_rankings_without_draft_still_rank() {
        let mut source = league();
        source.draft = DraftResult::default();
        let report = analyzer(&source).power_rankings("L1").await.ready().unwrap();
        assert!(report.rankings.rows.iter().all(|r| r.draft_score == 0.0));
        assert_eq!(report.rankings.rows[0].owner, "alice");
    }

    #[tokio::test]
    async fn test_power_rankings_need_league() {
        let source = FakeSource::default();
        let report = analyzer(&source).power_rankings("L1").await;
        assert_eq!(report, Report::NotEnoughData("League L1 could not be loaded".to_string()));
    }

    #[tokio::test]
    async fn test_power_trend_groups_by_owner() {
        let source = league();
        let series = analyzer(&source).power_trend("L1").await.ready().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].owner, "alice");
        let weeks: Vec<u32> = series[0].points.iter().map(|(w, _)| *w).collect();
        assert_eq!(weeks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_matchup_preview_features_matchup_of_the_week() {
        let source = league();
        let view = analyzer(&source).matchup_preview("L1", None).await.ready().unwrap();
        assert_eq!(view.week, 3);
        assert_eq!(view.headline, "Matchup of the Week");
        assert_eq!(view.lineups.len(), 2);
        assert_eq!(view.lineups[0].starters[0].player_name, "Josh Allen");
        assert_eq!(view.lineups[0].starters[0].projected_points, 24.5);
        assert!(view.position_advantage.is_empty());
    }

    #[tokio::test]
    async fn test_matchup_preview_unknown_id() {
        let source = league();
        let report = analyzer(&source).matchup_preview("L1", Some(9)).await;
        assert!(matches!(report, Report::NotEnoughData(ref m) if m.contains("Matchup 9")));
    }

    #[tokio::test]
    async fn test_matchup_summary_compares_positions() {
        let source = league();
        let view = analyzer(&source).matchup_summary("L1", Some(1)).await.ready().unwrap();
        assert_eq!(view.week, 2);
        assert_eq!(view.headline, "Closest Matchup of the Week");
        assert_eq!(view.position_advantage.len(), 1);
        assert_eq!(view.position_advantage[0].position, "QB");
        assert_eq!(view.position_advantage[0].winner, "alice");
    }

    #[tokio::test]
    async fn test_matchup_summary_needs_completed_week() {
        let mut source = league();
        if let Some(metadata) = source.metadata.as_mut() {
            metadata.current_week = 1;
        }
        let report = analyzer(&source).matchup_summary("L1", None).await;
        assert!(matches!(report, Report::NotEnoughData(_)));
    }

    #[tokio::test]
    async fn test_trade_report() {
        let source = league();
        let report = analyzer(&source).trade_report("L1").await.ready().unwrap();
        assert!(report.warning.is_none());

        let row = &report.rows[0];
        assert_eq!(row.side_a_owner, "alice");
        assert_eq!(row.side_a_players, vec!["Jalen Hurts"]);
        assert_eq!(row.side_b_owner, "bob");
        assert_eq!(row.value_diff, -1000.0);
        assert_eq!(row.grade, Grade::F);
    }

    #[tokio::test]
    async fn test_trade_report_without_market_values() {
        let mut source = league();
        source.market_values.clear();
        let report = analyzer(&source).trade_report("L1").await.ready().unwrap();
        assert!(report.warning.is_some());
        assert_eq!(report.rows[0].grade, Grade::C);

        source.trades.clear();
        let report = analyzer(&source).trade_report("L1").await;
        assert!(matches!(report, Report::NotEnoughData(_)));
    }
}
