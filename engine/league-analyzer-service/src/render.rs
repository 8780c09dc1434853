//! Plain-text and JSON rendering of reports

use crate::reports::{DraftReport, LeagueEntry, MatchupView, PowerReport, Report, TradeReport, TrendSeries};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct LeagueLine {
    #[tabled(rename = "League ID")]
    league_id: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct DraftLine {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Best Pick")]
    best_pick: String,
    #[tabled(rename = "Worst Pick")]
    worst_pick: String,
}

#[derive(Tabled)]
struct PowerLine {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "PF")]
    points_for: String,
    #[tabled(rename = "Draft")]
    draft: String,
    #[tabled(rename = "Record Score")]
    record_score: String,
    #[tabled(rename = "Power")]
    power: String,
}

#[derive(Tabled)]
struct StarterRow {
    #[tabled(rename = "Pos")]
    position: String,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Proj")]
    projected: String,
    #[tabled(rename = "Actual")]
    actual: String,
}

#[derive(Tabled)]
struct AdvantageRow {
    #[tabled(rename = "Pos")]
    position: String,
    #[tabled(rename = "Home")]
    home: String,
    #[tabled(rename = "Away")]
    away: String,
    #[tabled(rename = "Edge")]
    winner: String,
}

#[derive(Tabled)]
struct TradeLine {
    #[tabled(rename = "Side A")]
    side_a_owner: String,
    #[tabled(rename = "A Receives")]
    side_a_players: String,
    #[tabled(rename = "A Value")]
    side_a_value: String,
    #[tabled(rename = "Side B")]
    side_b_owner: String,
    #[tabled(rename = "B Receives")]
    side_b_players: String,
    #[tabled(rename = "B Value")]
    side_b_value: String,
    #[tabled(rename = "Diff")]
    diff: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

/// Pretty-printed JSON of any report
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize report")
}

/// Render a report, or its "not enough data" message, with `body`
pub fn render_report<T>(title: &str, report: &Report<T>, body: impl Fn(&T) -> String) -> String {
    let mut out = heading(title);
    match report {
        Report::Ready(value) => out.push_str(&body(value)),
        Report::NotEnoughData(message) => {
            let _ = writeln!(out, "Not enough data: {message}");
        }
    }
    out
}

pub fn leagues(entries: &[LeagueEntry]) -> String {
    let mut out = heading("Tracked Leagues");
    if entries.is_empty() {
        out.push_str("No leagues configured\n");
        return out;
    }
    out.push_str(&table(entries.iter().map(|e| LeagueLine {
        league_id: e.league_id.clone(),
        name: e.name.clone(),
    })));
    out
}

pub fn draft(report: &DraftReport) -> String {
    let rows = report.rows.iter().map(|r| DraftLine {
        rank: r.rank,
        owner: r.owner.clone(),
        score: format!("{:.1}", r.score),
        grade: r.grade.to_string(),
        best_pick: r.best_pick.clone(),
        worst_pick: r.worst_pick.clone(),
    });
    format!("{}\n{}", report.league, table(rows))
}

pub fn power(report: &PowerReport) -> String {
    let rankings = &report.rankings;
    let mut out = format!("{}, week {} of {}\n", report.league, rankings.week, report.season_length);
    if let Some(weights) = rankings.weights {
        let _ = writeln!(
            out,
            "Weights: record {:.0}%, projection {:.0}%",
            weights.record * 100.0,
            weights.projection * 100.0
        );
    }
    out.push_str(&table(rankings.rows.iter().map(|r| PowerLine {
        rank: r.rank,
        owner: r.owner.clone(),
        record: format!("{}-{}", r.wins, r.losses),
        points_for: format!("{:.2}", r.points_for),
        draft: format!("{:.1}", r.draft_score),
        record_score: format!("{:.1}", r.record_score),
        power: format!("{:.1}", r.power_score),
    })));
    out
}

/// One row per owner, one column per week
pub fn trend(series: &[TrendSeries]) -> String {
    let weeks = series.iter().map(|s| s.points.len()).max().unwrap_or(0);

    let mut builder = Builder::default();
    let mut header = vec!["Owner".to_string()];
    header.extend((1..=weeks).map(|w| format!("W{w}")));
    builder.push_record(header);

    for s in series {
        let mut row = vec![s.owner.clone()];
        row.extend(s.points.iter().map(|(_, score)| format!("{score:.1}")));
        builder.push_record(row);
    }
    format!("{}\n", builder.build())
}

pub fn matchup(view: &MatchupView) -> String {
    let mut out = format!("{}, week {}\n", view.league, view.week);
    for (index, group) in view.matchups.iter().enumerate() {
        let marker = if index == view.selected { "*" } else { " " };
        let _ = writeln!(out, "{marker} [{}] {}", group.matchup_id, group.label());
    }

    let _ = writeln!(out, "\n{}", view.headline);
    for lineup in &view.lineups {
        let _ = writeln!(
            out,
            "\n{} ({:.2} actual, {:.2} projected)",
            lineup.owner,
            lineup.total_actual(),
            lineup.total_projected()
        );
        out.push_str(&table(lineup.starters.iter().map(|s| StarterRow {
            position: s.position.clone(),
            player: if s.top_scorer { format!("{} *", s.player_name) } else { s.player_name.clone() },
            projected: format!("{:.2}", s.projected_points),
            actual: format!("{:.2}", s.actual_points),
        })));
    }

    if !view.position_advantage.is_empty() {
        out.push_str("\nPositional Advantage\n");
        out.push_str(&table(view.position_advantage.iter().map(|a| AdvantageRow {
            position: a.position.clone(),
            home: format!("{:.2}", a.home_points),
            away: format!("{:.2}", a.away_points),
            winner: a.winner.clone(),
        })));
    }
    out
}

pub fn trades(report: &TradeReport) -> String {
    let mut out = format!("{}\n", report.league);
    if let Some(warning) = &report.warning {
        let _ = writeln!(out, "Warning: {warning}");
    }
    out.push_str(&table(report.rows.iter().map(|r| TradeLine {
        side_a_owner: r.side_a_owner.clone(),
        side_a_players: r.side_a_players.join(", "),
        side_a_value: format!("{:.0}", r.side_a_value),
        side_b_owner: r.side_b_owner.clone(),
        side_b_players: r.side_b_players.join(", "),
        side_b_value: format!("{:.0}", r.side_b_value),
        diff: format!("{:+.0}", r.value_diff),
        grade: r.grade.to_string(),
    })));
    out
}

fn heading(title: &str) -> String {
    format!("{title}\n{}\n", "=".repeat(title.chars().count().max(10)))
}

fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    format!("{}\n", Table::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{DraftRow, TradeRow};
    use scoring_engine::{Grade, GradingStrategy};

    #[test]
    fn test_leagues_table() {
        let out = leagues(&[
            LeagueEntry { league_id: "1048313545995296768".to_string(), name: "Dynasty Degens".to_string() },
            LeagueEntry { league_id: "77".to_string(), name: "League 77".to_string() },
        ]);
        assert!(out.starts_with("Tracked Leagues\n"));
        let header = out.lines().find(|l| l.contains("League ID")).unwrap();
        assert!(header.contains("Name"));
        assert!(out.contains("Dynasty Degens"));
        assert!(out.contains("League 77"));
    }

    #[test]
    fn test_trend_has_a_column_per_week() {
        let out = trend(&[
            TrendSeries { owner: "alice".to_string(), points: vec![(1, 80.0), (2, 85.5), (3, 90.25)] },
            TrendSeries { owner: "bob".to_string(), points: vec![(1, 40.0), (2, 35.0), (3, 30.0)] },
        ]);
        let header = out.lines().find(|l| l.contains("Owner")).unwrap();
        assert!(header.contains("W1") && header.contains("W3"));
        assert!(!header.contains("W4"));
        let alice = out.lines().find(|l| l.contains("alice")).unwrap();
        assert!(alice.contains("85.5"));
    }

    #[test]
    fn test_not_enough_data_message() {
        let report: Report<DraftReport> = Report::NotEnoughData("Draft not yet complete".to_string());
        let out = render_report("Draft Grades", &report, draft);
        assert!(out.starts_with("Draft Grades\n============"));
        assert!(out.ends_with("Not enough data: Draft not yet complete\n"));
    }

    #[test]
    fn test_draft_table() {
        let report = DraftReport {
            league: "Dynasty Degens".to_string(),
            strategy: GradingStrategy::ZScore,
            rows: vec![DraftRow {
                rank: 1,
                roster_id: 1,
                owner: "alice".to_string(),
                score: 100.0,
                grade: Grade::A,
                best_pick: "Josh Allen (+100.0)".to_string(),
                worst_pick: "-".to_string(),
            }],
        };
        let out = draft(&report);
        assert!(out.starts_with("Dynasty Degens\n"));
        assert!(out.contains("alice"));
        assert!(out.contains("100.0"));
        assert!(out.contains("Josh Allen (+100.0)"));
    }

    #[test]
    fn test_trades_show_warning_and_signed_diff() {
        let report = TradeReport {
            league: "Dynasty Degens".to_string(),
            rows: vec![TradeRow {
                side_a_owner: "alice".to_string(),
                side_a_players: vec!["Jalen Hurts".to_string(), "2025 1st".to_string()],
                side_a_value: 8000.0,
                side_b_owner: "bob".to_string(),
                side_b_players: vec!["Josh Allen".to_string()],
                side_b_value: 9000.0,
                value_diff: -1000.0,
                grade: Grade::F,
            }],
            warning: Some("Market values are unavailable".to_string()),
        };
        let out = trades(&report);
        assert!(out.contains("Warning: Market values are unavailable"));
        assert!(out.contains("Jalen Hurts, 2025 1st"));
        assert!(out.contains("-1000"));
    }

    #[test]
    fn test_json_is_tagged() {
        let report: Report<Vec<LeagueEntry>> = Report::NotEnoughData("none".to_string());
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"status\": \"not_enough_data\""));
    }
}
