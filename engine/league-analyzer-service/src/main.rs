//! League Analyzer
//!
//! Command-line entry point: loads configuration, sets up logging and prints
//! one report for the selected league.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use league_analyzer_service::render::{self, to_json};
use league_analyzer_service::{
    initialize_logging_with_config, load_config, save_config, LeagueAnalyzer, OutputFormat,
    Report, ServiceConfig,
};
use league_fetcher::HttpLeagueDataSource;
use scoring_engine::GradingStrategy;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "league-analyzer")]
#[command(about = "Draft grades, power rankings, matchups and trade grades for Sleeper leagues")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// League id; defaults to the first configured league
    #[arg(short, long)]
    league: Option<String>,

    /// Output format, overriding the configured one
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured leagues with their names
    Leagues,
    /// Grade every team's draft
    Draft {
        #[arg(long, value_enum, default_value = "zscore")]
        grading: Grading,
    },
    /// Current power rankings
    Power {
        /// Show power scores for every week so far
        #[arg(long)]
        trend: bool,
    },
    /// Preview this week's matchups
    Preview {
        #[arg(short, long)]
        matchup: Option<u32>,
    },
    /// Summarize last week's results
    Summary {
        #[arg(short, long)]
        matchup: Option<u32>,
    },
    /// Grade every trade made this season
    Trades,
    /// Write the default configuration to a file
    InitConfig {
        #[arg(default_value = "config/league-analyzer.toml")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Grading {
    Zscore,
    Ranked,
}

impl From<Grading> for GradingStrategy {
    fn from(grading: Grading) -> Self {
        match grading {
            Grading::Zscore => GradingStrategy::ZScore,
            Grading::Ranked => GradingStrategy::Ranked,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Commands::InitConfig { path } = &cli.command {
        save_config(&ServiceConfig::default(), path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    initialize_logging_with_config(&config.logging)?;
    info!("Starting League Analyzer v{}", env!("CARGO_PKG_VERSION"));

    let format = cli.format.unwrap_or(config.output);
    let source = HttpLeagueDataSource::new(
        config.fetcher.clone(),
        config.scoring.power.default_season_length,
    )
    .context("Failed to build HTTP clients")?;
    let analyzer = LeagueAnalyzer::new(&source, config.scoring.clone());

    let output = match cli.command {
        Commands::Leagues => {
            let entries = analyzer.league_directory(&config.leagues).await;
            match format {
                OutputFormat::Json => to_json(&entries)?,
                OutputFormat::Table => render::leagues(&entries),
            }
        }
        Commands::Draft { grading } => {
            let league = config.resolve_league(cli.league.as_deref())?;
            let report = analyzer.draft_grades(&league, grading.into()).await;
            emit(format, "Draft Grades", &report, render::draft)?
        }
        Commands::Power { trend: false } => {
            let league = config.resolve_league(cli.league.as_deref())?;
            let report = analyzer.power_rankings(&league).await;
            emit(format, "Power Rankings", &report, render::power)?
        }
        Commands::Power { trend: true } => {
            let league = config.resolve_league(cli.league.as_deref())?;
            let report = analyzer.power_trend(&league).await;
            emit(format, "Power Score Trend", &report, |series| render::trend(series))?
        }
        Commands::Preview { matchup } => {
            let league = config.resolve_league(cli.league.as_deref())?;
            let report = analyzer.matchup_preview(&league, matchup).await;
            emit(format, "Matchup Preview", &report, render::matchup)?
        }
        Commands::Summary { matchup } => {
            let league = config.resolve_league(cli.league.as_deref())?;
            let report = analyzer.matchup_summary(&league, matchup).await;
            emit(format, "Matchup Summary", &report, render::matchup)?
        }
        Commands::Trades => {
            let league = config.resolve_league(cli.league.as_deref())?;
            let report = analyzer.trade_report(&league).await;
            emit(format, "Trade Grades", &report, render::trades)?
        }
        Commands::InitConfig { .. } => return Ok(()),
    };

    print!("{output}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn emit<T: Serialize>(
    format: OutputFormat,
    title: &str,
    report: &Report<T>,
    body: impl Fn(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Table => Ok(render::render_report(title, report, body)),
    }
}
