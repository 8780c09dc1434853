//! FantasyPros projection scraper
//!
//! Each position has its own page with a `table#data` whose last header row
//! names the columns. The player cell reads "Name TEAM"; the team suffix is
//! dropped so names line up with draft picks. Names are the only join key
//! between sources, so spelling drift (suffixes, punctuation) shows up as a
//! player with no projection rather than an error.

use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use reqwest::Client;
use scoring_engine::{PlayerProjection, Position};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Projection pages, in the order they are fetched
pub const PROJECTION_POSITIONS: [Position; 6] =
    [Position::QB, Position::RB, Position::WR, Position::TE, Position::K, Position::DST];

/// Scrapes season and weekly projections
pub struct ProjectionScraper {
    config: FetcherConfig,
    client: Client,
}

impl ProjectionScraper {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.http.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }

    /// Season projections for every position, concatenated. A position whose
    /// page fails is skipped.
    pub async fn season_projections(&self) -> Result<Vec<PlayerProjection>> {
        let mut projections = Vec::new();
        for position in PROJECTION_POSITIONS {
            match self.position_projections(position, None).await {
                Ok(rows) => projections.extend(rows),
                Err(e) => warn!("Skipping {} season projections: {}", position, e),
            }
        }
        info!("Scraped {} season projections", projections.len());
        Ok(projections)
    }

    /// Weekly projected points keyed by player name
    pub async fn weekly_projections(&self, week: u32) -> Result<HashMap<String, f64>> {
        let mut points = HashMap::new();
        for position in PROJECTION_POSITIONS {
            match self.position_projections(position, Some(week)).await {
                Ok(rows) => {
                    points.extend(rows.into_iter().map(|p| (p.name, p.projected_points)))
                }
                Err(e) => warn!("Skipping {} week {} projections: {}", position, week, e),
            }
        }
        info!("Scraped {} week {} projections", points.len(), week);
        Ok(points)
    }

    async fn position_projections(
        &self,
        position: Position,
        week: Option<u32>,
    ) -> Result<Vec<PlayerProjection>> {
        let url = self.config.projections_url(page_slug(position), week);
        debug!("Fetching projections from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Api { status: response.status().as_u16(), url });
        }
        let html = response.text().await?;
        parse_projection_table(&html, position)
    }
}

/// URL slug for a position's projection page
pub fn page_slug(position: Position) -> &'static str {
    match position {
        Position::QB => "qb",
        Position::RB => "rb",
        Position::WR => "wr",
        Position::TE => "te",
        Position::K => "k",
        Position::DST => "dst",
    }
}

/// Parse one projection page. Rows whose FPTS cell is missing or not a
/// number are dropped, not zero-filled.
pub fn parse_projection_table(html: &str, position: Position) -> Result<Vec<PlayerProjection>> {
    let document = Html::parse_document(html);
    let table_selector = selector("table#data")?;
    let header_row_selector = selector("thead tr")?;
    let header_cell_selector = selector("th")?;
    let body_row_selector = selector("tbody tr")?;
    let cell_selector = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| FetchError::scrape("projection table not found"))?;

    let header = table
        .select(&header_row_selector)
        .last()
        .ok_or_else(|| FetchError::scrape("projection table has no header"))?;
    let headers: Vec<String> = header.select(&header_cell_selector).map(cell_text).collect();
    let points_index = headers
        .iter()
        .rposition(|h| h.eq_ignore_ascii_case("FPTS"))
        .ok_or_else(|| FetchError::scrape("projection table has no FPTS column"))?;

    let mut projections = Vec::new();
    let mut dropped = 0usize;
    for row in table.select(&body_row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let Some(name_cell) = cells.first() else { continue };

        let name = split_player_team(&cell_text(*name_cell));
        if name.is_empty() {
            continue;
        }

        let points = cells
            .get(points_index)
            .map(|cell| cell_text(*cell).replace(',', ""))
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|p| p.is_finite());

        match points {
            Some(points) => projections.push(PlayerProjection::new(name, position, points)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("Dropped {} {} rows without usable points", dropped, position);
    }
    Ok(projections)
}

/// "Josh Allen BUF" -> "Josh Allen". Names without a team suffix (team
/// defenses, free agents) come back unchanged.
pub fn split_player_team(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.split_last() {
        Some((last, rest)) if !rest.is_empty() && is_team_code(last) => rest.join(" "),
        _ => tokens.join(" "),
    }
}

fn is_team_code(token: &str) -> bool {
    (2..=3).contains(&token.len()) && token.chars().all(|c| c.is_ascii_uppercase())
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FetchError::scrape(format!("invalid selector '{css}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QB_PAGE: &str = r#"
        <html><body>
        <table id="data">
          <thead>
            <tr><th></th><th colspan="5">PASSING</th><th colspan="3">RUSHING</th><th colspan="2">MISC</th></tr>
            <tr><th>Player</th><th>ATT</th><th>CMP</th><th>YDS</th><th>TDS</th><th>INTS</th>
                <th>ATT</th><th>YDS</th><th>TDS</th><th>FL</th><th>FPTS</th></tr>
          </thead>
          <tbody>
            <tr><td class="player-label"><a class="player-name">Josh Allen</a> BUF <a class="fp-player-link"></a></td>
                <td>540.1</td><td>345.2</td><td>4,012.5</td><td>28.9</td><td>12.1</td>
                <td>98.0</td><td>512.3</td><td>9.8</td><td>3.1</td><td>385.4</td></tr>
            <tr><td class="player-label"><a class="player-name">Jalen Hurts</a> PHI</td>
                <td>500</td><td>320</td><td>3,700</td><td>23</td><td>10</td>
                <td>140</td><td>650</td><td>12</td><td>2</td><td>1,012.0</td></tr>
            <tr><td class="player-label"><a class="player-name">Practice Squad</a> NYJ</td>
                <td></td><td></td><td></td><td></td><td></td>
                <td></td><td></td><td></td><td></td><td>-</td></tr>
            <tr><td class="player-label"><a class="player-name">Short Row</a> DAL</td><td>1</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_projection_table() {
        let projections = parse_projection_table(QB_PAGE, Position::QB).unwrap();

        assert_eq!(projections.len(), 2);
        assert_eq!(projections[0].name, "Josh Allen");
        assert_eq!(projections[0].position, Position::QB);
        assert_eq!(projections[0].projected_points, 385.4);
        assert_eq!(projections[1].name, "Jalen Hurts");
        assert_eq!(projections[1].projected_points, 1012.0);
    }

    #[test]
    fn test_missing_table_is_a_scrape_error() {
        let result = parse_projection_table("<html><body><p>Blocked</p></body></html>", Position::RB);
        assert!(matches!(result, Err(FetchError::Scrape { .. })));
    }

    #[test]
    fn test_missing_points_column_is_a_scrape_error() {
        let html = r#"<table id="data"><thead><tr><th>Player</th><th>YDS</th></tr></thead>
            <tbody><tr><td>Someone SEA</td><td>10</td></tr></tbody></table>"#;
        assert!(parse_projection_table(html, Position::WR).is_err());
    }

    #[test]
    fn test_split_player_team() {
        assert_eq!(split_player_team("Josh Allen BUF"), "Josh Allen");
        assert_eq!(split_player_team("  Amon-Ra St. Brown   DET "), "Amon-Ra St. Brown");
        assert_eq!(split_player_team("Buffalo Bills"), "Buffalo Bills");
        assert_eq!(split_player_team("Marvin Harrison Jr. ARI"), "Marvin Harrison Jr.");
        assert_eq!(split_player_team("DJ"), "DJ");
        assert_eq!(split_player_team(""), "");
    }

    #[test]
    fn test_page_slugs() {
        let slugs: Vec<&str> = PROJECTION_POSITIONS.iter().map(|p| page_slug(*p)).collect();
        assert_eq!(slugs, vec!["qb", "rb", "wr", "te", "k", "dst"]);
    }
}
