//! Player prop commands: season progress, weekly results and touchdown odds.

use futures::future::try_join;
use tracing::info;

use super::common::{fmt_opt, print_json, CommandContext};
use crate::{
    analysis::props::{
        filter_td_props, merge_season_props, merge_weekly_props, sort_td_props,
        CategoryProgress, PropOutcome, SeasonPropProgress, TdFilter, WeeklyPropResult,
    },
    cli::types::{SortDirection, TdSortKey},
    Result, Week,
};

fn name_matches(name: &str, search: Option<&str>) -> bool {
    match search.map(str::trim) {
        None | Some("") => true,
        Some(q) => name.to_lowercase().contains(&q.to_lowercase()),
    }
}

fn position_matches(position: &str, positions: &[String]) -> bool {
    positions.is_empty() || positions.iter().any(|p| p.eq_ignore_ascii_case(position))
}

/// Keep rows whose name contains `search` and whose position is listed.
pub fn filter_season_progress(
    rows: Vec<SeasonPropProgress>,
    search: Option<&str>,
    positions: &[String],
) -> Vec<SeasonPropProgress> {
    rows.into_iter()
        .filter(|r| name_matches(&r.player_name, search) && position_matches(&r.position, positions))
        .collect()
}

pub fn filter_weekly_results(
    rows: Vec<WeeklyPropResult>,
    search: Option<&str>,
    positions: &[String],
) -> Vec<WeeklyPropResult> {
    rows.into_iter()
        .filter(|r| name_matches(&r.player_name, search) && position_matches(&r.position, positions))
        .collect()
}

fn progress_cell(c: &CategoryProgress) -> String {
    match c.line {
        Some(line) => format!(
            "{:.0}/{:.1} ({})",
            c.actual,
            line,
            c.progress
                .map(|p| format!("{:.0}%", p * 100.0))
                .unwrap_or_else(|| "-".into())
        ),
        None => format!("{:.0}/N/A", c.actual),
    }
}

fn outcome_cell(o: &PropOutcome) -> String {
    let mark = match o.hit {
        Some(true) => " ✓",
        Some(false) => " ✗",
        None => "",
    };
    format!("{:.0}/{}{}", o.actual, fmt_opt(o.line, 1), mark)
}

/// Season-long prop lines against season-to-date production.
pub async fn handle_season_props(
    ctx: &CommandContext,
    search: Option<String>,
    positions: Vec<String>,
    as_json: bool,
) -> Result<()> {
    let ds = ctx.config.datastore()?;
    let (props, stats) = try_join(ds.season_props(), ds.season_stats()).await?;
    info!(props = props.len(), stats = stats.len(), "merging season props");

    let rows = filter_season_progress(merge_season_props(&props, &stats), search.as_deref(), &positions);

    if as_json {
        return print_json(&rows);
    }

    for r in &rows {
        println!("{} ({}, {})", r.player_name, r.position, r.team);
        for (label, c) in [
            ("Pass Yds", &r.passing_yards),
            ("Pass TD", &r.passing_tds),
            ("Rush Yds", &r.rushing_yards),
            ("Rush TD", &r.rushing_tds),
            ("Rec Yds", &r.receiving_yards),
            ("Rec TD", &r.receiving_tds),
        ] {
            if c.line.is_some() || c.actual > 0.0 {
                println!("  {:<9} {}", label, progress_cell(c));
            }
        }
    }
    Ok(())
}

/// One week's prop lines with actual results and hit flags.
pub async fn handle_weekly_props(
    ctx: &CommandContext,
    week: Option<Week>,
    search: Option<String>,
    positions: Vec<String>,
    as_json: bool,
) -> Result<()> {
    let week = ctx.week_or_current(week).await?;
    let ds = ctx.config.datastore()?;
    let (props, stats) = try_join(ds.weekly_props(week), ds.weekly_stats(week)).await?;
    info!(%week, props = props.len(), stats = stats.len(), "merging weekly props");

    let rows = filter_weekly_results(merge_weekly_props(&props, &stats), search.as_deref(), &positions);

    if as_json {
        return print_json(&rows);
    }

    println!("Week {}", week);
    for r in &rows {
        let status = if r.game_completed {
            r.game_result.as_str()
        } else {
            "scheduled"
        };
        println!(
            "{} ({}, {}) vs {} on {} {} [{}]",
            r.player_name, r.position, r.team, r.opponent, r.game_date, r.game_time, status
        );
        for (label, o) in [
            ("Pass Yds", &r.passing_yards),
            ("Pass TD", &r.passing_tds),
            ("INT", &r.interceptions),
            ("Rush Yds", &r.rushing_yards),
            ("Rush TD", &r.rushing_tds),
            ("Rec", &r.receptions),
            ("Rec Yds", &r.receiving_yards),
        ] {
            if o.line.is_some() {
                println!("  {:<9} {}", label, outcome_cell(o));
            }
        }
    }
    Ok(())
}

/// Touchdown scorer odds for a week, filtered and optionally sorted.
pub async fn handle_td_props(
    ctx: &CommandContext,
    week: Option<Week>,
    filter: TdFilter,
    sort: Option<TdSortKey>,
    direction: SortDirection,
    as_json: bool,
) -> Result<()> {
    let week = ctx.week_or_current(week).await?;
    let ds = ctx.config.datastore()?;
    let mut rows = filter_td_props(ds.td_props(week).await?, &filter);
    if let Some(key) = sort {
        rows = sort_td_props(rows, key, direction);
    }

    if as_json {
        return print_json(&rows);
    }

    println!(
        "{:<26} {:<4} {:<4} {:>8} {:>8} {:>8}  {}",
        "Player", "Pos", "Team", "First", "Anytime", "2+", "Game"
    );
    for r in &rows {
        println!(
            "{:<26} {:<4} {:<4} {:>8} {:>8} {:>8}  {}",
            r.effective_name().unwrap_or("-"),
            r.effective_position().unwrap_or("-"),
            r.team.as_deref().unwrap_or("-"),
            r.first_td_odds.as_deref().unwrap_or("N/A"),
            r.anytime_td_odds.as_deref().unwrap_or("N/A"),
            r.two_plus_td_odds.as_deref().unwrap_or("N/A"),
            r.game.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
