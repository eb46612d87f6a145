//! Cross-league views of one user's rosters.

use std::collections::HashMap;

use tracing::info;

use super::common::{player_label, print_json, CommandContext};
use crate::{
    analysis::{exposure::compute_exposure, rank::user_rank},
    cli::types::ScoringFormat,
    sleeper::{
        cached::{fetch_leagues_with_rosters, load_or_fetch_stats},
        types::StatMap,
    },
    PlayerId, Result, Season,
};

/// How often each player appears across the user's leagues.
pub async fn handle_exposure(
    ctx: &CommandContext,
    username: Option<String>,
    season: Season,
    limit: Option<usize>,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let user = ctx.user(username).await?;
    let leagues = fetch_leagues_with_rosters(&ctx.sleeper, &user.user_id, season).await?;
    info!(leagues = leagues.len(), "computing exposure");

    let mut report = compute_exposure(&user.user_id, &leagues);
    if let Some(n) = limit {
        report.players.truncate(n);
    }

    if as_json {
        return print_json(&report);
    }

    if report.total_leagues == 0 {
        println!("No leagues found for {} in {}", user.user_id, season);
        return Ok(());
    }

    let directory = ctx.directory(refresh).await?;
    println!("Leagues: {}", report.total_leagues);
    for p in &report.players {
        println!(
            "{:<32} {:>3} {:>7.2}%",
            player_label(&directory, &p.player_id),
            p.count,
            p.exposure
        );
    }
    Ok(())
}

/// Season points per player under `format`'s pre-computed key.
pub fn season_values(stats: &StatMap, format: ScoringFormat) -> HashMap<PlayerId, f64> {
    let key = format.points_key();
    stats
        .iter()
        .filter_map(|(id, line)| line.get(&key).map(|pts| (id.clone(), *pts)))
        .collect()
}

/// The user's standing in each league by total season points rostered.
pub async fn handle_user_rank(
    ctx: &CommandContext,
    username: Option<String>,
    season: Season,
    format: ScoringFormat,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let user = ctx.user(username).await?;
    let leagues = fetch_leagues_with_rosters(&ctx.sleeper, &user.user_id, season).await?;
    let (stats, _) = load_or_fetch_stats(&ctx.sleeper, &ctx.cache, season, None, refresh).await?;

    let report = user_rank(&user.user_id, &leagues, &season_values(&stats, format));

    if as_json {
        return print_json(&report);
    }

    for s in &report.leagues {
        println!(
            "{:<32} {:>2}/{:<2} {:>9.2}",
            s.league_name, s.rank, s.teams, s.score
        );
    }
    println!(
        "Total: rank sum {} across {} leagues, {:.2} points",
        report.total_rank,
        report.leagues.len(),
        report.total_score
    );
    Ok(())
}
