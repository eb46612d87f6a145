//! Season leaderboard command

use futures::future::try_join;

use super::common::{print_json, CommandContext};
use crate::{
    analysis::leaderboard::{season_leaderboard, LeaderboardQuery},
    sleeper::cached::load_or_fetch_stats,
    Result, Season,
};

pub async fn handle_leaderboard(
    ctx: &CommandContext,
    season: Season,
    query: LeaderboardQuery,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let (directory, (stats, _)) = try_join(
        ctx.directory(refresh),
        load_or_fetch_stats(&ctx.sleeper, &ctx.cache, season, None, refresh),
    )
    .await?;

    let page = season_leaderboard(&directory, &stats, &query);

    if as_json {
        return print_json(&page);
    }

    println!(
        "{} {} leaderboard, page {}/{} ({} players)",
        season, query.format, page.page, page.total_pages, page.total
    );
    for e in &page.entries {
        let rank = e.rank.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
        let pos_rank = e
            .position_rank
            .map(|r| format!("{}{}", e.position, r))
            .unwrap_or_else(|| e.position.clone());
        println!(
            "{:>4} {:<26} {:<6} {:<4} {:>8.2} {:>4} {:>6.2}",
            rank,
            e.name,
            pos_rank,
            e.team,
            e.total_points,
            e.games_played,
            e.average_points_half_ppr
        );
    }
    Ok(())
}
