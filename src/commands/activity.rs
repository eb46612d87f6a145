//! In-season league activity: weekly matchups, the waiver wire and trades.

use futures::future::{try_join3, try_join_all};
use serde::Serialize;
use tracing::{info, warn};

use super::common::{print_json, CommandContext};
use crate::{
    analysis::{
        matchups::{pair_matchups, team_names, WeekMatchups},
        trades::{trade_summaries, TradeSummary},
        waivers::{waiver_report, WaiverPlayer, WaiverQuery},
    },
    sleeper::{cached::load_or_fetch_stats, types::Roster},
    LeagueId, Result, Season, Week,
};

/// Roster owned by `username` (or the env default), if one was asked for.
pub(crate) async fn user_roster_id(
    ctx: &CommandContext,
    username: Option<String>,
    rosters: &[Roster],
) -> Result<Option<u32>> {
    let Some(username) = username.or_else(|| ctx.config.username.clone()) else {
        return Ok(None);
    };
    let user = ctx.sleeper.get_user(&username).await?;
    let found = rosters
        .iter()
        .find(|r| r.is_owned_by(&user.user_id))
        .map(|r| r.roster_id);
    if found.is_none() {
        warn!(%username, "user has no roster in this league");
    }
    Ok(found)
}

#[derive(Debug, Serialize)]
pub struct MatchupsOutput {
    pub week: Week,
    pub user_roster_id: Option<u32>,
    #[serde(flatten)]
    pub matchups: WeekMatchups,
}

/// Head-to-head pairings for a week, with the user's matchup marked.
pub async fn handle_matchups(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    week: Option<Week>,
    username: Option<String>,
    as_json: bool,
) -> Result<()> {
    let league_id = ctx.config.resolve_league_id(league_id)?;
    let week = ctx.week_or_current(week).await?;
    let (entries, rosters, users) = try_join3(
        ctx.sleeper.get_matchups(&league_id, week),
        ctx.sleeper.get_rosters(&league_id),
        ctx.sleeper.get_league_users(&league_id),
    )
    .await?;
    let roster_id = user_roster_id(ctx, username, &rosters).await?;

    let matchups = pair_matchups(&entries, &team_names(&rosters, &users));
    info!(%league_id, %week, matchups = matchups.matchups.len(), "matchups paired");

    let out = MatchupsOutput {
        week,
        user_roster_id: roster_id,
        matchups,
    };
    if as_json {
        return print_json(&out);
    }

    println!("Week {} matchups", out.week);
    for m in &out.matchups.matchups {
        let mine = match out.user_roster_id {
            Some(r) if m.involves(r) => "*",
            _ => " ",
        };
        match &m.away {
            Some(away) => println!(
                "{} {:<24} {:>7.2}  vs  {:>7.2} {}",
                mine, m.home.team, m.home.points, away.points, away.team
            ),
            None => println!(
                "{} {:<24} {:>7.2}  (no opponent)",
                mine, m.home.team, m.home.points
            ),
        }
    }
    if let Some(top) = &out.matchups.highest_scorer {
        println!("Highest score: {} ({:.2})", top.team, top.points);
    }
    if let Some(m) = out
        .matchups
        .closest_matchup
        .and_then(|id| out.matchups.matchups.iter().find(|x| x.matchup_id == id))
    {
        if let (Some(away), Some(margin)) = (&m.away, m.margin()) {
            println!("Closest: {} vs {} ({:.2} apart)", m.home.team, away.team, margin);
        }
    }
    Ok(())
}

fn print_waiver_rows(players: &[WaiverPlayer]) {
    for (i, p) in players.iter().enumerate() {
        println!(
            "{:>3}. {:<26} {:<4} {:<4} {:>8.2}",
            i + 1,
            p.name,
            p.position,
            p.team,
            p.points
        );
    }
}

/// Best unrostered players in a league by season points.
pub async fn handle_waivers(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    season: Season,
    query: WaiverQuery,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let league_id = ctx.config.resolve_league_id(league_id)?;
    let (directory, (stats, _), rosters) = try_join3(
        ctx.directory(refresh),
        load_or_fetch_stats(&ctx.sleeper, &ctx.cache, season, None, refresh),
        ctx.sleeper.get_rosters(&league_id),
    )
    .await?;

    let report = waiver_report(&directory, &stats, &rosters, &query);
    info!(%league_id, available = report.available, "waiver wire ranked");

    if as_json {
        return print_json(&report);
    }

    println!(
        "{} {} waiver wire ({} available)",
        season, query.format, report.available
    );
    print_waiver_rows(&report.overall);
    for (pos, players) in &report.by_position {
        println!();
        println!("Top {}", pos);
        print_waiver_rows(players);
    }
    Ok(())
}

/// Trades in one week, or every week through the current one.
pub async fn handle_trades(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    week: Option<Week>,
    username: Option<String>,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let league_id = ctx.config.resolve_league_id(league_id)?;
    let weeks: Vec<Week> = match week {
        Some(w) => vec![w],
        None => {
            let current = ctx.week_or_current(None).await?;
            (1..=current.as_u16()).map(Week::new).collect()
        }
    };

    let (batches, rosters, users) = try_join3(
        try_join_all(
            weeks
                .iter()
                .map(|w| ctx.sleeper.get_transactions(&league_id, *w)),
        ),
        ctx.sleeper.get_rosters(&league_id),
        ctx.sleeper.get_league_users(&league_id),
    )
    .await?;
    let roster_id = user_roster_id(ctx, username, &rosters).await?;
    let transactions: Vec<_> = batches.into_iter().flatten().collect();

    let directory = ctx.directory(refresh).await?;
    let trades: Vec<TradeSummary> = trade_summaries(
        &transactions,
        roster_id,
        &directory,
        &team_names(&rosters, &users),
    );
    info!(%league_id, weeks = weeks.len(), trades = trades.len(), "trades collected");

    if as_json {
        return print_json(&trades);
    }

    if trades.is_empty() {
        println!("No trades found");
        return Ok(());
    }
    for t in &trades {
        let week = t
            .week
            .map(|w| format!("Week {}", w))
            .unwrap_or_else(|| "Week ?".into());
        println!("{} trade {}", week, t.transaction_id);
        for s in &t.sides {
            println!("  {}", s.team);
            for p in &s.players_received {
                println!("    + {}", p.name);
            }
            for p in &s.picks_received {
                println!(
                    "    + {} round {} pick (roster {})",
                    p.season, p.round, p.original_roster_id
                );
            }
            for p in &s.players_sent {
                println!("    - {}", p.name);
            }
            for p in &s.picks_sent {
                println!(
                    "    - {} round {} pick (roster {})",
                    p.season, p.round, p.original_roster_id
                );
            }
        }
    }
    Ok(())
}
