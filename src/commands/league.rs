//! League commands: settings summary, starters and lineup rankings.

use futures::future::try_join3;
use serde::Serialize;
use tracing::info;

use super::common::{
    owner_name, owner_names, player_label, player_name, print_json, CommandContext,
};
use crate::{
    analysis::lineup::{parse_slots, roster_rankings, PlayerPool},
    scoring::{league_points, ScoringRules},
    sleeper::cached::{load_or_fetch_league, load_or_fetch_stats},
    LeagueId, Result, Season, Week,
};

/// Fetch (or load cached) league details and print a summary.
pub async fn handle_league_data(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let league_id = ctx.config.resolve_league_id(league_id)?;
    let (league, status) = load_or_fetch_league(&ctx.sleeper, &ctx.cache, &league_id, refresh).await?;
    info!(%league_id, ?status, "league loaded");

    if as_json {
        return print_json(&league);
    }

    let rules = ScoringRules::new(league.scoring_settings.clone());
    println!("{} ({})", league.name, league.league_id);
    if let Some(season) = &league.season {
        println!("Season: {}", season);
    }
    if let Some(teams) = league.total_rosters {
        println!("Teams: {}", teams);
    }
    println!("Format: {}", rules.format());
    println!("Roster: {}", league.roster_positions.join(", "));
    println!("Scoring settings: {} items", league.scoring_settings.len());
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RosterStarters {
    pub roster_id: u32,
    pub owner: String,
    pub starters: Vec<String>,
}

/// Every roster's starters with player names and owner display names.
pub async fn handle_starters(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let league_id = ctx.config.resolve_league_id(league_id)?;
    let (rosters, users, directory) = try_join3(
        ctx.sleeper.get_rosters(&league_id),
        ctx.sleeper.get_league_users(&league_id),
        ctx.directory(refresh),
    )
    .await?;

    let names = owner_names(&users);
    let out: Vec<RosterStarters> = rosters
        .iter()
        .map(|r| RosterStarters {
            roster_id: r.roster_id,
            owner: owner_name(&names, r.owner_id.as_ref()),
            starters: r
                .starters
                .iter()
                .map(|id| player_label(&directory, id))
                .collect(),
        })
        .collect();

    if as_json {
        return print_json(&out);
    }

    for r in out {
        println!("{} (roster {})", r.owner, r.roster_id);
        for s in r.starters {
            println!("  {}", s);
        }
    }
    Ok(())
}

/// Best-ball lineups for every roster in a league, best total first.
pub async fn handle_roster_rank(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    season: Season,
    week: Option<Week>,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let league_id = ctx.config.resolve_league_id(league_id)?;
    let ((league, _), rosters, users) = try_join3(
        load_or_fetch_league(&ctx.sleeper, &ctx.cache, &league_id, refresh),
        ctx.sleeper.get_rosters(&league_id),
        ctx.sleeper.get_league_users(&league_id),
    )
    .await?;
    let directory = ctx.directory(refresh).await?;
    let (stats, _) = load_or_fetch_stats(&ctx.sleeper, &ctx.cache, season, week, refresh).await?;

    let rules = ScoringRules::new(league.scoring_settings.clone());
    let pool = PlayerPool::from_directory(&directory, league_points(&stats, &directory, &rules));
    let slots = parse_slots(&league.roster_positions);
    let lineups = roster_rankings(&rosters, &slots, &pool);

    if as_json {
        return print_json(&lineups);
    }

    let names = owner_names(&users);
    for (i, lineup) in lineups.iter().enumerate() {
        println!(
            "{:>2}. {:<24} {:>8.2}",
            i + 1,
            owner_name(&names, lineup.owner_id.as_ref()),
            lineup.total_points
        );
        for entry in &lineup.lineup {
            let who = entry
                .player_id
                .as_ref()
                .map(|id| player_name(&directory, id).unwrap_or_else(|| id.to_string()))
                .unwrap_or_else(|| "(empty)".to_string());
            println!(
                "      {:<5} {:<26} {:>7.2}  {}",
                entry.slot,
                who,
                entry.points,
                entry.slot_rank.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}
