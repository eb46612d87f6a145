//! Prop-implied projections and league-scored fantasy points.

use futures::future::try_join;
use serde::Serialize;
use tracing::{info, warn};

use super::common::{player_name, print_json, CommandContext};
use crate::{
    analysis::projections::{weekly_projections, WeeklyProjection},
    cli::types::ScoringFormat,
    scoring::{league_points, ScoringRules},
    sleeper::{
        cached::{load_or_fetch_league, load_or_fetch_stats},
        types::Roster,
    },
    LeagueId, PlayerId, Position, Result, Season, UserId, Week,
};

#[derive(Debug)]
pub struct ProjectionParams {
    pub league_id: Option<LeagueId>,
    pub username: Option<String>,
    pub players: Vec<PlayerId>,
    pub week: Option<Week>,
    pub refresh: bool,
    pub as_json: bool,
}

/// Players to project: explicit ids win, then one owner's roster, then every
/// rostered player in the league.
pub fn projection_targets(
    explicit: &[PlayerId],
    rosters: &[Roster],
    owner: Option<&UserId>,
) -> Vec<PlayerId> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    let mut ids: Vec<PlayerId> = rosters
        .iter()
        .filter(|r| owner.map_or(true, |o| r.is_owned_by(o)))
        .flat_map(|r| r.players.iter().cloned())
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Projections sorted by projected points, highest first.
pub fn sorted_projections(
    projections: impl IntoIterator<Item = WeeklyProjection>,
) -> Vec<WeeklyProjection> {
    let mut out: Vec<WeeklyProjection> = projections.into_iter().collect();
    out.sort_by(|a, b| {
        b.projected_points
            .total_cmp(&a.projected_points)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    out
}

pub async fn handle_projections(ctx: &CommandContext, params: ProjectionParams) -> Result<()> {
    let league_id = ctx.config.resolve_league_id(params.league_id)?;
    let week = ctx.week_or_current(params.week).await?;

    let ((league, _), rosters) = try_join(
        load_or_fetch_league(&ctx.sleeper, &ctx.cache, &league_id, params.refresh),
        ctx.sleeper.get_rosters(&league_id),
    )
    .await?;

    let owner = match params.username {
        Some(name) => Some(ctx.sleeper.get_user(&name).await?.user_id),
        None => None,
    };
    let targets = projection_targets(&params.players, &rosters, owner.as_ref());
    if targets.is_empty() {
        warn!(%league_id, "no players to project");
    }

    let ds = ctx.config.datastore()?;
    let (props, td_props) = try_join(ds.weekly_props(week), ds.td_props(week)).await?;
    info!(%week, props = props.len(), td_props = td_props.len(), "projecting players");

    let rules = ScoringRules::from_league(&league);
    let projections = sorted_projections(
        weekly_projections(&targets, props, &td_props, &rules, week).into_values(),
    );

    if params.as_json {
        return print_json(&projections);
    }

    println!("{} week {} projections ({})", league.name, week, rules.format());
    for p in &projections {
        println!(
            "{:<26} {:<4} {:<4} vs {:<4} {:>7.2}",
            p.player_name, p.position, p.team, p.opponent, p.projected_points
        );
    }
    let missing = targets.len().saturating_sub(projections.len());
    if missing > 0 {
        println!("{} players had no props for week {}", missing, week);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ScoredPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub points: f64,
}

#[derive(Debug)]
pub struct ScoringParams {
    pub league_id: Option<LeagueId>,
    pub format: ScoringFormat,
    pub season: Season,
    pub week: Option<Week>,
    pub position: Option<Position>,
    pub limit: usize,
    pub refresh: bool,
    pub as_json: bool,
}

/// Fantasy points for the season (or one week) under a league's scoring, or
/// a preset format when no league is configured.
pub async fn handle_scoring(ctx: &CommandContext, params: ScoringParams) -> Result<()> {
    let league_id = params.league_id.or_else(|| ctx.config.league_id.clone());
    let rules = match &league_id {
        Some(id) => {
            let (league, _) = load_or_fetch_league(&ctx.sleeper, &ctx.cache, id, params.refresh).await?;
            ScoringRules::new(league.scoring_settings)
        }
        None => ScoringRules::for_format(params.format),
    };

    let (directory, (stats, _)) = try_join(
        ctx.directory(params.refresh),
        load_or_fetch_stats(&ctx.sleeper, &ctx.cache, params.season, params.week, params.refresh),
    )
    .await?;

    let mut scored: Vec<ScoredPlayer> = league_points(&stats, &directory, &rules)
        .into_iter()
        .filter_map(|(id, points)| {
            let info = directory.get(&id)?;
            let position = info.position.clone().unwrap_or_default();
            if let Some(want) = params.position {
                if position.parse::<Position>().ok() != Some(want) {
                    return None;
                }
            }
            Some(ScoredPlayer {
                name: player_name(&directory, &id).unwrap_or_else(|| id.to_string()),
                player_id: id,
                position,
                points,
            })
        })
        .collect();
    scored.sort_by(|a, b| {
        b.points
            .total_cmp(&a.points)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    scored.truncate(params.limit);

    if params.as_json {
        return print_json(&scored);
    }

    let span = match params.week {
        Some(w) => format!("week {}", w),
        None => "season".to_string(),
    };
    println!("{} {} points ({})", params.season, span, rules.format());
    for (i, p) in scored.iter().enumerate() {
        println!("{:>3}. {:<26} {:<4} {:>8.2}", i + 1, p.name, p.position, p.points);
    }
    Ok(())
}
