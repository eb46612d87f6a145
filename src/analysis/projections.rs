//! Weekly fantasy projections implied by sportsbook prop lines.
//!
//! Yardage lines are taken at face value. Count lines (touchdowns,
//! interceptions) are shaded by the over price: with implied probability `p`
//! of the over, the expected count is `line * p + (line - 0.5) * (1 - p)`.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::props::{combine_duplicate_props, opponent_for};
use crate::{
    datastore::models::{TdPropRow, WeeklyPropRow},
    error::FflError,
    scoring::ScoringRules,
    PlayerId, Result, Week,
};

/// Parse `+150`, `-110`, `150` or `−110` (U+2212 minus).
pub fn parse_american_odds(odds: &str) -> Result<f64> {
    let trimmed = odds.trim();
    let (negative, digits) = match trimmed.strip_prefix('\u{2212}') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let value: f64 = digits
        .trim_start_matches('+')
        .parse()
        .map_err(|_| FflError::InvalidOdds {
            odds: odds.to_string(),
        })?;
    Ok(if negative { -value } else { value })
}

/// Probability a bet at `odds` wins, ignoring the vig.
pub fn implied_probability(odds: f64) -> f64 {
    if odds < 0.0 {
        odds.abs() / (odds.abs() + 100.0)
    } else if odds > 0.0 {
        100.0 / (odds + 100.0)
    } else {
        0.0
    }
}

/// Expected count for a half-point line given the over price.
pub fn expected_count(line: f64, over_odds: Option<f64>) -> f64 {
    match over_odds {
        Some(odds) => {
            let p = implied_probability(odds);
            line * p + (line - 0.5) * (1.0 - p)
        }
        None => line,
    }
}

/// Odds text to a number, logging and discarding anything unparseable.
fn odds_or_warn(odds: Option<&str>) -> Option<f64> {
    let raw = odds?;
    match parse_american_odds(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "ignoring odds");
            None
        }
    }
}

/// Expected count for an optional line. Odds without a line count for nothing.
fn projected_count(line: Option<f64>, over_odds: Option<&str>) -> f64 {
    match line {
        Some(l) => expected_count(l, odds_or_warn(over_odds)),
        None => 0.0,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PassingProjection {
    pub yards: f64,
    pub touchdowns: f64,
    pub interceptions: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RushingProjection {
    pub yards: f64,
    pub attempts: f64,
    pub touchdowns: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReceivingProjection {
    pub yards: f64,
    pub receptions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProjection {
    pub player_id: Option<PlayerId>,
    pub projected_points: f64,
    pub week: Week,
    pub player_name: String,
    pub position: String,
    pub team: String,
    pub opponent: String,
    pub game_date: String,
    pub game_time: String,
    pub passing: PassingProjection,
    pub rushing: RushingProjection,
    pub receiving: ReceivingProjection,
    pub anytime_td_odds: Option<String>,
}

/// Project one player's points from their prop row and anytime-TD price.
pub fn project_player(
    prop: &WeeklyPropRow,
    anytime_td_odds: Option<&str>,
    rules: &ScoringRules,
    week: Week,
) -> WeeklyProjection {
    let line = |v: Option<f64>| v.unwrap_or(0.0);

    let pass_yd = line(prop.passyardsou);
    let pass_td = line(prop.passtdsnumber);
    let ints = line(prop.interceptions);
    let rush_yd = line(prop.rushyardsou);
    let rush_td = line(prop.rushtdsnumber);
    let rec_yd = line(prop.receivingyardsou);
    let receptions = match prop.receptionsou {
        Some(r) => r,
        None if rec_yd > 0.0 => 1.0,
        None => 0.0,
    };

    let exp_pass_td = projected_count(prop.passtdsnumber, prop.passtdsoverodds.as_deref());
    let exp_ints = projected_count(prop.interceptions, prop.interceptionsoverodds.as_deref());
    let exp_rush_td = projected_count(prop.rushtdsnumber, prop.rushtdsoverodds.as_deref());
    let td_probability = odds_or_warn(anytime_td_odds)
        .map(implied_probability)
        .unwrap_or(0.0);

    // pass_int carries its own (negative) sign.
    let points = pass_yd * rules.coefficient("pass_yd")
        + exp_pass_td * rules.coefficient("pass_td")
        + exp_ints * rules.coefficient("pass_int")
        + rush_yd * rules.coefficient("rush_yd")
        + exp_rush_td * rules.coefficient("rush_td")
        + rec_yd * rules.coefficient("rec_yd")
        + receptions * rules.coefficient("rec")
        + td_probability * rules.coefficient("rec_td");

    let player = prop.nfl_players.as_ref();
    let game = prop.nfl_schedule.as_ref();
    let team = player.and_then(|p| p.team.clone());
    let opponent = match (&team, game) {
        (Some(t), Some(_)) => opponent_for(prop, t),
        _ => "Unknown".to_string(),
    };

    WeeklyProjection {
        player_id: prop.sleeper_id().cloned(),
        projected_points: round2(points),
        week,
        player_name: player
            .and_then(|p| p.player_name.clone())
            .unwrap_or_else(|| "Unknown Player".to_string()),
        position: player
            .and_then(|p| p.position.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        team: team.unwrap_or_else(|| "Unknown".to_string()),
        opponent,
        game_date: game
            .and_then(|g| g.game_date.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        game_time: game
            .and_then(|g| g.game_time.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        passing: PassingProjection {
            yards: pass_yd,
            touchdowns: pass_td,
            interceptions: ints,
        },
        rushing: RushingProjection {
            yards: rush_yd,
            attempts: line(prop.rushattempts),
            touchdowns: rush_td,
        },
        receiving: ReceivingProjection {
            yards: rec_yd,
            receptions,
        },
        anytime_td_odds: anytime_td_odds.map(str::to_string),
    }
}

/// Projections for the requested players, keyed by Sleeper id.
///
/// Duplicate prop rows are merged first; anytime-TD odds are attached by
/// Sleeper id from the touchdown props.
pub fn weekly_projections(
    player_ids: &[PlayerId],
    props: Vec<WeeklyPropRow>,
    td_props: &[TdPropRow],
    rules: &ScoringRules,
    week: Week,
) -> HashMap<PlayerId, WeeklyProjection> {
    let wanted: HashSet<&PlayerId> = player_ids.iter().collect();
    let td_odds: HashMap<&PlayerId, &str> = td_props
        .iter()
        .filter_map(|td| Some((td.sleeper_id()?, td.anytime_td_odds.as_deref()?)))
        .collect();

    let projections: HashMap<PlayerId, WeeklyProjection> = combine_duplicate_props(props)
        .iter()
        .filter_map(|prop| {
            let id = prop.sleeper_id()?;
            if !wanted.contains(id) {
                return None;
            }
            let odds = td_odds.get(id).copied();
            Some((id.clone(), project_player(prop, odds, rules, week)))
        })
        .collect();

    debug!(
        requested = player_ids.len(),
        projected = projections.len(),
        %week,
        "weekly projections"
    );
    projections
}
