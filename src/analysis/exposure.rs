//! How many of a user's leagues roster each player.

use serde::Serialize;
use std::collections::HashMap;

use crate::{sleeper::types::LeagueRosters, LeagueId, PlayerId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueRef {
    pub name: String,
    pub id: LeagueId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerExposure {
    pub player_id: PlayerId,
    pub count: usize,
    /// Percent of leagues, rounded to 2 decimals.
    pub exposure: f64,
    pub leagues: Vec<LeagueRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExposureReport {
    pub total_leagues: usize,
    pub players: Vec<PlayerExposure>,
}

/// Exposure of every player on the user's rosters, highest first.
pub fn compute_exposure(user_id: &UserId, leagues: &[LeagueRosters]) -> ExposureReport {
    let total = leagues.len();
    if total == 0 {
        return ExposureReport::default();
    }

    let mut by_player: HashMap<&PlayerId, Vec<LeagueRef>> = HashMap::new();
    for lr in leagues {
        let Some(roster) = lr.rosters.iter().find(|r| r.is_owned_by(user_id)) else {
            continue;
        };
        for player in &roster.players {
            by_player.entry(player).or_default().push(LeagueRef {
                name: lr.league.name.clone(),
                id: lr.league.league_id.clone(),
            });
        }
    }

    let mut players: Vec<PlayerExposure> = by_player
        .into_iter()
        .map(|(id, leagues)| {
            let count = leagues.len();
            let pct = count as f64 / total as f64 * 100.0;
            PlayerExposure {
                player_id: id.clone(),
                count,
                exposure: (pct * 100.0).round() / 100.0,
                leagues,
            }
        })
        .collect();

    players.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    ExposureReport {
        total_leagues: total,
        players,
    }
}
