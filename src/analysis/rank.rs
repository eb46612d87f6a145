//! Where a user's rosters stand across their leagues.

use serde::Serialize;
use std::collections::HashMap;

use crate::{sleeper::types::LeagueRosters, LeagueId, PlayerId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueStanding {
    pub league_id: LeagueId,
    pub league_name: String,
    pub score: f64,
    /// 1-based position among the league's rosters.
    pub rank: usize,
    pub teams: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserRankReport {
    pub total_score: f64,
    pub total_rank: usize,
    pub leagues: Vec<LeagueStanding>,
}

/// Sum of the player values a roster holds; unknown players add nothing.
pub fn roster_score(players: &[PlayerId], values: &HashMap<PlayerId, f64>) -> f64 {
    players.iter().filter_map(|p| values.get(p)).sum()
}

/// Rank the user's roster by total player value in every league they play in.
pub fn user_rank(
    user_id: &UserId,
    leagues: &[LeagueRosters],
    values: &HashMap<PlayerId, f64>,
) -> UserRankReport {
    let mut report = UserRankReport::default();

    for lr in leagues {
        let mut scores: Vec<(Option<&UserId>, f64)> = lr
            .rosters
            .iter()
            .map(|r| (r.owner_id.as_ref(), roster_score(&r.players, values)))
            .collect();
        // Stable, so equal scores keep roster order.
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));

        let Some(pos) = scores.iter().position(|(owner, _)| *owner == Some(user_id)) else {
            continue;
        };
        let score = scores[pos].1;
        report.total_score += score;
        report.total_rank += pos + 1;
        report.leagues.push(LeagueStanding {
            league_id: lr.league.league_id.clone(),
            league_name: lr.league.name.clone(),
            score,
            rank: pos + 1,
            teams: scores.len(),
        });
    }
    report
}
