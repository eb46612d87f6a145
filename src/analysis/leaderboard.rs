//! Season leaderboard built from Sleeper's season stat lines.
//!
//! The season stats payload carries both the fantasy totals (`pts_*`) and
//! Sleeper's own overall/position ranks (`rank_*`, `pos_rank_*`).

use serde::Serialize;
use std::cmp::Ordering;

use crate::{
    cli::types::{ScoringFormat, SortDirection},
    sleeper::types::{PlayerDirectory, StatMap},
    PlayerId, Position,
};

#[derive(Debug, Clone)]
pub struct LeaderboardQuery {
    pub format: ScoringFormat,
    pub position: Option<Position>,
    pub search: Option<String>,
    /// 1-based.
    pub page: usize,
    pub limit: usize,
    pub direction: SortDirection,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            format: ScoringFormat::default(),
            position: None,
            search: None,
            page: 1,
            limit: 25,
            direction: SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub team: String,
    pub rank: Option<u32>,
    pub position_rank: Option<u32>,
    pub total_points: f64,
    pub games_played: f64,
    pub total_points_half_ppr: f64,
    pub average_points_half_ppr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardPage {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub entries: Vec<LeaderboardEntry>,
}

fn rank_value(v: Option<&f64>) -> Option<u32> {
    v.filter(|r| r.is_finite() && **r > 0.0).map(|r| *r as u32)
}

/// Join the directory with season stat lines, filter, sort by the format's
/// overall rank (unranked last) and cut out one page.
pub fn season_leaderboard(
    directory: &PlayerDirectory,
    season: &StatMap,
    query: &LeaderboardQuery,
) -> LeaderboardPage {
    let rank_key = query.format.rank_key();
    let pos_rank_key = query.format.position_rank_key();
    let points_key = query.format.points_key();
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    let mut entries: Vec<LeaderboardEntry> = season
        .iter()
        .filter_map(|(id, line)| {
            let info = directory.get(id)?;
            let position = info.position.clone().unwrap_or_default();
            let team = info.team.clone().unwrap_or_default();
            let name = info.display_name().unwrap_or_else(|| id.to_string());

            if let Some(want) = query.position {
                if !position.eq_ignore_ascii_case(want.as_str()) {
                    return None;
                }
            }
            if !needle.is_empty()
                && !name.to_lowercase().contains(&needle)
                && !team.to_lowercase().contains(&needle)
            {
                return None;
            }

            let games = line.get("gp").copied().unwrap_or(0.0);
            let half = line.get("pts_half_ppr").copied().unwrap_or(0.0);
            Some(LeaderboardEntry {
                player_id: id.clone(),
                name,
                position,
                team,
                rank: rank_value(line.get(&rank_key)),
                position_rank: rank_value(line.get(&pos_rank_key)),
                total_points: line.get(&points_key).copied().unwrap_or(0.0),
                games_played: games,
                total_points_half_ppr: half,
                average_points_half_ppr: if games > 0.0 { half / games } else { 0.0 },
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        let ord = match (a.rank, b.rank) {
            (Some(x), Some(y)) => match query.direction {
                SortDirection::Ascending => x.cmp(&y),
                SortDirection::Descending => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        ord.then_with(|| a.player_id.cmp(&b.player_id))
    });

    let limit = query.limit.max(1);
    let page = query.page.max(1);
    let total = entries.len();
    let total_pages = total.div_ceil(limit);
    let entries = entries
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    LeaderboardPage {
        page,
        limit,
        total,
        total_pages,
        entries,
    }
}
