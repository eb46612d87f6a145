//! Waiver wire: players no roster in the league holds, ranked by points.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::{
    cli::types::ScoringFormat,
    sleeper::types::{PlayerDirectory, Roster, StatMap},
    PlayerId, Position,
};

/// Positions that get their own top list.
pub const WAIVER_POSITIONS: [Position; 4] =
    [Position::QB, Position::RB, Position::WR, Position::TE];

#[derive(Debug, Clone)]
pub struct WaiverQuery {
    pub format: ScoringFormat,
    pub search: Option<String>,
    /// Empty means every position.
    pub positions: Vec<String>,
    pub overall_limit: usize,
    pub position_limit: usize,
}

impl Default for WaiverQuery {
    fn default() -> Self {
        Self {
            format: ScoringFormat::default(),
            search: None,
            positions: Vec::new(),
            overall_limit: 20,
            position_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaiverPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub team: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaiverReport {
    /// Players left after filtering, before the limits apply.
    pub available: usize,
    pub overall: Vec<WaiverPlayer>,
    pub by_position: BTreeMap<String, Vec<WaiverPlayer>>,
}

/// Every player id on any roster in the league.
pub fn rostered_ids(rosters: &[Roster]) -> HashSet<&PlayerId> {
    rosters.iter().flat_map(|r| r.players.iter()).collect()
}

/// Unrostered players who scored in `stats`, highest points first.
pub fn waiver_report(
    directory: &PlayerDirectory,
    stats: &StatMap,
    rosters: &[Roster],
    query: &WaiverQuery,
) -> WaiverReport {
    let rostered = rostered_ids(rosters);
    let points_key = query.format.points_key();
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    let mut players: Vec<WaiverPlayer> = stats
        .iter()
        .filter(|(id, _)| !rostered.contains(id))
        .filter_map(|(id, line)| {
            let points = line.get(&points_key).copied().filter(|p| *p > 0.0)?;
            let info = directory.get(id)?;
            let position = info.position.clone().unwrap_or_default();
            let name = info.display_name().unwrap_or_else(|| id.to_string());

            if !query.positions.is_empty()
                && !query
                    .positions
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(&position))
            {
                return None;
            }
            if !needle.is_empty() && !name.to_lowercase().contains(&needle) {
                return None;
            }

            Some(WaiverPlayer {
                player_id: id.clone(),
                name,
                position,
                team: info.team.clone().unwrap_or_else(|| "FA".to_string()),
                points,
            })
        })
        .collect();

    players.sort_by(|a, b| {
        b.points
            .total_cmp(&a.points)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let by_position = WAIVER_POSITIONS
        .iter()
        .map(|pos| {
            let top: Vec<WaiverPlayer> = players
                .iter()
                .filter(|p| p.position == pos.as_str())
                .take(query.position_limit)
                .cloned()
                .collect();
            (pos.to_string(), top)
        })
        .filter(|(_, top)| !top.is_empty())
        .collect();

    let available = players.len();
    players.truncate(query.overall_limit);

    WaiverReport {
        available,
        overall: players,
        by_position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sleeper::types::{PlayerInfo, StatLine};

    fn setup() -> (PlayerDirectory, StatMap, Vec<Roster>) {
        let mut dir = PlayerDirectory::new();
        let mut stats = StatMap::new();
        let players = [
            ("1", "Rostered Star", "WR", 300.0),
            ("2", "Waiver Runner", "RB", 120.0),
            ("3", "Bench Tight End", "TE", 80.0),
            ("4", "Spot Starter", "QB", 150.0),
            ("5", "Deep Sleeper", "WR", 95.0),
            ("6", "Never Played", "WR", 0.0),
            ("7", "Big Leg", "K", 110.0),
        ];
        for (id, name, pos, pts) in players {
            dir.insert(
                PlayerId::new(id),
                PlayerInfo {
                    full_name: Some(name.to_string()),
                    position: Some(pos.to_string()),
                    team: Some("DET".to_string()),
                    ..Default::default()
                },
            );
            let mut line = StatLine::new();
            line.insert("pts_ppr".to_string(), pts);
            line.insert("pts_std".to_string(), pts / 2.0);
            stats.insert(PlayerId::new(id), line);
        }
        let rosters = vec![Roster {
            roster_id: 1,
            owner_id: None,
            players: vec![PlayerId::new("1")],
            starters: vec![],
        }];
        (dir, stats, rosters)
    }

    fn ids(list: &[WaiverPlayer]) -> Vec<&str> {
        list.iter().map(|p| p.player_id.as_str()).collect()
    }

    #[test]
    fn test_excludes_rostered_and_scoreless_players() {
        let (dir, stats, rosters) = setup();
        let report = waiver_report(&dir, &stats, &rosters, &WaiverQuery::default());

        assert_eq!(report.available, 5);
        assert_eq!(ids(&report.overall), vec!["4", "2", "7", "5", "3"]);
    }

    #[test]
    fn test_position_lists_skip_kickers() {
        let (dir, stats, rosters) = setup();
        let report = waiver_report(&dir, &stats, &rosters, &WaiverQuery::default());

        let keys: Vec<_> = report.by_position.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["QB", "RB", "TE", "WR"]);
        assert_eq!(ids(&report.by_position["WR"]), vec!["5"]);
    }

    #[test]
    fn test_limits_and_filters() {
        let (dir, stats, rosters) = setup();
        let query = WaiverQuery {
            overall_limit: 2,
            position_limit: 1,
            ..Default::default()
        };
        let report = waiver_report(&dir, &stats, &rosters, &query);
        assert_eq!(ids(&report.overall), vec!["4", "2"]);
        assert_eq!(report.available, 5);

        let query = WaiverQuery {
            positions: vec!["wr".to_string(), "TE".to_string()],
            search: Some("sleep".to_string()),
            ..Default::default()
        };
        let report = waiver_report(&dir, &stats, &rosters, &query);
        assert_eq!(ids(&report.overall), vec!["5"]);
    }

    #[test]
    fn test_format_selects_points_key() {
        let (dir, stats, rosters) = setup();
        let query = WaiverQuery {
            format: ScoringFormat::Standard,
            ..Default::default()
        };
        let report = waiver_report(&dir, &stats, &rosters, &query);
        assert_eq!(report.overall[0].points, 75.0);
    }
}
