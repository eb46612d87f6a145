//! Weekly head-to-head matchups.
//!
//! Sleeper returns one entry per roster; rosters sharing a `matchup_id` play
//! each other that week.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::sleeper::types::{LeagueUser, MatchupEntry, Roster};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupSide {
    pub roster_id: u32,
    pub team: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup {
    pub matchup_id: u32,
    pub home: MatchupSide,
    /// `None` when the opponent's entry is missing from the response.
    pub away: Option<MatchupSide>,
}

impl Matchup {
    /// Absolute point difference, when both sides are present.
    pub fn margin(&self) -> Option<f64> {
        self.away
            .as_ref()
            .map(|away| (self.home.points - away.points).abs())
    }

    pub fn involves(&self, roster_id: u32) -> bool {
        self.home.roster_id == roster_id
            || self.away.as_ref().is_some_and(|a| a.roster_id == roster_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekMatchups {
    /// Ordered by `matchup_id`.
    pub matchups: Vec<Matchup>,
    pub highest_scorer: Option<MatchupSide>,
    /// `matchup_id` of the smallest margin.
    pub closest_matchup: Option<u32>,
}

/// Roster id to the owner's display name, or `Team {roster_id}` for
/// unowned rosters and owners missing from `users`.
pub fn team_names(rosters: &[Roster], users: &[LeagueUser]) -> HashMap<u32, String> {
    let by_user: HashMap<_, _> = users
        .iter()
        .filter_map(|u| {
            let name = u.display_name.as_deref().filter(|n| !n.is_empty())?;
            Some((&u.user_id, name))
        })
        .collect();

    rosters
        .iter()
        .map(|r| {
            let name = r
                .owner_id
                .as_ref()
                .and_then(|id| by_user.get(id))
                .map(|n| n.to_string())
                .unwrap_or_else(|| default_team_name(r.roster_id));
            (r.roster_id, name)
        })
        .collect()
}

pub(crate) fn default_team_name(roster_id: u32) -> String {
    format!("Team {}", roster_id)
}

/// Group entries into pairs by `matchup_id`. Entries without one sit the
/// week out and are left out of every result.
pub fn pair_matchups(entries: &[MatchupEntry], names: &HashMap<u32, String>) -> WeekMatchups {
    let side = |e: &MatchupEntry| MatchupSide {
        roster_id: e.roster_id,
        team: names
            .get(&e.roster_id)
            .cloned()
            .unwrap_or_else(|| default_team_name(e.roster_id)),
        points: e.points,
    };

    let mut groups: BTreeMap<u32, Vec<&MatchupEntry>> = BTreeMap::new();
    for e in entries {
        if let Some(id) = e.matchup_id {
            groups.entry(id).or_default().push(e);
        }
    }

    let mut matchups = Vec::with_capacity(groups.len());
    for (matchup_id, mut group) in groups {
        group.sort_by_key(|e| e.roster_id);
        if group.len() > 2 {
            warn!(matchup_id, rosters = group.len(), "more than two rosters share a matchup");
        }
        matchups.push(Matchup {
            matchup_id,
            home: side(group[0]),
            away: group.get(1).copied().map(&side),
        });
    }

    let highest_scorer = matchups
        .iter()
        .flat_map(|m| std::iter::once(&m.home).chain(m.away.as_ref()))
        .fold(None::<&MatchupSide>, |best, s| match best {
            Some(b) if b.points >= s.points => Some(b),
            _ => Some(s),
        })
        .cloned();

    let closest_matchup = matchups
        .iter()
        .filter_map(|m| m.margin().map(|d| (m.matchup_id, d)))
        .fold(None::<(u32, f64)>, |best, (id, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((id, d)),
        })
        .map(|(id, _)| id);

    WeekMatchups {
        matchups,
        highest_scorer,
        closest_matchup,
    }
}
