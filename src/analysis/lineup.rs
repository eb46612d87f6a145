//! Best-ball lineup optimization and slot-by-slot rankings across a league.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::{
    cli::types::RosterSlot,
    sleeper::types::{PlayerDirectory, Roster},
    PlayerId, Position, UserId,
};

#[cfg(test)]
mod tests;

/// Positions and points for every player that may appear in a lineup.
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    pub positions: HashMap<PlayerId, Position>,
    pub points: HashMap<PlayerId, f64>,
}

impl PlayerPool {
    /// Positions come from the player directory; players with no recognised
    /// position never start.
    pub fn from_directory(directory: &PlayerDirectory, points: HashMap<PlayerId, f64>) -> Self {
        let positions = directory
            .iter()
            .filter_map(|(id, info)| {
                let pos = info.position.as_deref()?.parse::<Position>().ok()?;
                Some((id.clone(), pos))
            })
            .collect();
        Self { positions, points }
    }

    pub fn points(&self, id: &PlayerId) -> f64 {
        self.points.get(id).copied().unwrap_or(0.0)
    }
}

/// Compact slot label for tables (`SFLX`, `IDPF`, `RFLX`).
pub fn format_slot(slot: &RosterSlot) -> &'static str {
    slot.short_name()
}

/// Parse a league's `roster_positions`, dropping anything unrecognised.
pub fn parse_slots(roster_positions: &[String]) -> Vec<RosterSlot> {
    roster_positions
        .iter()
        .filter_map(|s| s.parse::<RosterSlot>().ok())
        .collect()
}

/// Label each slot by its base name and occurrence: `QB1`, `RB1`, `RB2`, `FLEX1`.
pub fn slot_labels(slots: &[RosterSlot]) -> Vec<String> {
    let mut seen: HashMap<&'static str, usize> = HashMap::new();
    slots
        .iter()
        .map(|slot| {
            let base = slot.base_name();
            let n = seen.entry(base).or_insert(0);
            *n += 1;
            format!("{}{}", base, n)
        })
        .collect()
}

/// Highest-scoring legal lineup, one entry per slot.
///
/// Players are taken in points order; fixed slots are filled before any flex
/// slot, and reserve slots stay empty.
pub fn optimize_lineup(players: &[PlayerId], slots: &[RosterSlot], pool: &PlayerPool) -> Vec<Option<PlayerId>> {
    let mut remaining: Vec<&PlayerId> = players.iter().collect();
    remaining.sort_by(|a, b| pool.points(b).total_cmp(&pool.points(a)));

    let mut lineup: Vec<Option<PlayerId>> = vec![None; slots.len()];
    let mut fill = |index: usize, slot: &RosterSlot, remaining: &mut Vec<&PlayerId>| {
        let pick = remaining.iter().position(|id| {
            pool.positions
                .get(*id)
                .is_some_and(|pos| slot.accepts(*pos))
        });
        if let Some(i) = pick {
            lineup[index] = Some(remaining.remove(i).clone());
        }
    };

    for (i, slot) in slots.iter().enumerate() {
        if !slot.is_flex() && !slot.is_reserve() {
            fill(i, slot, &mut remaining);
        }
    }
    for (i, slot) in slots.iter().enumerate() {
        if slot.is_flex() {
            fill(i, slot, &mut remaining);
        }
    }
    lineup
}

/// Where one starter stands among everyone starting in the same labelled slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotRanking {
    pub player_id: PlayerId,
    pub roster_id: u32,
    pub points: f64,
    pub rank: usize,
    pub total: usize,
}

/// Optimize every roster and rank starters within each slot label.
pub fn position_rankings(
    rosters: &[Roster],
    slots: &[RosterSlot],
    pool: &PlayerPool,
) -> BTreeMap<String, Vec<SlotRanking>> {
    let labels = slot_labels(slots);
    let mut by_label: BTreeMap<String, Vec<(PlayerId, u32, f64)>> = BTreeMap::new();

    for roster in rosters {
        for (i, starter) in optimize_lineup(&roster.players, slots, pool).into_iter().enumerate() {
            if let Some(id) = starter {
                let points = pool.points(&id);
                by_label
                    .entry(labels[i].clone())
                    .or_default()
                    .push((id, roster.roster_id, points));
            }
        }
    }

    by_label
        .into_iter()
        .map(|(label, mut entries)| {
            entries.sort_by(|a, b| b.2.total_cmp(&a.2));
            let total = entries.len();
            let ranked = entries
                .into_iter()
                .enumerate()
                .map(|(i, (player_id, roster_id, points))| SlotRanking {
                    player_id,
                    roster_id,
                    points,
                    rank: i + 1,
                    total,
                })
                .collect();
            (label, ranked)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupEntry {
    pub slot: String,
    pub label: String,
    pub player_id: Option<PlayerId>,
    pub points: f64,
    /// `rank/total` among starters in the same slot label.
    pub slot_rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterLineup {
    pub roster_id: u32,
    pub owner_id: Option<UserId>,
    pub total_points: f64,
    pub lineup: Vec<LineupEntry>,
}

/// Every roster's optimized lineup with slot ranks, best total first.
pub fn roster_rankings(rosters: &[Roster], slots: &[RosterSlot], pool: &PlayerPool) -> Vec<RosterLineup> {
    let labels = slot_labels(slots);
    let rankings = position_rankings(rosters, slots, pool);

    let mut out: Vec<RosterLineup> = rosters
        .iter()
        .map(|roster| {
            let lineup: Vec<LineupEntry> = optimize_lineup(&roster.players, slots, pool)
                .into_iter()
                .zip(slots.iter().zip(labels.iter()))
                .filter(|(_, (slot, _))| !slot.is_reserve())
                .map(|(player_id, (slot, label))| {
                    let slot_rank = player_id.as_ref().and_then(|id| {
                        rankings
                            .get(label)?
                            .iter()
                            .find(|r| &r.player_id == id && r.roster_id == roster.roster_id)
                            .map(|r| format!("{}/{}", r.rank, r.total))
                    });
                    LineupEntry {
                        slot: format_slot(slot).to_string(),
                        label: label.clone(),
                        points: player_id.as_ref().map(|id| pool.points(id)).unwrap_or(0.0),
                        player_id,
                        slot_rank,
                    }
                })
                .collect();
            RosterLineup {
                roster_id: roster.roster_id,
                owner_id: roster.owner_id.clone(),
                total_points: lineup.iter().map(|e| e.points).sum(),
                lineup,
            }
        })
        .collect();

    out.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));
    out
}
