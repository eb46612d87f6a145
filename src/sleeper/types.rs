//! Response types for the Sleeper API.

use crate::cli::types::{LeagueId, PlayerId, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[cfg(test)]
mod tests;

/// Per-player stat line: stat key (`pass_yd`, `pts_ppr`, `rank_ppr`, ...) to value.
pub type StatLine = BTreeMap<String, f64>;

/// Player id to stat line, as returned by the `stats/nfl` endpoints.
pub type StatMap = HashMap<PlayerId, StatLine>;

/// Player id to directory entry, as returned by `players/nfl`.
pub type PlayerDirectory = HashMap<PlayerId, PlayerInfo>;

/// Sleeper sends `null` instead of `[]` for empty rosters.
fn de_null_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scoring coefficients arrive as JSON numbers, but a few leagues carry stray
/// non-numeric entries; those are dropped.
fn de_numeric_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, v)| v.as_f64().map(|n| (k, n)))
        .collect())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SleeperUser {
    pub user_id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// League summary as returned by `league/{id}` and `user/{id}/leagues/...`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct League {
    pub league_id: LeagueId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub total_rosters: Option<u32>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub roster_positions: Vec<String>,
    #[serde(default, deserialize_with = "de_numeric_map")]
    pub scoring_settings: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Roster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub players: Vec<PlayerId>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub starters: Vec<PlayerId>,
}

impl Roster {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id.as_ref() == Some(user_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeagueUserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// Member of a league, from `league/{id}/users`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueUser {
    pub user_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub metadata: Option<LeagueUserMetadata>,
}

/// Player directory entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

impl PlayerInfo {
    /// Full name, falling back to `first last` (team defenses have no `full_name`).
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.full_name.as_ref().filter(|n| !n.is_empty()) {
            return Some(name.clone());
        }
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
            (Some(f), None) => Some(f.clone()),
            (None, Some(l)) => Some(l.clone()),
            (None, None) => None,
        }
    }
}

/// Current NFL calendar state from `state/nfl`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NflState {
    pub week: u16,
    #[serde(default)]
    pub display_week: Option<u16>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub season_type: Option<String>,
}

/// One roster's side of a week, from `league/{id}/matchups/{week}`.
///
/// Rosters sharing a `matchup_id` play each other; `null` means no opponent
/// that week.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchupEntry {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default, deserialize_with = "de_null_f64")]
    pub points: f64,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub starters: Vec<PlayerId>,
}

fn de_null_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn de_null_map<'de, D>(deserializer: D) -> Result<HashMap<PlayerId, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<PlayerId, u32>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A traded draft pick. `owner_id` is the receiving roster.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DraftPick {
    pub season: String,
    pub round: u32,
    /// Roster the pick originally belonged to.
    pub roster_id: u32,
    pub owner_id: u32,
    #[serde(default)]
    pub previous_owner_id: Option<u32>,
}

/// League transaction from `league/{id}/transactions/{week}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transaction {
    pub transaction_id: String,
    /// `trade`, `waiver` or `free_agent`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Week the transaction was processed in.
    #[serde(default)]
    pub leg: Option<u16>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub roster_ids: Vec<u32>,
    /// Player id to receiving roster.
    #[serde(default, deserialize_with = "de_null_map")]
    pub adds: HashMap<PlayerId, u32>,
    /// Player id to the roster that gave the player up.
    #[serde(default, deserialize_with = "de_null_map")]
    pub drops: HashMap<PlayerId, u32>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub draft_picks: Vec<DraftPick>,
}

impl Transaction {
    pub fn is_trade(&self) -> bool {
        self.kind == "trade"
    }
}

/// Convert the raw `stats/nfl` payload into a [`StatMap`].
///
/// The season endpoint returns an object keyed by player id; the weekly endpoint
/// may return either that or an array of `{player_id, stats}` objects. Non-numeric
/// values are skipped.
pub fn parse_stat_map(raw: &Value) -> StatMap {
    fn numeric_line(obj: &serde_json::Map<String, Value>) -> StatLine {
        obj.iter()
            .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
            .collect()
    }

    match raw {
        Value::Object(by_id) => by_id
            .iter()
            .filter_map(|(id, line)| {
                line.as_object()
                    .map(|obj| (PlayerId::new(id.as_str()), numeric_line(obj)))
            })
            .collect(),
        Value::Array(rows) => rows
            .iter()
            .filter_map(|row| {
                let id = row.get("player_id")?.as_str()?;
                let stats = row.get("stats")?.as_object()?;
                Some((PlayerId::new(id), numeric_line(stats)))
            })
            .collect(),
        _ => StatMap::new(),
    }
}

/// A league bundled with its rosters, the unit most multi-league reports work on.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueRosters {
    pub league: League,
    pub rosters: Vec<Roster>,
}
