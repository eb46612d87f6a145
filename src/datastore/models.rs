//! Row types for the hosted datastore tables.
//!
//! The prop tables were loaded from scraped sportsbook pages, so numeric columns
//! arrive as numbers, numeric strings, `"N/A"` or `null` depending on the row.
//! The deserializers below fold all of those into `Option`s.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::cli::types::{LeagueId, PlayerId};

/// Number, numeric string, `"N/A"`, empty string or null -> `Option<f64>`.
pub fn de_prop_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(prop_value(&Value::deserialize(deserializer)?))
}

pub(crate) fn prop_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// American odds as text: numbers are rendered, `"N/A"`/empty become `None`.
pub fn de_odds<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
                None
            } else {
                Some(s.to_string())
            }
        }
        _ => None,
    })
}

/// Booleans stored as bools, 0/1 integers or strings.
pub fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    })
}

/// Player ids stored as either integers or text.
pub fn de_player_id<'de, D>(deserializer: D) -> Result<Option<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(PlayerId::new(n.to_string())),
        Value::String(s) if !s.trim().is_empty() => Some(PlayerId::new(s.trim())),
        _ => None,
    })
}

/// League ids stored as bigint or text.
pub fn de_league_id<'de, D>(deserializer: D) -> Result<LeagueId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(LeagueId::new(n.to_string())),
        Value::String(s) => Ok(LeagueId::new(s.trim())),
        other => Err(serde::de::Error::custom(format!(
            "expected league id, found {}",
            other
        ))),
    }
}

/// `date` or `timestamp` columns; only the calendar day is kept.
pub fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()),
        _ => None,
    })
}

/// `nfl_players` row embedded through a foreign key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NflPlayer {
    #[serde(default, deserialize_with = "de_player_id")]
    pub sleeper_id: Option<PlayerId>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub headshot_url: Option<String>,
}

/// `nfl_schedule` row embedded through a foreign key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScheduleGame {
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_completed: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default)]
    pub game_time: Option<String>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
}

/// One sportsbook prop row for a player and week (`weekly_props`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WeeklyPropRow {
    #[serde(default, deserialize_with = "de_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub week: Option<u16>,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passyardsou: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passtdsnumber: Option<f64>,
    #[serde(default, deserialize_with = "de_odds")]
    pub passtdsoverodds: Option<String>,
    #[serde(default, deserialize_with = "de_odds")]
    pub passtdsunderodds: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passattempts: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passcompletions: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub interceptions: Option<f64>,
    #[serde(default, deserialize_with = "de_odds")]
    pub interceptionsoverodds: Option<String>,
    #[serde(default, deserialize_with = "de_odds")]
    pub interceptionsunderodds: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushyardsou: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushattempts: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushtdsnumber: Option<f64>,
    #[serde(default, deserialize_with = "de_odds")]
    pub rushtdsoverodds: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receptionsou: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receivingyardsou: Option<f64>,
    #[serde(default)]
    pub nfl_players: Option<NflPlayer>,
    #[serde(default)]
    pub nfl_schedule: Option<ScheduleGame>,
}

impl WeeklyPropRow {
    /// Sleeper id of the embedded player record, which is what other sources join on.
    pub fn sleeper_id(&self) -> Option<&PlayerId> {
        self.nfl_players.as_ref()?.sleeper_id.as_ref()
    }
}

/// Actual production for one player and week (`player_weekly_stats`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WeeklyStatRow {
    #[serde(default, alias = "playerID", deserialize_with = "de_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passing_yards: Option<f64>,
    #[serde(default, alias = "passing_touchdowns", deserialize_with = "de_prop_value")]
    pub passing_tds: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub interceptions: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushing_yards: Option<f64>,
    #[serde(default, alias = "rushing_touchdowns", deserialize_with = "de_prop_value")]
    pub rushing_tds: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receiving_yards: Option<f64>,
    #[serde(default, alias = "receiving_touchdowns", deserialize_with = "de_prop_value")]
    pub receiving_tds: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receptions: Option<f64>,
}

/// Season-long sportsbook lines (`draftkings_2024_playerprops`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SeasonPropRow {
    #[serde(default, deserialize_with = "de_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passing_yards: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passing_tds: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receiving_yards: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receiving_tds: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushing_yards: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushing_tds: Option<f64>,
}

/// Season-to-date production (`player_seasonal_stats`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SeasonStatRow {
    #[serde(default, deserialize_with = "de_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passing_yards: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub passing_tds: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receiving_yards: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub receiving_tds: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushing_yards: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rushing_tds: Option<f64>,
    #[serde(default)]
    pub nfl_players: Option<NflPlayer>,
}

/// Touchdown scorer odds (`td_props`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TdPropRow {
    #[serde(default, alias = "player")]
    pub player_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default, alias = "date")]
    pub game_date: Option<String>,
    #[serde(default)]
    pub week: Option<u16>,
    #[serde(default, deserialize_with = "de_odds")]
    pub first_td_odds: Option<String>,
    #[serde(default, deserialize_with = "de_odds")]
    pub anytime_td_odds: Option<String>,
    #[serde(default, deserialize_with = "de_odds")]
    pub two_plus_td_odds: Option<String>,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_completed: bool,
    #[serde(default)]
    pub nfl_players: Option<NflPlayer>,
}

impl TdPropRow {
    pub fn sleeper_id(&self) -> Option<&PlayerId> {
        self.nfl_players.as_ref()?.sleeper_id.as_ref()
    }

    /// Position from the row, or from the embedded player record.
    pub fn effective_position(&self) -> Option<&str> {
        self.position
            .as_deref()
            .or_else(|| self.nfl_players.as_ref()?.position.as_deref())
    }

    pub fn effective_name(&self) -> Option<&str> {
        self.player_name
            .as_deref()
            .or_else(|| self.nfl_players.as_ref()?.player_name.as_deref())
    }
}

/// Cross-platform draft rankings (`adp_comparison_11`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AdpRow {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub sleeper_playerrank: Option<f64>,
    #[serde(default)]
    pub sleeper_positionrank: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub espn_playerrank: Option<f64>,
    #[serde(default)]
    pub espn_positionrank: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub nfc_playerrank: Option<f64>,
    #[serde(default)]
    pub nfc_positionrank: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub yahoo_playerrank: Option<f64>,
    #[serde(default)]
    pub yahoo_positionrank: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub consensus_playerrank: Option<f64>,
    #[serde(default)]
    pub consensus_positionrank: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub avg_playerrank: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub nfc_adp: Option<f64>,
    #[serde(default)]
    pub date_added: Option<String>,
}

/// Daily dynasty trade-value snapshot (`ktc_test`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DynastyValueRow {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub sf_value: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub rdrft_value: Option<f64>,
    #[serde(default, deserialize_with = "de_prop_value")]
    pub age: Option<f64>,
    #[serde(default)]
    pub rookie: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub date: Option<NaiveDate>,
}

/// A league a site user tracks, with its stakes (`leagues`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeagueRecord {
    #[serde(deserialize_with = "de_league_id")]
    pub id: LeagueId,
    pub user_uid: String,
    #[serde(default)]
    pub buy_in: Option<f64>,
    #[serde(default)]
    pub total_pot: Option<f64>,
}

/// Only the `date` column, for "data as of" lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRow {
    #[serde(default, deserialize_with = "de_opt_date")]
    pub date: Option<NaiveDate>,
}
