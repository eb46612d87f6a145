//! Cross-platform ADP comparison: consensus picks, value vs. ADP and ordering.

use serde::Serialize;
use std::cmp::Ordering;

use crate::{
    cli::types::{AdpSortKey, SortDirection},
    datastore::models::AdpRow,
};

/// Teams per draft round used for consensus picks.
pub const DEFAULT_TEAMS: u32 = 12;

/// `round.pick` for an overall rank, e.g. rank 13 of 12 teams is `2.01`.
pub fn consensus_pick(rank: Option<f64>, teams: u32) -> Option<String> {
    let rank = rank.filter(|r| *r > 0.0)?.round() as u32;
    let teams = teams.max(1);
    let round = rank.div_ceil(teams);
    let pick = match rank % teams {
        0 => teams,
        p => p,
    };
    Some(format!("{}.{:02}", round, pick))
}

/// Platform rank minus NFC ADP. Positive means the platform drafts later than
/// the market.
pub fn adp_value(platform_rank: Option<f64>, nfc_adp: Option<f64>) -> Option<f64> {
    Some(platform_rank? - nfc_adp?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueTier {
    StrongValue,
    GoodValue,
    SlightValue,
    Neutral,
    SlightReach,
    Reach,
    StrongReach,
}

impl ValueTier {
    pub fn label(&self) -> &'static str {
        match self {
            ValueTier::StrongValue => "strong value",
            ValueTier::GoodValue => "value",
            ValueTier::SlightValue => "slight value",
            ValueTier::Neutral => "-",
            ValueTier::SlightReach => "slight reach",
            ValueTier::Reach => "reach",
            ValueTier::StrongReach => "strong reach",
        }
    }
}

/// Band a value: `(0, 5]`, `(5, 10]`, `> 10` and the negative mirror.
pub fn value_tier(value: f64) -> ValueTier {
    match value {
        v if v > 10.0 => ValueTier::StrongValue,
        v if v > 5.0 => ValueTier::GoodValue,
        v if v > 0.0 => ValueTier::SlightValue,
        v if v >= -5.0 && v < 0.0 => ValueTier::SlightReach,
        v if v >= -10.0 && v < 0.0 => ValueTier::Reach,
        v if v < -10.0 => ValueTier::StrongReach,
        _ => ValueTier::Neutral,
    }
}

/// One ADP row with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdpEntry {
    #[serde(flatten)]
    pub row: AdpRow,
    pub consensus_pick: Option<String>,
    pub nfc_value: Option<f64>,
    pub espn_value: Option<f64>,
    pub sleeper_value: Option<f64>,
}

impl AdpEntry {
    pub fn new(row: AdpRow, teams: u32) -> Self {
        Self {
            consensus_pick: consensus_pick(row.consensus_playerrank, teams),
            nfc_value: adp_value(row.consensus_playerrank, row.nfc_adp),
            espn_value: adp_value(row.espn_playerrank, row.nfc_adp),
            sleeper_value: adp_value(row.sleeper_playerrank, row.nfc_adp),
            row,
        }
    }

    fn sort_value(&self, key: AdpSortKey) -> Option<f64> {
        match key {
            // Consensus pick orders the same as consensus rank.
            AdpSortKey::ConsensusPick | AdpSortKey::ConsensusRank => self.row.consensus_playerrank,
            AdpSortKey::NfcRank => self.row.nfc_playerrank,
            AdpSortKey::EspnRank => self.row.espn_playerrank,
            AdpSortKey::SleeperRank => self.row.sleeper_playerrank,
            AdpSortKey::NfcValue => self.nfc_value,
            AdpSortKey::EspnValue => self.espn_value,
            AdpSortKey::SleeperValue => self.sleeper_value,
        }
    }
}

/// Sort by `key`; rows missing the value go last in either direction.
pub fn sort_adp(entries: &mut [AdpEntry], key: AdpSortKey, direction: SortDirection) {
    entries.sort_by(|a, b| match (a.sort_value(key), b.sort_value(key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.total_cmp(&y),
            SortDirection::Descending => y.total_cmp(&x),
        },
    });
}

/// Name search plus position filter on the NFC position rank prefix (`WR12`).
pub fn filter_adp(entries: Vec<AdpEntry>, search: Option<&str>, positions: &[String]) -> Vec<AdpEntry> {
    let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    entries
        .into_iter()
        .filter(|e| {
            let name_ok = needle.is_empty()
                || e.row
                    .full_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle));
            let pos_ok = positions.is_empty()
                || e.row.nfc_positionrank.as_deref().is_some_and(|pr| {
                    positions
                        .iter()
                        .any(|p| pr.to_uppercase().starts_with(&p.to_uppercase()))
                });
            name_ok && pos_ok
        })
        .collect()
}
