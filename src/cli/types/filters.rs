//! Filter and sort option types for CLI commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fantasy scoring format.
///
/// Sleeper pre-computes points for each format, so the format also names the
/// points and rank keys on a stat line (`pts_ppr`, `rank_half_ppr`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ScoringFormat {
    /// One point per reception
    #[default]
    Ppr,
    /// Half a point per reception
    HalfPpr,
    /// No points for receptions
    Standard,
}

impl ScoringFormat {
    /// Classify a league by its reception coefficient.
    pub fn from_reception_points(rec: Option<f64>) -> Self {
        match rec {
            Some(r) if r == 1.0 => ScoringFormat::Ppr,
            Some(r) if r != 0.0 => ScoringFormat::HalfPpr,
            _ => ScoringFormat::Standard,
        }
    }

    /// Suffix shared by Sleeper's `pts_*` and `rank_*` keys.
    pub fn key_suffix(&self) -> &'static str {
        match self {
            ScoringFormat::Ppr => "ppr",
            ScoringFormat::HalfPpr => "half_ppr",
            ScoringFormat::Standard => "std",
        }
    }

    pub fn points_key(&self) -> String {
        format!("pts_{}", self.key_suffix())
    }

    pub fn rank_key(&self) -> String {
        format!("rank_{}", self.key_suffix())
    }

    pub fn position_rank_key(&self) -> String {
        format!("pos_rank_{}", self.key_suffix())
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoringFormat::Ppr => "PPR",
            ScoringFormat::HalfPpr => "Half PPR",
            ScoringFormat::Standard => "Standard",
        };
        write!(f, "{}", s)
    }
}

/// Sort direction for tabular output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Columns the ADP table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AdpSortKey {
    /// Consensus pick (`round.pick`)
    ConsensusPick,
    NfcRank,
    EspnRank,
    SleeperRank,
    ConsensusRank,
    /// Consensus rank minus NFC ADP
    NfcValue,
    /// ESPN rank minus NFC ADP
    EspnValue,
    /// Sleeper rank minus NFC ADP
    SleeperValue,
}

/// Dynasty value formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum DynastyFormat {
    /// Single-quarterback dynasty
    #[default]
    OneQb,
    /// Superflex dynasty
    Superflex,
    /// Redraft
    Redraft,
}

impl fmt::Display for DynastyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DynastyFormat::OneQb => "1QB",
            DynastyFormat::Superflex => "Superflex",
            DynastyFormat::Redraft => "Redraft",
        };
        write!(f, "{}", s)
    }
}

/// Columns the touchdown props table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TdSortKey {
    PlayerName,
    FirstTdOdds,
    AnytimeTdOdds,
    TwoPlusTdOdds,
    GameDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_format_from_reception_points() {
        assert_eq!(ScoringFormat::from_reception_points(Some(1.0)), ScoringFormat::Ppr);
        assert_eq!(ScoringFormat::from_reception_points(Some(0.5)), ScoringFormat::HalfPpr);
        assert_eq!(ScoringFormat::from_reception_points(Some(0.25)), ScoringFormat::HalfPpr);
        assert_eq!(ScoringFormat::from_reception_points(Some(0.0)), ScoringFormat::Standard);
        assert_eq!(ScoringFormat::from_reception_points(None), ScoringFormat::Standard);
    }

    #[test]
    fn test_scoring_format_keys() {
        assert_eq!(ScoringFormat::Ppr.points_key(), "pts_ppr");
        assert_eq!(ScoringFormat::HalfPpr.rank_key(), "rank_half_ppr");
        assert_eq!(ScoringFormat::Standard.position_rank_key(), "pos_rank_std");
    }
}
