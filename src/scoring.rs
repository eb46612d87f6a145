//! Fantasy points from scoring-rule coefficients.
//!
//! Stat keys follow Sleeper's naming (`pass_yd`, `rec`, `idp_sack`, ...). A
//! league's `scoring_settings` maps directly onto [`ScoringRules`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::{
    cli::types::ScoringFormat,
    sleeper::types::{League, PlayerDirectory, StatLine, StatMap},
    PlayerId, Position,
};


/// Stat keys that score individual defensive players.
pub const IDP_STAT_KEYS: [&str; 10] = [
    "idp_tkl_solo",
    "idp_tkl_ast",
    "idp_tkl_loss",
    "idp_sack",
    "idp_qb_hit",
    "idp_int",
    "idp_pass_def",
    "idp_fumble_rec",
    "idp_fumble_force",
    "bonus_tkl_10p",
];

/// Per-unit coefficient for each stat key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringRules(BTreeMap<String, f64>);

impl ScoringRules {
    pub fn new(coefficients: BTreeMap<String, f64>) -> Self {
        Self(coefficients)
    }

    fn preset(rec: f64) -> Self {
        Self(
            [
                ("pass_yd", 0.04),
                ("pass_td", 4.0),
                ("pass_int", -2.0),
                ("rush_yd", 0.1),
                ("rush_td", 6.0),
                ("rec_yd", 0.1),
                ("rec", rec),
                ("rec_td", 6.0),
                ("fum_lost", -2.0),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        )
    }

    pub fn ppr() -> Self {
        Self::preset(1.0)
    }

    pub fn half_ppr() -> Self {
        Self::preset(0.5)
    }

    pub fn standard() -> Self {
        Self::preset(0.0)
    }

    pub fn for_format(format: ScoringFormat) -> Self {
        match format {
            ScoringFormat::Ppr => Self::ppr(),
            ScoringFormat::HalfPpr => Self::half_ppr(),
            ScoringFormat::Standard => Self::standard(),
        }
    }

    /// Coefficients used for prop projections when a league omits a key.
    pub fn projection_defaults() -> Self {
        let mut rules = Self::half_ppr();
        rules.0.insert("fum_lost".to_string(), -1.0);
        rules
    }

    /// League rules with projection defaults filled in for missing keys.
    pub fn from_league(league: &League) -> Self {
        let mut rules = Self::new(league.scoring_settings.clone());
        for (key, value) in Self::projection_defaults().0 {
            rules.0.entry(key).or_insert(value);
        }
        rules
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Coefficient for `key`, or 0 when the league does not score it.
    pub fn coefficient(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn format(&self) -> ScoringFormat {
        ScoringFormat::from_reception_points(self.get("rec"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }
}

/// Sum of `value * coefficient` over stat keys present in both.
pub fn compute_points(stats: &StatLine, rules: &ScoringRules) -> f64 {
    stats
        .iter()
        .filter_map(|(key, value)| rules.get(key).map(|c| value * c))
        .sum()
}

/// Points from the IDP stat keys only.
pub fn idp_points(stats: &StatLine, rules: &ScoringRules) -> f64 {
    IDP_STAT_KEYS
        .iter()
        .map(|key| stats.get(*key).copied().unwrap_or(0.0) * rules.coefficient(key))
        .sum()
}

/// Points for one player the way a league would credit them.
///
/// IDP positions are scored from their raw stat keys; everyone else uses the
/// points Sleeper already computed for the league's reception format.
pub fn player_points(position: Option<Position>, stats: &StatLine, rules: &ScoringRules) -> f64 {
    match position {
        Some(p) if p.is_idp() => idp_points(stats, rules),
        _ => stats
            .get(&rules.format().points_key())
            .copied()
            .unwrap_or(0.0),
    }
}

/// Score every stat line in parallel with [`compute_points`].
pub fn score_players(stats: &StatMap, rules: &ScoringRules) -> HashMap<PlayerId, f64> {
    stats
        .par_iter()
        .map(|(id, line)| (id.clone(), compute_points(line, rules)))
        .collect()
}

/// Score every stat line in parallel with [`player_points`], reading positions
/// from the player directory.
pub fn league_points(
    stats: &StatMap,
    directory: &PlayerDirectory,
    rules: &ScoringRules,
) -> HashMap<PlayerId, f64> {
    stats
        .par_iter()
        .map(|(id, line)| {
            let position = directory
                .get(id)
                .and_then(|p| p.position.as_deref())
                .and_then(|p| p.parse::<Position>().ok());
            (id.clone(), player_points(position, line, rules))
        })
        .collect()
}
