//! Dynasty trade-value ordering.

use serde::Serialize;
use std::collections::HashMap;

use crate::{cli::types::DynastyFormat, datastore::models::DynastyValueRow};

/// Position code the value source uses for rookie draft picks.
pub const DRAFT_PICK_POSITION: &str = "PI";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynastyRank {
    pub overall_rank: usize,
    /// `WR4`; draft picks have none.
    pub position_rank: Option<String>,
    pub player_name: String,
    pub position: String,
    pub team: String,
    pub value: f64,
    pub age: Option<f64>,
    pub rookie: bool,
}

pub fn format_value(row: &DynastyValueRow, format: DynastyFormat) -> Option<f64> {
    match format {
        DynastyFormat::OneQb => row.value,
        DynastyFormat::Superflex => row.sf_value,
        DynastyFormat::Redraft => row.rdrft_value,
    }
}

/// Sort by the format's value (highest first) and number overall and by position.
/// Rows without a value for the format are dropped.
pub fn rank_dynasty(rows: &[DynastyValueRow], format: DynastyFormat) -> Vec<DynastyRank> {
    let mut valued: Vec<(&DynastyValueRow, f64)> = rows
        .iter()
        .filter_map(|r| format_value(r, format).filter(|v| *v > 0.0).map(|v| (r, v)))
        .collect();
    valued.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut seen: HashMap<String, usize> = HashMap::new();
    valued
        .into_iter()
        .enumerate()
        .map(|(i, (row, value))| {
            let position = row.position.clone().unwrap_or_default();
            let position_rank = (!position.is_empty() && position != DRAFT_PICK_POSITION).then(|| {
                let n = seen.entry(position.clone()).or_insert(0);
                *n += 1;
                format!("{}{}", position, n)
            });
            DynastyRank {
                overall_rank: i + 1,
                position_rank,
                player_name: row.player_name.clone().unwrap_or_default(),
                position,
                team: row.team.clone().unwrap_or_default(),
                value,
                age: row.age,
                rookie: row
                    .rookie
                    .as_deref()
                    .is_some_and(|r| matches!(r.trim().to_lowercase().as_str(), "yes" | "true" | "1")),
            }
        })
        .collect()
}
