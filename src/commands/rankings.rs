//! Draft rankings from the hosted datastore: ADP comparison and dynasty values.

use serde::Serialize;
use tracing::info;

use super::common::{fmt_opt, print_json, CommandContext};
use crate::{
    analysis::{
        adp::{filter_adp, sort_adp, value_tier, AdpEntry},
        dynasty::{rank_dynasty, DynastyRank},
    },
    cli::types::{AdpSortKey, DynastyFormat, SortDirection},
    datastore::format_snapshot_date,
    Result,
};

#[derive(Debug)]
pub struct AdpParams {
    pub limit: usize,
    pub teams: u32,
    pub search: Option<String>,
    pub positions: Vec<String>,
    pub sort: AdpSortKey,
    pub direction: SortDirection,
    pub as_json: bool,
}

pub async fn handle_adp(ctx: &CommandContext, params: AdpParams) -> Result<()> {
    let ds = ctx.config.datastore()?;
    let rows = ds.top_adp(params.limit).await?;
    info!(rows = rows.len(), "fetched ADP comparison");

    let entries: Vec<AdpEntry> = rows
        .into_iter()
        .map(|r| AdpEntry::new(r, params.teams))
        .collect();
    let mut entries = filter_adp(entries, params.search.as_deref(), &params.positions);
    sort_adp(&mut entries, params.sort, params.direction);

    if params.as_json {
        return print_json(&entries);
    }

    println!(
        "{:<6} {:<26} {:<6} {:>6} {:>6} {:>6} {:>7}  {}",
        "Pick", "Player", "Pos", "NFC", "ESPN", "Slpr", "Value", "Tier"
    );
    for e in &entries {
        let tier = e.nfc_value.map(|v| value_tier(v).label()).unwrap_or("");
        println!(
            "{:<6} {:<26} {:<6} {:>6} {:>6} {:>6} {:>7}  {}",
            e.consensus_pick.as_deref().unwrap_or("-"),
            e.row.full_name.as_deref().unwrap_or("-"),
            e.row.nfc_positionrank.as_deref().unwrap_or("-"),
            fmt_opt(e.row.nfc_playerrank, 0),
            fmt_opt(e.row.espn_playerrank, 0),
            fmt_opt(e.row.sleeper_playerrank, 0),
            fmt_opt(e.nfc_value, 1),
            tier
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DynastyReport {
    /// `MM/DD/YYYY` of the snapshot, when known.
    pub as_of: Option<String>,
    pub format: String,
    pub players: Vec<DynastyRank>,
}

/// Narrow ranked dynasty rows by position and name, keeping the first `limit`.
pub fn filter_dynasty(
    ranks: Vec<DynastyRank>,
    positions: &[String],
    search: Option<&str>,
    limit: Option<usize>,
) -> Vec<DynastyRank> {
    let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    let filtered = ranks.into_iter().filter(|r| {
        (positions.is_empty() || positions.iter().any(|p| p.eq_ignore_ascii_case(&r.position)))
            && (needle.is_empty() || r.player_name.to_lowercase().contains(&needle))
    });
    match limit {
        Some(n) => filtered.take(n).collect(),
        None => filtered.collect(),
    }
}

#[derive(Debug)]
pub struct DynastyParams {
    pub format: DynastyFormat,
    pub positions: Vec<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub as_json: bool,
}

/// Dynasty values from the newest snapshot, ranked for one format.
pub async fn handle_dynasty(ctx: &CommandContext, params: DynastyParams) -> Result<()> {
    let ds = ctx.config.datastore()?;
    let latest = ds.latest_dynasty_date().await?;
    let rows = ds.dynasty_values(latest).await?;
    info!(rows = rows.len(), ?latest, "fetched dynasty values");

    let report = DynastyReport {
        as_of: latest.map(format_snapshot_date),
        format: params.format.to_string(),
        players: filter_dynasty(
            rank_dynasty(&rows, params.format),
            &params.positions,
            params.search.as_deref(),
            params.limit,
        ),
    };

    if params.as_json {
        return print_json(&report);
    }

    match &report.as_of {
        Some(d) => println!("{} dynasty values, data as of {}", report.format, d),
        None => println!("{} dynasty values", report.format),
    }
    for r in &report.players {
        println!(
            "{:>4} {:<6} {:<26} {:<4} {:>6.0} {:>5} {}",
            r.overall_rank,
            r.position_rank.as_deref().unwrap_or(r.position.as_str()),
            r.player_name,
            r.team,
            r.value,
            fmt_opt(r.age, 1),
            if r.rookie { "R" } else { "" }
        );
    }
    Ok(())
}
