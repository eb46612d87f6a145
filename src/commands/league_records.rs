//! Saved league records (buy-in and pot) in the hosted datastore.

use tracing::info;

use super::common::{fmt_opt, print_json, CommandContext};
use crate::{datastore::LeagueRecord, LeagueId, Result};

pub async fn handle_save_league(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    user_uid: String,
    buy_in: Option<f64>,
    total_pot: Option<f64>,
    as_json: bool,
) -> Result<()> {
    let record = LeagueRecord {
        id: ctx.config.resolve_league_id(league_id)?,
        user_uid,
        buy_in,
        total_pot,
    };
    let saved = ctx.config.datastore()?.upsert_league(&record).await?;
    info!(league_id = %record.id, "league record saved");

    if as_json {
        return print_json(&saved);
    }
    println!("✓ Saved league {} for {}", record.id, record.user_uid);
    Ok(())
}

pub async fn handle_list_leagues(ctx: &CommandContext, user_uid: String, as_json: bool) -> Result<()> {
    let records = ctx.config.datastore()?.leagues_for_user(&user_uid).await?;

    if as_json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("No saved leagues for {}", user_uid);
        return Ok(());
    }
    println!("{:<22} {:>9} {:>10}", "League", "Buy-in", "Pot");
    for r in &records {
        println!(
            "{:<22} {:>9} {:>10}",
            r.id,
            fmt_opt(r.buy_in, 2),
            fmt_opt(r.total_pot, 2)
        );
    }
    Ok(())
}
