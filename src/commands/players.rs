//! Player directory maintenance

use super::common::CommandContext;
use crate::{
    sleeper::cached::load_or_refresh_directory,
    storage::queries::DIRECTORY_MAX_AGE,
    Result,
};

/// Refetch the player directory into the local database. Without `force`, a
/// fresh directory is left alone.
pub async fn handle_refresh_players(ctx: &CommandContext, force: bool, clear: bool) -> Result<()> {
    let mut db = ctx.player_db()?;

    if clear {
        println!("Clearing player database...");
        db.clear()?;
    }

    let was_stale = db.is_stale(DIRECTORY_MAX_AGE)?;
    let (directory, status) = load_or_refresh_directory(&ctx.sleeper, &mut db, force).await?;

    println!(
        "✓ {} players in {} ({:?}{})",
        directory.len(),
        ctx.player_db_path().display(),
        status,
        if was_stale { ", was stale" } else { "" }
    );
    Ok(())
}
