//! Cache-backed loaders for the slower-changing Sleeper payloads, plus the
//! multi-league fetch most reports start from.
//!
//! The player directory is several megabytes, so it lives in SQLite rather
//! than the JSON cache and is refetched at most once a day.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::core::cache::{
    CacheManager, CacheStatus, LeagueCacheKey, NflStateCacheKey, StatsCacheKey,
};
use crate::sleeper::{
    http::SleeperClient,
    types::{League, LeagueRosters, NflState, PlayerDirectory, StatMap},
};
use crate::storage::{queries::DIRECTORY_MAX_AGE, PlayerDatabase};
use crate::{LeagueId, Result, Season, UserId, Week};

#[cfg(test)]
mod tests;

/// Current NFL week/season, cached for an hour.
pub async fn load_or_fetch_nfl_state(
    client: &SleeperClient,
    cache: &CacheManager,
    refresh: bool,
) -> Result<(NflState, CacheStatus)> {
    if !refresh {
        if let Some(state) = cache.nfl_state.get(&NflStateCacheKey) {
            return Ok((state, CacheStatus::Hit));
        }
    }

    let state = client.get_nfl_state().await?;
    cache.nfl_state.put(NflStateCacheKey, state.clone());
    Ok((state, fetched_status(refresh)))
}

/// Season totals (`week == None`) or one week of stat lines.
pub async fn load_or_fetch_stats(
    client: &SleeperClient,
    cache: &CacheManager,
    season: Season,
    week: Option<Week>,
    refresh: bool,
) -> Result<(StatMap, CacheStatus)> {
    let key = StatsCacheKey { season, week };
    if !refresh {
        if let Some(stats) = cache.stats.get(&key) {
            debug!(players = stats.len(), "stats cache hit");
            return Ok((stats, CacheStatus::Hit));
        }
    }

    let stats = match week {
        Some(w) => client.get_week_stats(season, w).await?,
        None => client.get_season_stats(season).await?,
    };
    cache.stats.put(key, stats.clone());
    Ok((stats, fetched_status(refresh)))
}

/// League details (name, scoring settings, roster slots).
pub async fn load_or_fetch_league(
    client: &SleeperClient,
    cache: &CacheManager,
    league_id: &LeagueId,
    refresh: bool,
) -> Result<(League, CacheStatus)> {
    let key = LeagueCacheKey {
        league_id: league_id.clone(),
    };
    if !refresh {
        if let Some(league) = cache.leagues.get(&key) {
            return Ok((league, CacheStatus::Hit));
        }
    }

    let league = client.get_league(league_id).await?;
    cache.leagues.put(key, league.clone());
    Ok((league, fetched_status(refresh)))
}

/// The player directory from SQLite, refetched when empty, older than a day,
/// or when `refresh` is set.
pub async fn load_or_refresh_directory(
    client: &SleeperClient,
    db: &mut PlayerDatabase,
    refresh: bool,
) -> Result<(PlayerDirectory, CacheStatus)> {
    if !refresh && db.player_count()? > 0 && !db.is_stale(DIRECTORY_MAX_AGE)? {
        let directory = db.get_directory()?;
        debug!(players = directory.len(), "player directory loaded from database");
        return Ok((directory, CacheStatus::Hit));
    }

    let directory = client.get_players().await?;
    let stored = db.replace_directory(&directory)?;
    info!(players = stored, "player directory refreshed");
    Ok((directory, fetched_status(refresh)))
}

fn fetched_status(refresh: bool) -> CacheStatus {
    if refresh {
        CacheStatus::Refreshed
    } else {
        CacheStatus::Miss
    }
}

/// Every league the user plays in for `season`, each with its rosters.
///
/// Roster fetches run concurrently. A league whose rosters cannot be fetched is
/// logged and skipped.
pub async fn fetch_leagues_with_rosters(
    client: &SleeperClient,
    user_id: &UserId,
    season: Season,
) -> Result<Vec<LeagueRosters>> {
    let leagues = client.get_user_leagues(user_id, season).await?;
    debug!(count = leagues.len(), %user_id, "fetched user leagues");

    let results = join_all(leagues.into_iter().map(|league| async move {
        let rosters = client.get_rosters(&league.league_id).await;
        (league, rosters)
    }))
    .await;

    Ok(results
        .into_iter()
        .filter_map(|(league, rosters)| match rosters {
            Ok(rosters) => Some(LeagueRosters { league, rosters }),
            Err(e) => {
                warn!(league_id = %league.league_id, error = %e, "skipping league; rosters unavailable");
                None
            }
        })
        .collect())
}
