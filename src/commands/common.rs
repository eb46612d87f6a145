//! Shared resources and helpers for command handlers.

use std::{collections::HashMap, path::PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    config::Config,
    core::{CacheManager, CacheStatus},
    sleeper::{
        cached::{load_or_fetch_nfl_state, load_or_refresh_directory},
        types::{LeagueUser, PlayerDirectory, SleeperUser},
        SleeperClient,
    },
    storage::{PlayerDatabase, PLAYERS_DB_FILE},
    PlayerId, Result, UserId, Week,
};

/// Shown when a roster owner is not among the league's users.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Configuration, the Sleeper client and its caches, built once per command.
pub struct CommandContext {
    pub config: Config,
    pub sleeper: SleeperClient,
    pub cache: CacheManager,
}

impl CommandContext {
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env())
    }

    pub fn new(config: Config) -> Result<Self> {
        let cache = CacheManager::for_base_url(config.sleeper_base_url());
        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: Config, cache: CacheManager) -> Result<Self> {
        let sleeper = SleeperClient::new(config.sleeper_base_url())?;
        Ok(Self {
            config,
            sleeper,
            cache,
        })
    }

    /// Location of the player database for this API host.
    pub fn player_db_path(&self) -> PathBuf {
        self.cache.dir().join(PLAYERS_DB_FILE)
    }

    pub fn player_db(&self) -> Result<PlayerDatabase> {
        Ok(PlayerDatabase::open(&self.player_db_path())?)
    }

    /// Resolve `--username` (or the env default) to a Sleeper user.
    pub async fn user(&self, username: Option<String>) -> Result<SleeperUser> {
        let username = self.config.resolve_username(username)?;
        self.sleeper.get_user(&username).await
    }

    /// The local player directory, refreshed when stale.
    pub async fn directory(&self, refresh: bool) -> Result<PlayerDirectory> {
        let mut db = self.player_db()?;
        let (directory, status) = load_or_refresh_directory(&self.sleeper, &mut db, refresh).await?;
        debug!(?status, players = directory.len(), "player directory ready");
        Ok(directory)
    }

    /// `week` if given, otherwise the current NFL week.
    pub async fn week_or_current(&self, week: Option<Week>) -> Result<Week> {
        if let Some(w) = week {
            return Ok(w);
        }
        let (state, status) = load_or_fetch_nfl_state(&self.sleeper, &self.cache, false).await?;
        if status != CacheStatus::Hit {
            debug!(week = state.week, "fetched current NFL week");
        }
        Ok(Week::new(state.week.max(1)))
    }
}

/// Pretty-print any serializable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display name for a player id, or `None` when the directory has no entry.
pub fn player_name(directory: &PlayerDirectory, id: &PlayerId) -> Option<String> {
    directory.get(id).and_then(|p| p.display_name())
}

/// `Name (POS)`, or `Unknown Player (id)` for ids missing from the directory.
pub fn player_label(directory: &PlayerDirectory, id: &PlayerId) -> String {
    match directory.get(id) {
        Some(info) => {
            let name = info.display_name().unwrap_or_else(|| id.to_string());
            match info.position.as_deref() {
                Some(pos) if !pos.is_empty() => format!("{} ({})", name, pos),
                _ => name,
            }
        }
        None => format!("Unknown Player ({})", id),
    }
}

/// League member display names by user id.
pub fn owner_names(users: &[LeagueUser]) -> HashMap<UserId, String> {
    users
        .iter()
        .filter_map(|u| {
            let name = u.display_name.clone().filter(|n| !n.is_empty())?;
            Some((u.user_id.clone(), name))
        })
        .collect()
}

/// Owner display name, falling back to [`UNKNOWN_USER`].
pub fn owner_name(names: &HashMap<UserId, String>, owner: Option<&UserId>) -> String {
    match owner.and_then(|id| names.get(id)) {
        Some(name) => name.clone(),
        None => {
            if let Some(id) = owner {
                warn!(user_id = %id, "roster owner not found among league users");
            }
            UNKNOWN_USER.to_string()
        }
    }
}

/// `Some(x)` as a fixed-width number, `-` otherwise.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}
