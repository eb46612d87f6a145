//! Sleeper API client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    cli::types::{LeagueId, Season, UserId, Week},
    core::build_client,
    error::FflError,
    sleeper::types::{
        parse_stat_map, League, LeagueUser, MatchupEntry, NflState, PlayerDirectory, Roster,
        SleeperUser, StatMap, Transaction,
    },
    Result,
};


/// Base path for the Sleeper v1 API.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

const SPORT: &str = "nfl";

/// Thin typed wrapper over the public Sleeper endpoints.
#[derive(Debug, Clone)]
pub struct SleeperClient {
    client: Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(build_client()?, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_value(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, ?query, "GET sleeper");

        let res = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get_value(path, &[]).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Look up a user by username (or id). Sleeper answers unknown names with `null`.
    pub async fn get_user(&self, username: &str) -> Result<SleeperUser> {
        let value = self.get_value(&format!("user/{}", username), &[]).await?;
        if value.is_null() {
            return Err(FflError::UserNotFound {
                username: username.to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_user_leagues(&self, user_id: &UserId, season: Season) -> Result<Vec<League>> {
        let value = self
            .get_value(&format!("user/{}/leagues/{}/{}", user_id, SPORT, season), &[])
            .await?;
        if !value.is_array() {
            // Sleeper returns `null` for users with no leagues that season.
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_league(&self, league_id: &LeagueId) -> Result<League> {
        self.get_json(&format!("league/{}", league_id)).await
    }

    pub async fn get_rosters(&self, league_id: &LeagueId) -> Result<Vec<Roster>> {
        self.get_json(&format!("league/{}/rosters", league_id)).await
    }

    pub async fn get_league_users(&self, league_id: &LeagueId) -> Result<Vec<LeagueUser>> {
        self.get_json(&format!("league/{}/users", league_id)).await
    }

    pub async fn get_matchups(
        &self,
        league_id: &LeagueId,
        week: Week,
    ) -> Result<Vec<MatchupEntry>> {
        self.get_json(&format!("league/{}/matchups/{}", league_id, week)).await
    }

    /// Transactions processed in `week`, every type and status.
    pub async fn get_transactions(
        &self,
        league_id: &LeagueId,
        week: Week,
    ) -> Result<Vec<Transaction>> {
        let value = self
            .get_value(&format!("league/{}/transactions/{}", league_id, week), &[])
            .await?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The full NFL player directory (several MB; callers should cache it).
    pub async fn get_players(&self) -> Result<PlayerDirectory> {
        self.get_json(&format!("players/{}", SPORT)).await
    }

    pub async fn get_nfl_state(&self) -> Result<NflState> {
        self.get_json(&format!("state/{}", SPORT)).await
    }

    /// Regular-season totals per player, including Sleeper's rank keys.
    pub async fn get_season_stats(&self, season: Season) -> Result<StatMap> {
        let raw = self
            .get_value(
                &format!("stats/{}/regular/{}", SPORT, season),
                &[("season_type", "regular"), ("position", "all")],
            )
            .await?;
        Ok(parse_stat_map(&raw))
    }

    /// One regular-season week of stat lines.
    pub async fn get_week_stats(&self, season: Season, week: Week) -> Result<StatMap> {
        let raw = self
            .get_value(
                &format!("stats/{}/regular/{}/{}", SPORT, season, week),
                &[("season_type", "regular")],
            )
            .await?;
        Ok(parse_stat_map(&raw))
    }
}
