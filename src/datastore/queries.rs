//! Table-level reads and writes against the hosted datastore.

use super::{client::DatastoreClient, client::Query, models::*};
use crate::{Result, Week};
use chrono::NaiveDate;

pub const WEEKLY_PROPS_TABLE: &str = "weekly_props";
pub const WEEKLY_STATS_TABLE: &str = "player_weekly_stats";
pub const SEASON_PROPS_TABLE: &str = "draftkings_2024_playerprops";
pub const SEASON_STATS_TABLE: &str = "player_seasonal_stats";
pub const TD_PROPS_TABLE: &str = "td_props";
pub const ADP_TABLE: &str = "adp_comparison_11";
pub const DYNASTY_TABLE: &str = "ktc_test";
pub const LEAGUES_TABLE: &str = "leagues";

const WEEKLY_PROPS_COLUMNS: &str = "player_id, week, game, date,
    passyardsou, passtdsnumber, passtdsoverodds, passtdsunderodds,
    passattempts, passcompletions,
    interceptions, interceptionsoverodds, interceptionsunderodds,
    rushyardsou, rushattempts, rushtdsnumber, rushtdsoverodds,
    receptionsou, receivingyardsou,
    nfl_players(sleeper_id, player_name, first_name, last_name, team, position, headshot_url),
    nfl_schedule(game_id, is_completed, result, game_date, game_time, home_team, away_team)";

const WEEKLY_STATS_COLUMNS: &str = "player_id, passing_yards, passing_tds, interceptions,
    rushing_yards, rushing_tds, receiving_yards, receiving_tds, receptions";

const SEASON_PROPS_COLUMNS: &str = "player_id, player_name, position, team,
    passing_yards, passing_tds, receiving_yards, receiving_tds, rushing_yards, rushing_tds";

const SEASON_STATS_COLUMNS: &str = "player_id, passing_yards, passing_tds,
    receiving_yards, receiving_tds, rushing_yards, rushing_tds,
    nfl_players(sleeper_id, player_name, position, team, headshot_url)";

const TD_PROPS_COLUMNS: &str = "player, team, position, game, date, week,
    first_td_odds, anytime_td_odds, two_plus_td_odds, is_completed,
    nfl_players(sleeper_id, player_name, position, team)";

const ADP_COLUMNS: &str = "full_name, position,
    sleeper_playerrank, sleeper_positionrank, espn_playerrank, espn_positionrank,
    nfc_playerrank, nfc_positionrank, yahoo_playerrank, yahoo_positionrank,
    consensus_playerrank, consensus_positionrank, avg_playerrank, nfc_adp, date_added";

const DYNASTY_COLUMNS: &str =
    "player_name, position, team, value, sf_value, rdrft_value, age, rookie, date";

impl DatastoreClient {
    pub async fn weekly_props(&self, week: Week) -> Result<Vec<WeeklyPropRow>> {
        let q = Query::table(WEEKLY_PROPS_TABLE)
            .select(WEEKLY_PROPS_COLUMNS)
            .eq("week", week);
        self.fetch(&q).await
    }

    pub async fn weekly_stats(&self, week: Week) -> Result<Vec<WeeklyStatRow>> {
        let q = Query::table(WEEKLY_STATS_TABLE)
            .select(WEEKLY_STATS_COLUMNS)
            .eq("week", week);
        self.fetch(&q).await
    }

    pub async fn season_props(&self) -> Result<Vec<SeasonPropRow>> {
        self.fetch(&Query::table(SEASON_PROPS_TABLE).select(SEASON_PROPS_COLUMNS))
            .await
    }

    pub async fn season_stats(&self) -> Result<Vec<SeasonStatRow>> {
        self.fetch(&Query::table(SEASON_STATS_TABLE).select(SEASON_STATS_COLUMNS))
            .await
    }

    pub async fn td_props(&self, week: Week) -> Result<Vec<TdPropRow>> {
        let q = Query::table(TD_PROPS_TABLE)
            .select(TD_PROPS_COLUMNS)
            .eq("week", week);
        self.fetch(&q).await
    }

    /// Top `limit` rows of the ADP comparison, in NFC rank order.
    pub async fn top_adp(&self, limit: usize) -> Result<Vec<AdpRow>> {
        let q = Query::table(ADP_TABLE)
            .select(ADP_COLUMNS)
            .order("nfc_playerrank", true)
            .limit(limit);
        self.fetch(&q).await
    }

    /// Dynasty values from the most recent snapshot (all rows when `date` is None).
    pub async fn dynasty_values(&self, date: Option<NaiveDate>) -> Result<Vec<DynastyValueRow>> {
        let mut q = Query::table(DYNASTY_TABLE).select(DYNASTY_COLUMNS);
        if let Some(d) = date {
            q = q.eq("date", d.format("%Y-%m-%d"));
        }
        self.fetch(&q).await
    }

    /// Date of the newest dynasty snapshot, if any rows exist.
    pub async fn latest_dynasty_date(&self) -> Result<Option<NaiveDate>> {
        let q = Query::table(DYNASTY_TABLE)
            .select("date")
            .order("date", false)
            .limit(1);
        let rows: Vec<DateRow> = self.fetch(&q).await?;
        Ok(rows.into_iter().next().and_then(|r| r.date))
    }

    /// Save a league record; an existing record with the same id is replaced.
    pub async fn upsert_league(&self, record: &LeagueRecord) -> Result<Vec<LeagueRecord>> {
        self.upsert(LEAGUES_TABLE, std::slice::from_ref(record), "id")
            .await
    }

    pub async fn leagues_for_user(&self, user_uid: &str) -> Result<Vec<LeagueRecord>> {
        let q = Query::table(LEAGUES_TABLE).select("*").eq("user_uid", user_uid);
        self.fetch(&q).await
    }
}

/// `MM/DD/YYYY`, the format shown next to "data as of".
pub fn format_snapshot_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}
