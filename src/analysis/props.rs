//! Joins sportsbook prop lines with actual production.

use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::{
    cli::types::{SortDirection, TdSortKey},
    datastore::models::{SeasonPropRow, SeasonStatRow, TdPropRow, WeeklyPropRow, WeeklyStatRow},
    PlayerId,
};


/// Actual vs. line for one stat category over the season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub actual: f64,
    pub line: Option<f64>,
    /// `actual / line`; `None` when there is no usable line.
    pub progress: Option<f64>,
}

impl CategoryProgress {
    pub fn new(actual: Option<f64>, line: Option<f64>) -> Self {
        let actual = actual.unwrap_or(0.0);
        let progress = line.filter(|l| *l != 0.0).map(|l| actual / l);
        Self {
            actual,
            line,
            progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonPropProgress {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: String,
    pub team: String,
    pub headshot_url: Option<String>,
    pub passing_yards: CategoryProgress,
    pub passing_tds: CategoryProgress,
    pub receiving_yards: CategoryProgress,
    pub receiving_tds: CategoryProgress,
    pub rushing_yards: CategoryProgress,
    pub rushing_tds: CategoryProgress,
}

/// Season lines joined with season-to-date stats. Props with no stat row are dropped.
pub fn merge_season_props(props: &[SeasonPropRow], stats: &[SeasonStatRow]) -> Vec<SeasonPropProgress> {
    let by_id: HashMap<&PlayerId, &SeasonStatRow> = stats
        .iter()
        .filter_map(|s| s.player_id.as_ref().map(|id| (id, s)))
        .collect();

    props
        .iter()
        .filter_map(|prop| {
            let id = prop.player_id.as_ref()?;
            let stat = by_id.get(id)?;
            let player = stat.nfl_players.as_ref();
            let pick = |stat_side: Option<&String>, prop_side: &Option<String>| {
                stat_side
                    .or(prop_side.as_ref())
                    .cloned()
                    .unwrap_or_default()
            };

            Some(SeasonPropProgress {
                player_id: id.clone(),
                player_name: pick(player.and_then(|p| p.player_name.as_ref()), &prop.player_name),
                position: pick(player.and_then(|p| p.position.as_ref()), &prop.position),
                team: pick(player.and_then(|p| p.team.as_ref()), &prop.team),
                headshot_url: player.and_then(|p| p.headshot_url.clone()),
                passing_yards: CategoryProgress::new(stat.passing_yards, prop.passing_yards),
                passing_tds: CategoryProgress::new(stat.passing_tds, prop.passing_tds),
                receiving_yards: CategoryProgress::new(stat.receiving_yards, prop.receiving_yards),
                receiving_tds: CategoryProgress::new(stat.receiving_tds, prop.receiving_tds),
                rushing_yards: CategoryProgress::new(stat.rushing_yards, prop.rushing_yards),
                rushing_tds: CategoryProgress::new(stat.rushing_tds, prop.rushing_tds),
            })
        })
        .collect()
}

/// A weekly line, what happened, and whether the over hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropOutcome {
    pub line: Option<f64>,
    pub actual: f64,
    /// Only set once the game is final.
    pub hit: Option<bool>,
}

impl PropOutcome {
    fn new(line: Option<f64>, actual: Option<f64>, completed: bool) -> Self {
        let actual = actual.unwrap_or(0.0);
        let hit = match (completed, line) {
            (true, Some(l)) => Some(actual >= l),
            _ => None,
        };
        Self { line, actual, hit }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPropResult {
    pub player_id: Option<PlayerId>,
    pub player_name: String,
    pub team: String,
    pub position: String,
    pub week: Option<u16>,
    pub game: Option<String>,
    pub game_completed: bool,
    pub game_result: String,
    pub game_date: String,
    pub game_time: String,
    pub opponent: String,
    pub passing_yards: PropOutcome,
    pub passing_tds: PropOutcome,
    pub interceptions: PropOutcome,
    pub rushing_yards: PropOutcome,
    pub rushing_tds: PropOutcome,
    pub receptions: PropOutcome,
    pub receiving_yards: PropOutcome,
    pub receiving_tds: f64,
    pub pass_attempts_line: Option<f64>,
    pub pass_completions_line: Option<f64>,
    pub rush_attempts_line: Option<f64>,
}

/// The team on the other side of the player's game, or `"N/A"`.
pub(crate) fn opponent_for(prop: &WeeklyPropRow, team: &str) -> String {
    let Some(game) = prop.nfl_schedule.as_ref() else {
        warn!(player_id = ?prop.player_id, game = ?prop.game, "no schedule row for prop");
        return "N/A".to_string();
    };
    match (&game.home_team, &game.away_team) {
        (Some(home), Some(away)) => {
            if home == team {
                away.clone()
            } else {
                home.clone()
            }
        }
        _ => {
            warn!(game_id = ?game.game_id, "schedule row missing home or away team");
            "N/A".to_string()
        }
    }
}

/// Weekly props joined with the same week's stats by player id.
pub fn merge_weekly_props(props: &[WeeklyPropRow], stats: &[WeeklyStatRow]) -> Vec<WeeklyPropResult> {
    let by_id: HashMap<&PlayerId, &WeeklyStatRow> = stats
        .iter()
        .filter_map(|s| s.player_id.as_ref().map(|id| (id, s)))
        .collect();

    props
        .iter()
        .map(|prop| {
            let stat = prop.player_id.as_ref().and_then(|id| by_id.get(id)).copied();
            let player = prop.nfl_players.as_ref();
            let game = prop.nfl_schedule.as_ref();
            let team = player.and_then(|p| p.team.clone()).unwrap_or_default();
            let completed = game.is_some_and(|g| g.is_completed);
            let actual = |f: fn(&WeeklyStatRow) -> Option<f64>| stat.and_then(f);

            WeeklyPropResult {
                player_id: prop.player_id.clone(),
                player_name: player.and_then(|p| p.player_name.clone()).unwrap_or_default(),
                position: player.and_then(|p| p.position.clone()).unwrap_or_default(),
                opponent: opponent_for(prop, &team),
                team,
                week: prop.week,
                game: prop.game.clone(),
                game_completed: completed,
                game_result: game.and_then(|g| g.result.clone()).unwrap_or_default(),
                game_date: game.and_then(|g| g.game_date.clone()).unwrap_or_default(),
                game_time: game.and_then(|g| g.game_time.clone()).unwrap_or_default(),
                passing_yards: PropOutcome::new(prop.passyardsou, actual(|s| s.passing_yards), completed),
                passing_tds: PropOutcome::new(prop.passtdsnumber, actual(|s| s.passing_tds), completed),
                interceptions: PropOutcome::new(prop.interceptions, actual(|s| s.interceptions), completed),
                rushing_yards: PropOutcome::new(prop.rushyardsou, actual(|s| s.rushing_yards), completed),
                rushing_tds: PropOutcome::new(prop.rushtdsnumber, actual(|s| s.rushing_tds), completed),
                receptions: PropOutcome::new(prop.receptionsou, actual(|s| s.receptions), completed),
                receiving_yards: PropOutcome::new(
                    prop.receivingyardsou,
                    actual(|s| s.receiving_yards),
                    completed,
                ),
                receiving_tds: actual(|s| s.receiving_tds).unwrap_or(0.0),
                pass_attempts_line: prop.passattempts,
                pass_completions_line: prop.passcompletions,
                rush_attempts_line: prop.rushattempts,
            }
        })
        .collect()
}

macro_rules! fill_empty {
    ($into:expr, $from:expr, $($field:ident),+ $(,)?) => {
        $(
            if $into.$field.is_none() {
                $into.$field = $from.$field.clone();
            }
        )+
    };
}

/// Collapse rows for the same player into the first occurrence. Later rows only
/// fill fields the first row left empty.
///
/// Rows are keyed by the embedded Sleeper id, then the row's own player id;
/// rows with neither are kept as they are.
pub fn combine_duplicate_props(rows: Vec<WeeklyPropRow>) -> Vec<WeeklyPropRow> {
    let mut combined: Vec<WeeklyPropRow> = Vec::with_capacity(rows.len());
    let mut index: HashMap<PlayerId, usize> = HashMap::new();

    for row in rows {
        let key = row.sleeper_id().or(row.player_id.as_ref()).cloned();
        let Some(key) = key else {
            combined.push(row);
            continue;
        };

        match index.get(&key) {
            Some(&i) => {
                let existing = &mut combined[i];
                fill_empty!(
                    existing,
                    row,
                    player_id,
                    week,
                    game,
                    date,
                    passyardsou,
                    passtdsnumber,
                    passtdsoverodds,
                    passtdsunderodds,
                    passattempts,
                    passcompletions,
                    interceptions,
                    interceptionsoverodds,
                    interceptionsunderodds,
                    rushyardsou,
                    rushattempts,
                    rushtdsnumber,
                    rushtdsoverodds,
                    receptionsou,
                    receivingyardsou,
                    nfl_players,
                    nfl_schedule,
                );
            }
            None => {
                index.insert(key, combined.len());
                combined.push(row);
            }
        }
    }
    combined
}

/// Narrowing options for the touchdown props table. Empty lists match everything.
#[derive(Debug, Clone, Default)]
pub struct TdFilter {
    pub search: Option<String>,
    pub positions: Vec<String>,
    pub teams: Vec<String>,
    pub games: Vec<String>,
    pub completed_only: bool,
}

impl TdFilter {
    pub fn matches(&self, row: &TdPropRow) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                let embedded = row.nfl_players.as_ref().and_then(|p| p.player_name.as_deref());
                [row.player_name.as_deref(), embedded]
                    .into_iter()
                    .flatten()
                    .any(|name| name.to_lowercase().contains(&q))
            }
        };

        let position_ok = self.positions.is_empty() || {
            let embedded = row.nfl_players.as_ref().and_then(|p| p.position.as_deref());
            [row.position.as_deref(), embedded]
                .into_iter()
                .flatten()
                .any(|p| self.positions.iter().any(|want| want.eq_ignore_ascii_case(p)))
        };

        let team_ok = self.teams.is_empty()
            || row
                .team
                .as_deref()
                .is_some_and(|t| self.teams.iter().any(|want| want.eq_ignore_ascii_case(t)));

        let game_ok = self.games.is_empty()
            || row
                .game
                .as_deref()
                .is_some_and(|g| self.games.iter().any(|want| want == g));

        search_ok && position_ok && team_ok && game_ok && (!self.completed_only || row.is_completed)
    }
}

pub fn filter_td_props(rows: Vec<TdPropRow>, filter: &TdFilter) -> Vec<TdPropRow> {
    rows.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Numeric value of an odds string for ordering (`"+450"` -> 450, `"−120"` -> -120).
fn odds_sort_value(odds: &str) -> Option<f64> {
    let cleaned: String = odds
        .replace('\u{2212}', "-")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

/// Sort by `key`. Rows with no value for the key are left out of the view.
pub fn sort_td_props(rows: Vec<TdPropRow>, key: TdSortKey, direction: SortDirection) -> Vec<TdPropRow> {
    let text = |row: &TdPropRow| -> Option<String> {
        match key {
            TdSortKey::PlayerName => row.effective_name().map(str::to_string),
            TdSortKey::FirstTdOdds => row.first_td_odds.clone(),
            TdSortKey::AnytimeTdOdds => row.anytime_td_odds.clone(),
            TdSortKey::TwoPlusTdOdds => row.two_plus_td_odds.clone(),
            TdSortKey::GameDate => row.game_date.clone(),
        }
    };

    let mut keyed: Vec<(String, TdPropRow)> = rows
        .into_iter()
        .filter_map(|row| text(&row).map(|k| (k, row)))
        .collect();

    let numeric = matches!(
        key,
        TdSortKey::FirstTdOdds | TdSortKey::AnytimeTdOdds | TdSortKey::TwoPlusTdOdds
    );
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = if numeric {
            let (x, y) = (odds_sort_value(a), odds_sort_value(b));
            x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
        } else if key == TdSortKey::PlayerName {
            a.to_lowercase().cmp(&b.to_lowercase())
        } else {
            // ISO dates order correctly as text.
            a.cmp(b)
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, row)| row).collect()
}
