//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{
    AdpSortKey, DynastyFormat, LeagueId, PlayerId, Position, ScoringFormat, Season, SortDirection,
    TdSortKey, Week,
};

/// Output and cache flags shared by every listing command.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output results as JSON instead of a table.
    #[clap(long)]
    pub json: bool,

    /// Ignore cached responses and refetch from Sleeper.
    #[clap(long)]
    pub refresh: bool,
}

/// Name and position narrowing shared by the player tables.
#[derive(Debug, Args)]
pub struct PlayerFilters {
    /// Case-insensitive substring match on player name.
    #[clap(long, short = 'n')]
    pub search: Option<String>,

    /// Filter by position (repeatable): `-p QB -p RB`.
    #[clap(short = 'p', long = "position")]
    pub positions: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// League name, season, scoring format and roster slots.
    LeagueData {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Every roster's starters with owner names.
    Starters {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// How often each player appears across a user's leagues.
    Exposure {
        /// Sleeper username (or set `SLEEPER_FFL_USERNAME`).
        #[clap(long, short)]
        username: Option<String>,

        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Show only the top N players.
        #[clap(long)]
        limit: Option<usize>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// The user's rank in each league by rostered season points.
    UserRank {
        /// Sleeper username (or set `SLEEPER_FFL_USERNAME`).
        #[clap(long, short)]
        username: Option<String>,

        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Which pre-computed points to rank by.
        #[clap(long, value_enum, default_value_t = ScoringFormat::Ppr)]
        format: ScoringFormat,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Optimal lineups for every roster with per-slot ranks.
    RosterRank {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Score a single week instead of the full season.
        #[clap(long, short)]
        week: Option<Week>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Season leaderboard from Sleeper's rank lines, paginated.
    Leaderboard {
        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        #[clap(long, value_enum, default_value_t = ScoringFormat::Ppr)]
        format: ScoringFormat,

        /// Filter by position.
        #[clap(short = 'p', long)]
        position: Option<Position>,

        /// Case-insensitive substring match on player name.
        #[clap(long, short = 'n')]
        search: Option<String>,

        /// 1-based page number.
        #[clap(long, default_value_t = 1)]
        page: usize,

        /// Rows per page.
        #[clap(long, default_value_t = 25)]
        limit: usize,

        /// Sort direction of the rank column.
        #[clap(long, value_enum, default_value_t = SortDirection::Ascending)]
        direction: SortDirection,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Season-long prop lines against season-to-date production.
    SeasonProps {
        #[clap(flatten)]
        filters: PlayerFilters,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// One week's prop lines with results and hit flags.
    WeeklyProps {
        /// Week (defaults to the current NFL week).
        #[clap(long, short)]
        week: Option<Week>,

        #[clap(flatten)]
        filters: PlayerFilters,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Touchdown scorer odds for a week.
    TdProps {
        /// Week (defaults to the current NFL week).
        #[clap(long, short)]
        week: Option<Week>,

        #[clap(flatten)]
        filters: PlayerFilters,

        /// Filter by NFL team (repeatable).
        #[clap(long = "team")]
        teams: Vec<String>,

        /// Filter by game label (repeatable).
        #[clap(long = "game")]
        games: Vec<String>,

        /// Only games that have finished.
        #[clap(long)]
        completed: bool,

        #[clap(long, value_enum)]
        sort: Option<TdSortKey>,

        #[clap(long, value_enum, default_value_t = SortDirection::Ascending)]
        direction: SortDirection,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Prop-implied fantasy projections for a league's players.
    Projections {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Project only this user's roster.
        #[clap(long, short)]
        username: Option<String>,

        /// Project specific Sleeper player ids (repeatable).
        #[clap(long = "player")]
        players: Vec<PlayerId>,

        /// Week (defaults to the current NFL week).
        #[clap(long, short)]
        week: Option<Week>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// One week's head-to-head matchups, highest scorer and closest game.
    Matchups {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Week (defaults to the current NFL week).
        #[clap(long, short)]
        week: Option<Week>,

        /// Mark this user's matchup (or set `SLEEPER_FFL_USERNAME`).
        #[clap(long, short)]
        username: Option<String>,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Unrostered players ranked by season points, overall and by position.
    Waivers {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        #[clap(long, value_enum, default_value_t = ScoringFormat::Ppr)]
        format: ScoringFormat,

        #[clap(flatten)]
        filters: PlayerFilters,

        /// Rows in the overall list.
        #[clap(long, default_value_t = 20)]
        limit: usize,

        /// Rows in each position list.
        #[clap(long, default_value_t = 10)]
        position_limit: usize,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Completed trades with the players and picks each side received.
    Trades {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Only this week (defaults to every week through the current one).
        #[clap(long, short)]
        week: Option<Week>,

        /// Only trades involving this user's roster.
        #[clap(long, short)]
        username: Option<String>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Fantasy points under a league's scoring rules (or a preset format).
    Scoring {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`); a preset is used when absent.
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Preset used when no league is given.
        #[clap(long, value_enum, default_value_t = ScoringFormat::Ppr)]
        format: ScoringFormat,

        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Score a single week instead of the full season.
        #[clap(long, short)]
        week: Option<Week>,

        /// Filter by position.
        #[clap(short = 'p', long)]
        position: Option<Position>,

        #[clap(long, default_value_t = 50)]
        limit: usize,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// ADP comparison across NFC, ESPN, Sleeper and consensus.
    Adp {
        /// Rows to fetch, in NFC rank order.
        #[clap(long, default_value_t = 200)]
        limit: usize,

        /// League size for the consensus pick column.
        #[clap(long, default_value_t = 12)]
        teams: u32,

        #[clap(flatten)]
        filters: PlayerFilters,

        #[clap(long, value_enum, default_value_t = AdpSortKey::ConsensusPick)]
        sort: AdpSortKey,

        #[clap(long, value_enum, default_value_t = SortDirection::Ascending)]
        direction: SortDirection,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Dynasty trade values from the newest snapshot.
    Dynasty {
        #[clap(long, value_enum, default_value_t = DynastyFormat::OneQb)]
        format: DynastyFormat,

        #[clap(flatten)]
        filters: PlayerFilters,

        #[clap(long)]
        limit: Option<usize>,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Save a league's buy-in and pot to the datastore.
    SaveLeague {
        /// League ID (or set `SLEEPER_FFL_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Owning account uid.
        #[clap(long)]
        user_uid: String,

        #[clap(long)]
        buy_in: Option<f64>,

        #[clap(long)]
        total_pot: Option<f64>,

        /// Output the saved record as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Saved league records for an account.
    ListLeagues {
        /// Owning account uid.
        #[clap(long)]
        user_uid: String,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Refetch the local player directory.
    RefreshPlayers {
        /// Refetch even when the directory is less than a day old.
        #[clap(long)]
        force: bool,

        /// Clear the player database first.
        #[clap(long)]
        clear: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "sleeper-ffl", about = "Sleeper fantasy football CLI", version)]
pub struct SleeperFfl {
    /// Log progress (`info` level) to stderr; `RUST_LOG` overrides.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SleeperFfl {
        SleeperFfl::try_parse_from(std::iter::once("sleeper-ffl").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_leaderboard_defaults() {
        match parse(&["leaderboard"]).command {
            Commands::Leaderboard {
                season,
                format,
                page,
                limit,
                direction,
                ..
            } => {
                assert_eq!(season, Season::default());
                assert_eq!(format, ScoringFormat::Ppr);
                assert_eq!((page, limit), (1, 25));
                assert_eq!(direction, SortDirection::Ascending);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_td_props_filters() {
        let cli = parse(&[
            "-v", "td-props", "-w", "5", "-p", "WR", "-p", "TE", "--team", "KC", "--sort",
            "anytime-td-odds", "--direction", "descending", "--json",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::TdProps {
                week,
                filters,
                teams,
                sort,
                direction,
                json,
                ..
            } => {
                assert_eq!(week, Some(Week::new(5)));
                assert_eq!(filters.positions, vec!["WR", "TE"]);
                assert_eq!(teams, vec!["KC"]);
                assert_eq!(sort, Some(TdSortKey::AnytimeTdOdds));
                assert_eq!(direction, SortDirection::Descending);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_league_id() {
        let err = SleeperFfl::try_parse_from(["sleeper-ffl", "starters", "-l", "not-a-number"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_activity_commands() {
        match parse(&["matchups", "-l", "111", "-w", "4", "-u", "me", "--json"]).command {
            Commands::Matchups {
                league_id,
                week,
                username,
                json,
            } => {
                assert_eq!(league_id, Some(LeagueId::new("111")));
                assert_eq!(week, Some(Week::new(4)));
                assert_eq!(username.as_deref(), Some("me"));
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }

        match parse(&["waivers", "-p", "RB", "--position-limit", "5"]).command {
            Commands::Waivers {
                format,
                filters,
                limit,
                position_limit,
                ..
            } => {
                assert_eq!(format, ScoringFormat::Ppr);
                assert_eq!(filters.positions, vec!["RB"]);
                assert_eq!((limit, position_limit), (20, 5));
            }
            other => panic!("unexpected command {:?}", other),
        }

        match parse(&["trades", "--refresh"]).command {
            Commands::Trades { week, output, .. } => {
                assert_eq!(week, None);
                assert!(output.refresh);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_dynasty_format() {
        match parse(&["dynasty", "--format", "superflex", "--limit", "10"]).command {
            Commands::Dynasty { format, limit, .. } => {
                assert_eq!(format, DynastyFormat::Superflex);
                assert_eq!(limit, Some(10));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
