//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use clap::Parser;
use sleeper_ffl::{
    analysis::{leaderboard::LeaderboardQuery, props::TdFilter, waivers::WaiverQuery},
    cli::{Commands, SleeperFfl},
    commands::{
        activity::{handle_matchups, handle_trades, handle_waivers},
        leaderboard::handle_leaderboard,
        league::{handle_league_data, handle_roster_rank, handle_starters},
        league_records::{handle_list_leagues, handle_save_league},
        players::handle_refresh_players,
        portfolio::{handle_exposure, handle_user_rank},
        projections::{handle_projections, handle_scoring, ProjectionParams, ScoringParams},
        props::{handle_season_props, handle_td_props, handle_weekly_props},
        rankings::{handle_adp, handle_dynasty, AdpParams, DynastyParams},
        CommandContext,
    },
    Result,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let app = SleeperFfl::parse();
    init_tracing(app.verbose);

    let ctx = CommandContext::from_env()?;

    match app.command {
        Commands::LeagueData { league_id, output } => {
            handle_league_data(&ctx, league_id, output.refresh, output.json).await?
        }

        Commands::Starters { league_id, output } => {
            handle_starters(&ctx, league_id, output.refresh, output.json).await?
        }

        Commands::Exposure {
            username,
            season,
            limit,
            output,
        } => handle_exposure(&ctx, username, season, limit, output.refresh, output.json).await?,

        Commands::UserRank {
            username,
            season,
            format,
            output,
        } => handle_user_rank(&ctx, username, season, format, output.refresh, output.json).await?,

        Commands::RosterRank {
            league_id,
            season,
            week,
            output,
        } => handle_roster_rank(&ctx, league_id, season, week, output.refresh, output.json).await?,

        Commands::Leaderboard {
            season,
            format,
            position,
            search,
            page,
            limit,
            direction,
            output,
        } => {
            let query = LeaderboardQuery {
                format,
                position,
                search,
                page,
                limit,
                direction,
            };
            handle_leaderboard(&ctx, season, query, output.refresh, output.json).await?
        }

        Commands::SeasonProps { filters, json } => {
            handle_season_props(&ctx, filters.search, filters.positions, json).await?
        }

        Commands::WeeklyProps {
            week,
            filters,
            json,
        } => handle_weekly_props(&ctx, week, filters.search, filters.positions, json).await?,

        Commands::TdProps {
            week,
            filters,
            teams,
            games,
            completed,
            sort,
            direction,
            json,
        } => {
            let filter = TdFilter {
                search: filters.search,
                positions: filters.positions,
                teams,
                games,
                completed_only: completed,
            };
            handle_td_props(&ctx, week, filter, sort, direction, json).await?
        }

        Commands::Projections {
            league_id,
            username,
            players,
            week,
            output,
        } => {
            handle_projections(
                &ctx,
                ProjectionParams {
                    league_id,
                    username,
                    players,
                    week,
                    refresh: output.refresh,
                    as_json: output.json,
                },
            )
            .await?
        }

        Commands::Matchups {
            league_id,
            week,
            username,
            json,
        } => handle_matchups(&ctx, league_id, week, username, json).await?,

        Commands::Waivers {
            league_id,
            season,
            format,
            filters,
            limit,
            position_limit,
            output,
        } => {
            let query = WaiverQuery {
                format,
                search: filters.search,
                positions: filters.positions,
                overall_limit: limit,
                position_limit,
            };
            handle_waivers(&ctx, league_id, season, query, output.refresh, output.json).await?
        }

        Commands::Trades {
            league_id,
            week,
            username,
            output,
        } => handle_trades(&ctx, league_id, week, username, output.refresh, output.json).await?,

        Commands::Scoring {
            league_id,
            format,
            season,
            week,
            position,
            limit,
            output,
        } => {
            handle_scoring(
                &ctx,
                ScoringParams {
                    league_id,
                    format,
                    season,
                    week,
                    position,
                    limit,
                    refresh: output.refresh,
                    as_json: output.json,
                },
            )
            .await?
        }

        Commands::Adp {
            limit,
            teams,
            filters,
            sort,
            direction,
            json,
        } => {
            handle_adp(
                &ctx,
                AdpParams {
                    limit,
                    teams,
                    search: filters.search,
                    positions: filters.positions,
                    sort,
                    direction,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::Dynasty {
            format,
            filters,
            limit,
            json,
        } => {
            handle_dynasty(
                &ctx,
                DynastyParams {
                    format,
                    positions: filters.positions,
                    search: filters.search,
                    limit,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::SaveLeague {
            league_id,
            user_uid,
            buy_in,
            total_pot,
            json,
        } => handle_save_league(&ctx, league_id, user_uid, buy_in, total_pot, json).await?,

        Commands::ListLeagues { user_uid, json } => {
            handle_list_leagues(&ctx, user_uid, json).await?
        }

        Commands::RefreshPlayers { force, clear } => {
            handle_refresh_players(&ctx, force, clear).await?
        }
    }

    Ok(())
}
