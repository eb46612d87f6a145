//! Sleeper Fantasy Football CLI Library
//!
//! Aggregates Sleeper league data with prop lines, ADP and dynasty values from
//! a hosted PostgREST datastore, and computes the derived views a fantasy
//! manager cares about.
//!
//! ## Features
//!
//! - **League Data**: League settings, rosters, starters and owners from the Sleeper API
//! - **Scoring**: Fantasy points from league scoring coefficients, IDP included
//! - **Props**: Season and weekly prop lines merged with actual production
//! - **Projections**: Weekly fantasy projections implied by sportsbook lines
//! - **Rankings**: Exposure, user rank, best-ball lineups, ADP and dynasty order
//! - **League Activity**: Weekly matchups, the waiver wire and trade history
//! - **Local Storage**: SQLite player directory refreshed once a day
//!
//! ## Quick Start
//!
//! ```rust
//! use sleeper_ffl::{
//!     scoring::{compute_points, ScoringRules},
//!     sleeper::types::StatLine,
//! };
//!
//! let stats: StatLine = [("pass_yd".to_string(), 300.0), ("pass_td".to_string(), 2.0)]
//!     .into_iter()
//!     .collect();
//! assert_eq!(compute_points(&stats, &ScoringRules::ppr()), 20.0);
//! ```
//!
//! ## Environment Configuration
//!
//! Set defaults to avoid passing them in every command:
//! ```bash
//! export SLEEPER_FFL_USERNAME=myname
//! export SLEEPER_FFL_LEAGUE_ID=1048461014691328000
//! export SUPABASE_URL=https://project.supabase.co
//! export SUPABASE_ANON_KEY=...
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod datastore;
pub mod error;
pub mod scoring;
pub mod sleeper;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{LeagueId, PlayerId, Position, Season, UserId, Week};
pub use error::{FflError, Result};

pub const LEAGUE_ID_ENV_VAR: &str = "SLEEPER_FFL_LEAGUE_ID";
pub const USERNAME_ENV_VAR: &str = "SLEEPER_FFL_USERNAME";
