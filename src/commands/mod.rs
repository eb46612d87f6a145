//! Command implementations for the Sleeper fantasy football CLI
//!
//! Each handler resolves its inputs (CLI flags first, then environment),
//! fetches what it needs concurrently, runs the pure computations in
//! [`crate::analysis`] and prints either a table or JSON.

pub mod activity;
pub mod common;
pub mod leaderboard;
pub mod league;
pub mod league_records;
pub mod players;
pub mod portfolio;
pub mod projections;
pub mod props;
pub mod rankings;


pub use common::CommandContext;
