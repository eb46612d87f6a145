//! Local SQLite storage for the Sleeper player directory.
//!
//! - `models`: row types
//! - `schema`: connection and schema management
//! - `queries`: reads, writes and staleness checks

pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

pub use models::*;
pub use schema::{PlayerDatabase, PLAYERS_DB_FILE};
