//! Error types for the Sleeper fantasy football CLI

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, FflError>;

#[derive(Error, Debug)]
pub enum FflError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),

    #[error("Username not provided and {env_var} environment variable not set")]
    MissingUsername { env_var: String },

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("{env_var} is set to {value:?}, which is not a numeric league ID")]
    InvalidLeagueId { env_var: String, value: String },

    #[error("Missing configuration: {var} must be set")]
    MissingConfig { var: String },

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Sleeper user not found: {username}")]
    UserNotFound { username: String },

    #[error("Datastore request to {table} failed with status {status}: {message}")]
    Datastore {
        table: String,
        status: u16,
        message: String,
    },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid odds: {odds}")]
    InvalidOdds { odds: String },
}
