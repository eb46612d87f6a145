//! Sleeper fantasy platform: HTTP client, response types and cached loaders.

pub mod cached;
pub mod http;
pub mod types;

pub use http::{SleeperClient, SLEEPER_BASE_URL};
