//! HTTP utilities shared by the Sleeper and datastore clients

use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("sleeper-ffl/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()?)
}

/// Build the auth headers the hosted datastore expects: the anon key goes in
/// both `apikey` and a bearer `Authorization` header.
pub fn datastore_header_map(api_key: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert("apikey", HeaderValue::from_str(api_key)?);
    h.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))?,
    );
    Ok(h)
}
