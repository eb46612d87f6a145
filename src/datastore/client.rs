//! Client for the hosted relational datastore (PostgREST dialect).
//!
//! Reads are `GET {base}/rest/v1/{table}` with the filter grammar encoded in
//! query parameters (`week=eq.3`, `order=col.asc`, `limit=250`). Writes are
//! `POST` upserts where the last write wins.

use reqwest::{header::HeaderMap, Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use tracing::debug;

use crate::{
    core::{build_client, datastore_header_map},
    error::FflError,
    Result,
};

#[cfg(test)]
mod tests;

const REST_PATH: &str = "rest/v1";

/// Declarative read against one table.
///
/// ```rust
/// use sleeper_ffl::datastore::Query;
///
/// let q = Query::table("weekly_props").select("player_id,week").eq("week", 3).limit(10);
/// assert_eq!(q.table_name(), "weekly_props");
/// assert!(q.params().contains(&("week".to_string(), "eq.3".to_string())));
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            params: Vec::new(),
        }
    }

    /// Column list; embedded relations use PostgREST's `rel(col, ...)` syntax.
    pub fn select(mut self, columns: &str) -> Self {
        let compact: String = columns.split_whitespace().collect::<Vec<_>>().join("");
        self.params.push(("select".to_string(), compact));
        self
    }

    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, dir)));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

#[derive(Debug, Clone)]
pub struct DatastoreClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl DatastoreClient {
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: datastore_header_map(api_key)?,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    /// Run a read and deserialize every returned row.
    pub async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>> {
        let url = self.table_url(&query.table);
        debug!(%url, params = ?query.params, "GET datastore");

        let res = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&query.params)
            .send()
            .await?;
        let res = check_status(&query.table, res).await?;
        Ok(res.json::<Vec<T>>().await?)
    }

    /// Insert rows, replacing existing rows that collide on `on_conflict`.
    /// Returns the stored representation.
    pub async fn upsert<T, R>(&self, table: &str, rows: &[T], on_conflict: &str) -> Result<Vec<R>>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.table_url(table);
        debug!(%url, rows = rows.len(), "UPSERT datastore");

        let res = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .query(&[("on_conflict", on_conflict)])
            .json(rows)
            .send()
            .await?;
        let res = check_status(table, res).await?;
        Ok(res.json::<Vec<R>>().await?)
    }
}

/// Turn a non-2xx reply into [`FflError::Datastore`], keeping PostgREST's message.
async fn check_status(table: &str, res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);

    Err(FflError::Datastore {
        table: table.to_string(),
        status: status.as_u16(),
        message,
    })
}
