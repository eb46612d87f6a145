//! Hosted datastore access: a small PostgREST client, row models and the
//! table queries the reports need.

pub mod client;
pub mod models;
pub mod queries;

pub use client::{DatastoreClient, Query};
pub use models::*;
pub use queries::format_snapshot_date;
