//! Core utilities shared across the application
//!
//! - `cache`: LRU + file system response caching
//! - `http`: client construction and datastore auth headers

pub mod cache;
pub mod http;

pub use cache::{cache_base_dir, try_read_to_string, write_string, CacheManager, CacheStatus};
pub use http::{build_client, datastore_header_map};
