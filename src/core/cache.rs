//! Two-tier response cache: in-memory LRU in front of JSON files on disk.
//!
//! - L1: `lru::LruCache` for repeated lookups within one run
//! - L2: one JSON file per key under the user cache directory, so the next
//!   run can skip the network
//!
//! Every entry carries the time it was stored. Entries older than the cache's
//! `max_age` are treated as missing in both tiers.

use lru::LruCache;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tracing::debug;

use crate::sleeper::{
    types::{League, NflState, StatMap},
    SLEEPER_BASE_URL,
};
use crate::{LeagueId, Season, Week};


/// Directory name under the platform cache dir.
pub const CACHE_DIR_NAME: &str = "sleeper-ffl";

/// Base directory for all cached files: `~/.cache/sleeper-ffl`
pub fn cache_base_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(CACHE_DIR_NAME)
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Generic cache key usable for both tiers.
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// String form used as the file name on disk.
    fn to_file_key(&self) -> String;
}

/// Whether a value came from cache or the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Refreshed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NflStateCacheKey;

impl CacheKey for NflStateCacheKey {
    fn to_file_key(&self) -> String {
        "nfl_state".to_string()
    }
}

/// Season totals when `week` is `None`, otherwise one week's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatsCacheKey {
    pub season: Season,
    pub week: Option<Week>,
}

impl CacheKey for StatsCacheKey {
    fn to_file_key(&self) -> String {
        let week_str = self
            .week
            .map(|w| format!("w{}", w.as_u16()))
            .unwrap_or_else(|| "season".to_string());
        format!("stats_s{}_{}", self.season.as_u16(), week_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeagueCacheKey {
    pub league_id: LeagueId,
}

impl CacheKey for LeagueCacheKey {
    fn to_file_key(&self) -> String {
        format!("league_{}", self.league_id)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredEntry<V> {
    stored_at: u64,
    value: V,
}

/// Unified cache that combines LRU memory cache with file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    memory_cache: Mutex<LruCache<K, (u64, V)>>,
    memory_capacity: usize,
    max_age: Duration,
    dir: PathBuf,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Create a cache rooted at the default cache directory.
    pub fn new(memory_capacity: usize, max_age: Duration) -> Self {
        Self::with_dir(memory_capacity, max_age, cache_base_dir())
    }

    /// Create a cache whose disk tier lives in `dir`.
    pub fn with_dir(memory_capacity: usize, max_age: Duration, dir: PathBuf) -> Self {
        let cap = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Mutex::new(LruCache::new(cap)),
            memory_capacity: cap.get(),
            max_age,
            dir,
        }
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<K, (u64, V)>> {
        self.memory_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_fresh(&self, stored_at: u64) -> bool {
        now_secs().saturating_sub(stored_at) <= self.max_age.as_secs()
    }

    /// Path of the disk entry for `key`.
    pub fn file_path(&self, key: &K) -> PathBuf {
        self.dir.join(format!("{}.json", key.to_file_key()))
    }

    /// Get a fresh item (memory first, then disk).
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let mut mem = self.memory();
            if let Some((stored_at, value)) = mem.get(key) {
                if self.is_fresh(*stored_at) {
                    return Some(value.clone());
                }
                mem.pop(key);
            }
        }

        let entry = self.get_from_disk(key)?;
        if !self.is_fresh(entry.stored_at) {
            debug!(key = %key.to_file_key(), "disk cache entry expired");
            return None;
        }
        self.memory()
            .put(key.clone(), (entry.stored_at, entry.value.clone()));
        Some(entry.value)
    }

    /// Store an item in both tiers. Disk failures are logged, not returned.
    pub fn put(&self, key: K, value: V) {
        let stored_at = now_secs();
        if let Err(e) = self.put_to_disk(&key, stored_at, &value) {
            debug!(key = %key.to_file_key(), error = %e, "failed to persist cache entry");
        }
        self.memory().put(key, (stored_at, value));
    }

    fn get_from_disk(&self, key: &K) -> Option<StoredEntry<V>> {
        let content = try_read_to_string(&self.file_path(key))?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, stored_at: u64, value: &V) -> std::io::Result<()> {
        let entry = StoredEntry { stored_at, value };
        let content = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&self.file_path(key), &content)
    }

    /// Drop an entry from both tiers.
    pub fn invalidate(&self, key: &K) -> std::io::Result<()> {
        self.memory().pop(key);
        let path = self.file_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// (entries, capacity) of the memory tier
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory().len(), self.memory_capacity)
    }
}

/// The caches for one Sleeper API host, rooted at a single directory.
pub struct CacheManager {
    dir: PathBuf,
    pub nfl_state: UnifiedCache<NflStateCacheKey, NflState>,
    pub stats: UnifiedCache<StatsCacheKey, StatMap>,
    pub leagues: UnifiedCache<LeagueCacheKey, League>,
}

impl CacheManager {
    /// Caches under the default cache directory.
    pub fn new() -> Self {
        Self::with_dir(cache_base_dir())
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            nfl_state: UnifiedCache::with_dir(1, Duration::from_secs(60 * 60), dir.clone()),
            stats: UnifiedCache::with_dir(8, Duration::from_secs(60 * 60), dir.clone()),
            leagues: UnifiedCache::with_dir(50, Duration::from_secs(6 * 60 * 60), dir.clone()),
            dir,
        }
    }

    /// Caches for `base_url`. The public API uses the base directory; any other
    /// host gets its own subdirectory so overrides never share entries with it.
    pub fn for_base_url(base_url: &str) -> Self {
        Self::with_dir(cache_dir_for(&cache_base_dir(), base_url))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn clear_all_memory(&self) {
        self.nfl_state.clear_memory();
        self.stats.clear_memory();
        self.leagues.clear_memory();
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

/// `base` for the public Sleeper API, `base/hosts/<sanitized url>` otherwise.
pub fn cache_dir_for(base: &Path, base_url: &str) -> PathBuf {
    let url = base_url.trim_end_matches('/');
    if url == SLEEPER_BASE_URL {
        return base.to_path_buf();
    }
    let host: String = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    base.join("hosts").join(host)
}
