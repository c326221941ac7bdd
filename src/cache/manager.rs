//! Cache manager for persisting API responses to disk
//!
//! Stores serializable data as JSON files with expiry timestamps. Reads
//! never drop an expired entry; they hand it back flagged, and the caller
//! decides whether stale data beats no data.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk envelope around a cached value
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// A cache hit, with the freshness metadata the caller decides on
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached value
    pub data: T,
    /// When the value was originally written
    pub cached_at: DateTime<Utc>,
    /// True once the entry's TTL has elapsed
    pub is_expired: bool,
}

/// Manages reading and writing cached data to disk
///
/// Entries live as JSON files in an XDG-compliant cache directory
/// (`~/.cache/skycast/` on Linux), one file per key. Writing a key again
/// replaces the file wholesale, so the cache always holds the latest
/// response for a place and nothing older.
#[derive(Debug, Clone)]
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using the XDG-compliant cache directory.
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g. no
    /// home directory).
    pub fn new() -> Option<Self> {
        ProjectDirs::from("", "", "skycast").map(|dirs| Self {
            cache_dir: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a new CacheManager with a custom cache directory.
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let mut path = self.cache_dir.join(key);
        path.set_extension("json");
        path
    }

    /// Writes data to the cache with the given time-to-live.
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g. "forecast_lutsk")
    /// * `data` - The data to cache (must implement Serialize)
    /// * `ttl` - How long the entry should be considered fresh
    pub fn write<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let now = Utc::now();
        let json = serde_json::to_vec_pretty(&CacheEntry {
            data,
            cached_at: now,
            expires_at: now + ttl,
        })
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.entry_path(key), json)
    }

    /// Reads data from the cache.
    ///
    /// Returns `None` when the entry doesn't exist or cannot be parsed
    /// (an unreadable file is treated as a miss and logged, not an error).
    /// An expired entry still comes back, with `is_expired = true`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let content = fs::read_to_string(self.entry_path(key)).ok()?;
        let entry: CacheEntry<T> = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Discarding unreadable cache entry {}: {}", key, e);
                return None;
            }
        };

        Some(CachedData {
            is_expired: Utc::now() > entry.expires_at,
            data: entry.data,
            cached_at: entry.cached_at,
        })
    }
}
