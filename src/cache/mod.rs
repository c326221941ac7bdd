//! Cache module for storing API responses on disk
//!
//! Persists forecast responses as JSON files with expiry timestamps.
//! Expired entries are returned with an `is_expired` flag instead of being
//! dropped, so the client can keep showing the last good forecast when the
//! network is unavailable.

mod manager;

pub use manager::{CacheManager, CachedData};
