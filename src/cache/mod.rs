//! Cache module for storing fetched records
//!
//! A [`CacheStore`] keeps one [`CacheEntry`] per resource category. The
//! production store writes JSON files to disk; an in-memory store with the same
//! contract is used for tests and can back callers that need no persistence.
//! Freshness is decided by the caller from the entry's timestamp.

mod file;
mod memory;

pub use file::{EntryState, EntryStatus, FileCacheStore};
pub use memory::MemoryCacheStore;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::data::Category;

/// Errors that can occur when writing to a cache store
#[derive(Debug, Error)]
pub enum CacheError {
    /// Directory creation or file write failed
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The entry could not be serialized
    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The records of one category together with the time they were fetched
///
/// Serialized as `{ "timestamp": "<RFC 3339>", "data": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// When the records were fetched
    pub timestamp: DateTime<Utc>,
    /// Raw records as returned by the API
    pub data: Vec<Value>,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time
    pub fn new(data: Vec<Value>) -> Self {
        Self::at(Utc::now(), data)
    }

    /// Creates an entry with an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, data: Vec<Value>) -> Self {
        Self { timestamp, data }
    }

    /// Time elapsed since the entry was fetched
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.timestamp
    }

    /// Whether the entry may be reused: `now - timestamp < ttl`
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Per-category storage for cache entries
pub trait CacheStore {
    /// Reads the entry for a category
    ///
    /// Returns `None` if the entry is missing or cannot be read; callers treat
    /// that the same as a stale entry.
    fn get(&self, category: Category) -> Option<CacheEntry>;

    /// Replaces the entry for a category
    fn put(&self, category: Category, entry: &CacheEntry) -> Result<(), CacheError>;
}
