//! File-backed cache store
//!
//! Stores each category as `{category}.json` in a single directory.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{CacheEntry, CacheError, CacheStore};
use crate::data::Category;

/// Manages reading and writing cache entries to disk
///
/// By default the cache lives in an XDG-compliant directory
/// (`~/.cache/swapi-explorer/` on Linux). Entries are overwritten wholesale on
/// every write and are never deleted by the application.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

/// What is on disk for a category
#[derive(Debug, Clone, PartialEq)]
pub enum EntryState {
    /// No cache file
    Missing,
    /// A file exists but cannot be parsed
    Corrupt,
    /// A readable entry
    Present {
        timestamp: DateTime<Utc>,
        records: usize,
    },
}

impl EntryState {
    /// Whether a readable entry is still inside the freshness window
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        match self {
            EntryState::Present { timestamp, .. } => now - *timestamp < ttl,
            EntryState::Missing | EntryState::Corrupt => false,
        }
    }
}

/// Cache status of a single category
#[derive(Debug, Clone, PartialEq)]
pub struct EntryStatus {
    pub category: Category,
    pub path: PathBuf,
    pub state: EntryState,
}

impl FileCacheStore {
    /// Creates a store rooted at the given directory
    ///
    /// The directory is created on first write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// XDG-compliant default cache directory
    ///
    /// Returns `None` if it cannot be determined (e.g., no home directory).
    pub fn default_dir() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "swapi-explorer")?;
        Some(project_dirs.cache_dir().to_path_buf())
    }

    /// Directory the store writes to
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to the cache file for a category
    pub fn cache_path(&self, category: Category) -> PathBuf {
        self.cache_dir.join(format!("{}.json", category))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads and parses a cache file, distinguishing missing from corrupt
    fn read_entry(&self, category: Category) -> Result<Option<CacheEntry>, String> {
        let path = self.cache_path(category);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("cannot read {}: {}", path.display(), e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    }

    /// Reports what is cached for every category
    pub fn status(&self) -> Vec<EntryStatus> {
        Category::ALL
            .iter()
            .map(|&category| {
                let state = match self.read_entry(category) {
                    Ok(Some(entry)) => EntryState::Present {
                        timestamp: entry.timestamp,
                        records: entry.data.len(),
                    },
                    Ok(None) => EntryState::Missing,
                    Err(_) => EntryState::Corrupt,
                };
                EntryStatus {
                    category,
                    path: self.cache_path(category),
                    state,
                }
            })
            .collect()
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, category: Category) -> Option<CacheEntry> {
        match self.read_entry(category) {
            Ok(entry) => entry,
            Err(reason) => {
                warn!("Ignoring {} cache: {}", category, reason);
                None
            }
        }
    }

    fn put(&self, category: Category, entry: &CacheEntry) -> Result<(), CacheError> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(entry)?;
        let path = self.cache_path(category);
        fs::write(&path, json)?;

        debug!("Wrote {} {} records to {}", entry.data.len(), category, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_cache() -> (FileCacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = FileCacheStore::new(temp_dir.path());
        (cache, temp_dir)
    }

    fn sample_records() -> Vec<serde_json::Value> {
        vec![
            json!({ "name": "Tatooine", "climate": "arid", "population": "200000" }),
            json!({ "name": "Alderaan", "climate": "temperate", "population": "2000000000" }),
        ]
    }

    #[test]
    fn test_put_creates_file_named_after_category() {
        let (cache, temp_dir) = create_test_cache();

        cache
            .put(Category::Planets, &CacheEntry::new(sample_records()))
            .expect("Write should succeed");

        let expected_path = temp_dir.path().join("planets.json");
        assert!(expected_path.exists(), "Cache file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["timestamp"].is_string());
        assert_eq!(value["data"][0]["name"], "Tatooine");
    }

    #[test]
    fn test_get_returns_none_for_missing_category() {
        let (cache, _temp_dir) = create_test_cache();
        assert!(cache.get(Category::Films).is_none());
    }

    #[test]
    fn test_get_returns_none_for_corrupt_file() {
        let (cache, temp_dir) = create_test_cache();
        fs::write(temp_dir.path().join("people.json"), "{ not json").unwrap();

        assert!(cache.get(Category::People).is_none());
    }

    #[test]
    fn test_get_returns_none_for_wrong_shape() {
        let (cache, temp_dir) = create_test_cache();
        // Bare record list, as older caches stored it
        fs::write(temp_dir.path().join("people.json"), r#"[{"name": "Leia"}]"#).unwrap();

        assert!(cache.get(Category::People).is_none());
    }

    #[test]
    fn test_roundtrip_preserves_record_content() {
        let (cache, _temp_dir) = create_test_cache();
        let entry = CacheEntry::new(sample_records());

        cache.put(Category::Planets, &entry).expect("Write should succeed");
        let read = cache.get(Category::Planets).expect("Should read cache");

        assert_eq!(read.data, entry.data);
        assert_eq!(
            serde_json::to_string(&read.data).unwrap(),
            serde_json::to_string(&entry.data).unwrap()
        );
        assert_eq!(read.timestamp, entry.timestamp);
    }

    #[test]
    fn test_put_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache").join("dir");
        let cache = FileCacheStore::new(nested_path.clone());

        cache
            .put(Category::Species, &CacheEntry::new(vec![]))
            .expect("Write should succeed");

        assert!(nested_path.join("species.json").exists());
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let (cache, _temp_dir) = create_test_cache();
        let old = CacheEntry::at(Utc::now() - Duration::days(8), sample_records());
        let new = CacheEntry::new(vec![json!({ "name": "Hoth" })]);

        cache.put(Category::Planets, &old).unwrap();
        cache.put(Category::Planets, &new).unwrap();

        let read = cache.get(Category::Planets).expect("Should read cache");
        assert_eq!(read, new);
    }

    #[test]
    fn test_status_reports_each_category() {
        let (cache, temp_dir) = create_test_cache();
        cache
            .put(Category::Planets, &CacheEntry::new(sample_records()))
            .unwrap();
        fs::write(temp_dir.path().join("films.json"), "garbage").unwrap();

        let status = cache.status();

        assert_eq!(status.len(), 6);
        let by_category = |c: Category| status.iter().find(|s| s.category == c).unwrap();
        assert_eq!(by_category(Category::Films).state, EntryState::Corrupt);
        assert_eq!(by_category(Category::People).state, EntryState::Missing);
        assert!(matches!(
            by_category(Category::Planets).state,
            EntryState::Present { records: 2, .. }
        ));
    }

    #[test]
    fn test_entry_state_freshness() {
        let now = Utc::now();
        let present = |age: i64| EntryState::Present {
            timestamp: now - Duration::days(age),
            records: 1,
        };
        assert!(present(1).is_fresh(now, Duration::days(7)));
        assert!(!present(8).is_fresh(now, Duration::days(7)));
        assert!(!EntryState::Missing.is_fresh(now, Duration::days(7)));
        assert!(!EntryState::Corrupt.is_fresh(now, Duration::days(7)));
    }

    #[test]
    fn test_default_dir_is_project_scoped() {
        if let Some(dir) = FileCacheStore::default_dir() {
            assert!(dir.to_string_lossy().contains("swapi-explorer"));
        }
        // Passes when no home directory is available (e.g., some CI sandboxes)
    }
}
