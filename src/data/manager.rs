//! Cached record retrieval
//!
//! The [`DataManager`] hands out records that are never older than its ttl:
//! a fresh cache entry is decoded and returned, anything else triggers a full
//! paginated re-fetch that overwrites the cache.

use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::client::{FetchError, RecordSource};
use super::records::{Film, Person, Planet, RecordSet, Resource, Species, Starship, Vehicle};
use super::Category;
use crate::cache::{CacheEntry, CacheError, CacheStore};

/// Default freshness window in days
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// Errors that can occur when retrieving records
#[derive(Debug, Error)]
pub enum DataError {
    /// The API could not be reached or answered with an error
    #[error("Failed to fetch {category}: {source}")]
    Fetch {
        category: Category,
        #[source]
        source: FetchError,
    },

    /// Fetched records could not be persisted
    #[error("Failed to cache {category}: {source}")]
    Cache {
        category: Category,
        #[source]
        source: CacheError,
    },

    /// The API returned records that do not match the expected shape
    #[error("Malformed {category} records from the API: {source}")]
    Decode {
        category: Category,
        #[source]
        source: serde_json::Error,
    },

    /// The API returned no records at all
    #[error("The API returned no {0} records")]
    Empty(Category),
}

/// Retrieves category records through a cache
pub struct DataManager<S, F> {
    store: S,
    source: F,
    ttl: Duration,
}

impl<S: CacheStore, F: RecordSource> DataManager<S, F> {
    /// Creates a manager with the default 7-day freshness window
    pub fn new(store: S, source: F) -> Self {
        Self {
            store,
            source,
            ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }

    /// Overrides the freshness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn films(&self) -> Result<Vec<Film>, DataError> {
        self.records().await
    }

    pub async fn people(&self) -> Result<Vec<Person>, DataError> {
        self.records().await
    }

    pub async fn planets(&self) -> Result<Vec<Planet>, DataError> {
        self.records().await
    }

    pub async fn species(&self) -> Result<Vec<Species>, DataError> {
        self.records().await
    }

    pub async fn starships(&self) -> Result<Vec<Starship>, DataError> {
        self.records().await
    }

    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, DataError> {
        self.records().await
    }

    /// Retrieves one category as a tagged record set
    pub async fn record_set(&self, category: Category) -> Result<RecordSet, DataError> {
        match category {
            Category::Films => self.tagged::<Film>().await,
            Category::People => self.tagged::<Person>().await,
            Category::Planets => self.tagged::<Planet>().await,
            Category::Species => self.tagged::<Species>().await,
            Category::Starships => self.tagged::<Starship>().await,
            Category::Vehicles => self.tagged::<Vehicle>().await,
        }
    }

    async fn tagged<T: Resource>(&self) -> Result<RecordSet, DataError> {
        self.records::<T>().await.map(T::into_record_set)
    }

    /// Retrieves the given categories, one after another
    ///
    /// The first failing category aborts the whole call.
    pub async fn fetch_data(
        &self,
        categories: &[Category],
    ) -> Result<BTreeMap<Category, RecordSet>, DataError> {
        let mut all = BTreeMap::new();
        for &category in categories {
            info!("Fetching {} data", category);
            let records = self.record_set(category).await?;
            all.insert(category, records);
        }
        Ok(all)
    }

    /// Retrieves every category in fetch order
    pub async fn fetch_all_data(&self) -> Result<BTreeMap<Category, RecordSet>, DataError> {
        let all = self.fetch_data(&Category::ALL).await?;
        info!("All data fetched and cached");
        Ok(all)
    }

    /// Returns cached records when fresh, otherwise re-fetches and caches them
    pub async fn records<T: Resource>(&self) -> Result<Vec<T>, DataError> {
        let category = T::CATEGORY;

        if let Some(entry) = self.store.get(category) {
            if entry.is_fresh(Utc::now(), self.ttl) {
                match decode::<T>(category, &entry.data) {
                    Ok(records) => {
                        debug!("Cache hit for {} ({} records)", category, records.len());
                        return Ok(records);
                    }
                    Err(e) => warn!("Cached {} data is unusable, re-fetching: {}", category, e),
                }
            } else {
                debug!("Cache for {} is stale (fetched {})", category, entry.timestamp);
            }
        } else {
            debug!("Cache miss for {}", category);
        }

        self.refresh(category).await
    }

    /// Fetches every page, validates the records and overwrites the cache
    async fn refresh<T: Resource>(&self, category: Category) -> Result<Vec<T>, DataError> {
        info!("Fetching {} from the API", category);
        let raw = self
            .source
            .fetch_pages(category)
            .await
            .map_err(|source| DataError::Fetch { category, source })?;

        if raw.is_empty() {
            return Err(DataError::Empty(category));
        }

        let records = decode::<T>(category, &raw)?;

        self.store
            .put(category, &CacheEntry::new(raw))
            .map_err(|source| DataError::Cache { category, source })?;

        info!("Cached {} {} records", records.len(), category);
        Ok(records)
    }
}

/// Decodes raw API records into their typed form
fn decode<T: Resource>(category: Category, raw: &[Value]) -> Result<Vec<T>, DataError> {
    raw.iter()
        .map(|value| T::deserialize(value))
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| DataError::Decode { category, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FileCacheStore, MemoryCacheStore};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Record source that serves canned records and counts fetches
    #[derive(Default)]
    struct FakeSource {
        records: HashMap<Category, Vec<Value>>,
        fail: bool,
        calls: Mutex<Vec<Category>>,
    }

    impl FakeSource {
        fn with_all_categories() -> Self {
            let mut records = HashMap::new();
            for category in Category::ALL {
                records.insert(category, sample_records(category));
            }
            Self {
                records,
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn calls_for(&self, category: Category) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| **c == category)
                .count()
        }

        fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl RecordSource for FakeSource {
        async fn fetch_pages(&self, category: Category) -> Result<Vec<Value>, FetchError> {
            self.calls.lock().unwrap().push(category);
            if self.fail {
                return Err(FetchError::Status {
                    status: 500,
                    url: format!("http://fake/{}/", category),
                });
            }
            Ok(self.records.get(&category).cloned().unwrap_or_default())
        }
    }

    fn sample_records(category: Category) -> Vec<Value> {
        let base = format!("https://swapi.dev/api/{}/", category);
        match category {
            Category::Films => vec![
                json!({ "title": "A New Hope", "episode_id": 4, "url": format!("{base}1/") }),
                json!({
                    "title": "The Empire Strikes Back",
                    "episode_id": 5,
                    "url": format!("{base}2/"),
                }),
            ],
            _ => vec![
                json!({ "name": format!("{category} one"), "url": format!("{base}1/") }),
                json!({ "name": format!("{category} two"), "url": format!("{base}2/") }),
            ],
        }
    }

    fn memory_manager(source: FakeSource) -> DataManager<MemoryCacheStore, FakeSource> {
        DataManager::new(MemoryCacheStore::new(), source)
    }

    #[tokio::test]
    async fn test_second_call_within_window_is_served_from_cache() {
        let manager = memory_manager(FakeSource::with_all_categories());

        let first = manager.films().await.expect("First call should fetch");
        let second = manager.films().await.expect("Second call should hit cache");

        assert_eq!(first, second);
        assert_eq!(manager.source.calls_for(Category::Films), 1);
    }

    #[tokio::test]
    async fn test_every_category_fetches_at_most_once_within_window() {
        let manager = memory_manager(FakeSource::with_all_categories());

        manager.fetch_all_data().await.unwrap();
        manager.fetch_all_data().await.unwrap();

        for category in Category::ALL {
            assert_eq!(manager.source.calls_for(category), 1, "{category}");
        }
    }

    #[tokio::test]
    async fn test_stale_entry_is_refreshed() {
        let manager = memory_manager(FakeSource::with_all_categories());
        let old = CacheEntry::at(
            Utc::now() - Duration::days(8),
            vec![json!({ "name": "Old Planet", "url": "https://swapi.dev/api/planets/99/" })],
        );
        manager.store.put(Category::Planets, &old).unwrap();

        let planets = manager.planets().await.expect("Stale cache should re-fetch");

        assert_eq!(manager.source.calls_for(Category::Planets), 1);
        assert_eq!(planets.len(), 2);
        assert!(planets.iter().all(|p| p.name != "Old Planet"));
        let stored = manager.store.get(Category::Planets).unwrap();
        assert!(stored.timestamp > old.timestamp);
        assert_eq!(stored.data, sample_records(Category::Planets));
    }

    #[tokio::test]
    async fn test_fresh_entry_is_returned_without_fetching() {
        let manager = memory_manager(FakeSource::with_all_categories());
        let cached = CacheEntry::at(
            Utc::now() - Duration::days(6),
            vec![json!({ "name": "Cached Ship", "url": "https://swapi.dev/api/starships/9/" })],
        );
        manager.store.put(Category::Starships, &cached).unwrap();

        let ships = manager.starships().await.unwrap();

        assert_eq!(ships.len(), 1);
        assert_eq!(ships[0].name, "Cached Ship");
        assert_eq!(manager.source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_custom_ttl_is_respected() {
        let manager =
            memory_manager(FakeSource::with_all_categories()).with_ttl(Duration::hours(1));
        let cached =
            CacheEntry::at(Utc::now() - Duration::hours(2), sample_records(Category::People));
        manager.store.put(Category::People, &cached).unwrap();

        manager.people().await.unwrap();

        assert_eq!(manager.source.calls_for(Category::People), 1);
    }

    #[tokio::test]
    async fn test_undecodable_cache_entry_triggers_refetch() {
        let manager = memory_manager(FakeSource::with_all_categories());
        let broken = CacheEntry::new(vec![json!({ "unexpected": true })]);
        manager.store.put(Category::Species, &broken).unwrap();

        let species = manager.species().await.unwrap();

        assert_eq!(species.len(), 2);
        assert_eq!(manager.source.calls_for(Category::Species), 1);
    }

    #[tokio::test]
    async fn test_network_failure_without_cache_is_an_error() {
        let manager = memory_manager(FakeSource::failing());

        let err = manager.vehicles().await.expect_err("Should fail without cache");

        assert!(matches!(
            err,
            DataError::Fetch {
                category: Category::Vehicles,
                ..
            }
        ));
        assert!(manager.store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_is_an_error_and_not_cached() {
        let manager = memory_manager(FakeSource::default());

        let err = manager.films().await.expect_err("Empty result should fail");

        assert!(matches!(err, DataError::Empty(Category::Films)));
        assert!(manager.store.get(Category::Films).is_none());
    }

    #[tokio::test]
    async fn test_malformed_api_records_are_not_cached() {
        let mut source = FakeSource::default();
        source
            .records
            .insert(Category::Films, vec![json!({ "episode_id": "four" })]);
        let manager = memory_manager(source);

        let err = manager.films().await.expect_err("Malformed records should fail");

        assert!(matches!(err, DataError::Decode { category: Category::Films, .. }));
        assert!(manager.store.get(Category::Films).is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_returns_exactly_six_nonempty_categories() {
        let manager = memory_manager(FakeSource::with_all_categories());

        let all = manager.fetch_all_data().await.expect("Fetch all should succeed");

        assert_eq!(all.len(), 6);
        for category in Category::ALL {
            let set = all.get(&category).expect("Category should be present");
            assert_eq!(set.category(), category);
            assert!(!set.is_empty());
        }
    }

    #[tokio::test]
    async fn test_fetch_data_only_touches_requested_categories() {
        let manager = memory_manager(FakeSource::with_all_categories());

        let some = manager
            .fetch_data(&[Category::Vehicles, Category::Films])
            .await
            .unwrap();

        let keys: Vec<Category> = some.keys().copied().collect();
        assert_eq!(keys, vec![Category::Films, Category::Vehicles]);
        assert!(matches!(
            some.get(&Category::Films),
            Some(RecordSet::Films(films)) if films.len() == 2
        ));
        assert_eq!(manager.source.total_calls(), 2);
        assert_eq!(manager.source.calls_for(Category::People), 0);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_at_first_failure() {
        let mut source = FakeSource::with_all_categories();
        source.records.remove(&Category::Planets);
        let manager = memory_manager(source);

        let err = manager.fetch_all_data().await.expect_err("Planets should fail");

        assert!(matches!(err, DataError::Empty(Category::Planets)));
        assert_eq!(manager.source.calls_for(Category::Species), 0);
    }

    #[tokio::test]
    async fn test_empty_file_cache_creates_entry_with_current_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let manager = DataManager::new(
            FileCacheStore::new(temp_dir.path()),
            FakeSource::with_all_categories(),
        );

        let before = Utc::now();
        let films = manager.films().await.unwrap();
        let after = Utc::now();

        assert_eq!(films.len(), 2);
        assert!(temp_dir.path().join("films.json").exists());
        let entry = manager.store().get(Category::Films).unwrap();
        assert!(entry.timestamp >= before && entry.timestamp <= after);
        assert_eq!(entry.data, sample_records(Category::Films));
    }

    #[tokio::test]
    async fn test_eight_day_old_file_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCacheStore::new(temp_dir.path());
        let old = CacheEntry::at(Utc::now() - Duration::days(8), sample_records(Category::Films));
        store.put(Category::Films, &old).unwrap();
        let manager = DataManager::new(store, FakeSource::with_all_categories());

        manager.films().await.unwrap();

        assert_eq!(manager.source.calls_for(Category::Films), 1);
        let entry = manager.store().get(Category::Films).unwrap();
        assert!(Utc::now() - entry.timestamp < Duration::minutes(1));
    }
}
