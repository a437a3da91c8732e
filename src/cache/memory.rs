//! In-memory cache store

use std::collections::HashMap;
use std::sync::Mutex;

use super::{CacheEntry, CacheError, CacheStore};
use crate::data::Category;

/// Cache store that keeps entries in process memory
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<Category, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of categories currently stored
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Category, CacheEntry>> {
        // A poisoned map is still structurally valid
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, category: Category) -> Option<CacheEntry> {
        self.lock().get(&category).cloned()
    }

    fn put(&self, category: Category, entry: &CacheEntry) -> Result<(), CacheError> {
        self.lock().insert(category, entry.clone());
        Ok(())
    }
}
