// crates/restodb-core/src/cache.rs

//! Caller-owned dataset cache.
//!
//! There is no process-wide memoization: whoever drives the interaction
//! loop owns a [`DatasetCache`] and decides when to invalidate it. Detecting
//! that a source changed is the caller's job.

use crate::error::Result;
use crate::loader::LoadOptions;
use crate::model::RestaurantDb;
use std::collections::HashMap;
use std::sync::Arc;

/// Normalized datasets keyed by source URI, shared read-only via `Arc`.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<String, Arc<RestaurantDb>>,
    options: LoadOptions,
}

impl DatasetCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            entries: HashMap::new(),
            options,
        }
    }

    /// Cached dataset for `source`, loading it over the network/disk on a miss.
    pub fn get_or_load(&mut self, source: &str) -> Result<Arc<RestaurantDb>> {
        let options = self.options.clone();
        self.get_or_load_with(source, |s| RestaurantDb::load_with(s, &options))
    }

    /// Like [`get_or_load`](Self::get_or_load) with a custom loader.
    ///
    /// A failed load leaves the cache untouched.
    pub fn get_or_load_with<F>(&mut self, source: &str, load: F) -> Result<Arc<RestaurantDb>>
    where
        F: FnOnce(&str) -> Result<RestaurantDb>,
    {
        if let Some(db) = self.entries.get(source) {
            tracing::trace!(source, "dataset cache hit");
            return Ok(Arc::clone(db));
        }
        let db = Arc::new(load(source)?);
        self.entries.insert(source.to_string(), Arc::clone(&db));
        Ok(db)
    }

    /// Seeds the cache, e.g. from a snapshot.
    pub fn insert(&mut self, source: &str, db: RestaurantDb) -> Arc<RestaurantDb> {
        let db = Arc::new(db);
        self.entries.insert(source.to_string(), Arc::clone(&db));
        db
    }

    /// Drops the entry for `source`; returns whether one existed.
    pub fn invalidate(&mut self, source: &str) -> bool {
        let removed = self.entries.remove(source).is_some();
        if removed {
            tracing::debug!(source, "dataset cache invalidated");
        }
        removed
    }

    /// Invalidates and loads `source` again.
    pub fn reload(&mut self, source: &str) -> Result<Arc<RestaurantDb>> {
        self.invalidate(source);
        self.get_or_load(source)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestoError;
    use crate::model::build_restodb;
    use std::cell::Cell;

    #[test]
    fn loads_once_until_invalidated() {
        let calls = Cell::new(0);
        let load = |_: &str| {
            calls.set(calls.get() + 1);
            Ok(build_restodb(Vec::new()))
        };
        let mut cache = DatasetCache::default();

        let a = cache.get_or_load_with("mem://a", load).unwrap();
        let b = cache.get_or_load_with("mem://a", load).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.get(), 1);

        assert!(cache.invalidate("mem://a"));
        assert!(!cache.invalidate("mem://a"));
        cache.get_or_load_with("mem://a", load).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let mut cache = DatasetCache::default();
        let err = cache
            .get_or_load_with("mem://x", |_| Err(RestoError::NotFound("x".into())))
            .unwrap_err();
        assert!(matches!(err, RestoError::NotFound(_)));
        assert!(cache.is_empty());
    }
}
