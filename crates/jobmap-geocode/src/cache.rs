//! In-memory geocode cache backed by a durable [`CacheStore`].
//!
//! Lifecycle: construct (optionally hydrating from the store), serve lookups
//! and inserts for the session, then [`GeocodeCache::flush`] at session end.
//! The map is guarded by a `std::sync::Mutex` that is never held across an
//! `.await`; writes to the store are serialized by a separate async lock so
//! the last write on disk always carries the newest snapshot.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use jobmap_core::LatLng;

use crate::store::CacheStore;

pub struct GeocodeCache {
    entries: Mutex<HashMap<String, LatLng>>,
    store: CacheStore,
    persist_lock: tokio::sync::Mutex<()>,
}

impl GeocodeCache {
    /// An empty cache that persists to `store` but does not read from it.
    #[must_use]
    pub fn new(store: CacheStore) -> Self {
        Self::with_entries(store, HashMap::new())
    }

    /// A cache seeded from whatever `store` holds.
    ///
    /// An unreadable or corrupt store is logged and treated as empty.
    #[must_use]
    pub fn hydrate(store: CacheStore) -> Self {
        let entries = match store.load() {
            Ok(entries) => {
                tracing::debug!(entries = entries.len(), "hydrated geocode cache");
                entries
            }
            Err(e) => {
                tracing::warn!(error = %e, "geocode cache store unreadable, starting empty");
                HashMap::new()
            }
        };
        Self::with_entries(store, entries)
    }

    fn with_entries(store: CacheStore, entries: HashMap<String, LatLng>) -> Self {
        Self {
            entries: Mutex::new(entries),
            store,
            persist_lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<LatLng> {
        self.lock().get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, LatLng> {
        self.lock().clone()
    }

    /// Records a resolution and flushes the cache to the store.
    ///
    /// Concurrent inserts for one key are last-write-wins. A failed flush is
    /// logged and otherwise ignored; the in-memory entry stays usable.
    pub async fn insert(&self, key: &str, position: LatLng) {
        self.lock().insert(key.to_owned(), position);
        self.flush().await;
    }

    /// Writes the current contents to the store, best-effort.
    pub async fn flush(&self) {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&snapshot).await {
            tracing::warn!(error = %e, "failed to persist geocode cache");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, LatLng>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
