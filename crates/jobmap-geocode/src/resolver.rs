//! Cache-first location resolution.
//!
//! [`GeocodeResolver::resolve`] never fails: a cache hit returns without
//! network traffic, a miss issues one geocoding request, and any failure is
//! logged and reported as `None` without touching the cache so a later call
//! can retry.

use jobmap_core::{normalize, AppConfig, LatLng};

use crate::cache::GeocodeCache;
use crate::client::GeocodeClient;
use crate::error::GeocodeError;
use crate::store::CacheStore;

pub struct GeocodeResolver {
    /// `None` in offline mode: only cached locations resolve.
    client: Option<GeocodeClient>,
    cache: GeocodeCache,
}

impl GeocodeResolver {
    #[must_use]
    pub fn new(client: GeocodeClient, cache: GeocodeCache) -> Self {
        Self {
            client: Some(client),
            cache,
        }
    }

    /// A resolver that answers from `cache` only.
    #[must_use]
    pub fn offline(cache: GeocodeCache) -> Self {
        Self {
            client: None,
            cache,
        }
    }

    /// Builds the client and hydrated cache described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP client cannot be built (including
    /// a missing API key when not offline).
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        let store = if config.cache_persist {
            CacheStore::file_in(&config.cache_dir)
        } else {
            CacheStore::Disabled
        };
        let cache = GeocodeCache::hydrate(store);

        if config.offline {
            tracing::info!(cached = cache.len(), "geocoding offline, cache only");
            return Ok(Self::offline(cache));
        }
        Ok(Self::new(GeocodeClient::from_config(config)?, cache))
    }

    #[must_use]
    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    /// Resolves an already-normalized location string.
    pub async fn resolve(&self, normalized: &str) -> Option<LatLng> {
        if normalized.is_empty() {
            return None;
        }

        if let Some(hit) = self.cache.get(normalized) {
            tracing::trace!(location = %normalized, "geocode cache hit");
            return Some(hit);
        }

        let Some(client) = &self.client else {
            tracing::debug!(location = %normalized, "offline and not cached");
            return None;
        };

        match client.geocode(normalized).await {
            Ok(Some(position)) => {
                tracing::debug!(location = %normalized, %position, "geocoded location");
                self.cache.insert(normalized, position).await;
                Some(position)
            }
            Ok(None) => {
                tracing::warn!(location = %normalized, "geocoding returned no results");
                None
            }
            Err(e) => {
                tracing::warn!(location = %normalized, error = %e, "geocoding failed");
                None
            }
        }
    }

    /// Normalizes raw user text, then resolves it.
    pub async fn resolve_raw(&self, raw: &str) -> Option<LatLng> {
        self.resolve(&normalize(raw)).await
    }

    /// Writes the cache to its store. Call at session end.
    pub async fn flush(&self) {
        self.cache.flush().await;
    }
}
