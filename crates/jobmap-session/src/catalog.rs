//! Builds the session's job catalog from seed data.
//!
//! Every seed location is normalized and geocoded; lookups fan out
//! concurrently and fan back in seed order. The finished catalog is cached
//! until [`CatalogLoader::invalidate`] so repeated loads cost nothing.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use jobmap_core::{builtin_seed, load_seed_file, AppConfig, DeepLink, JobRecord, SeedJob};
use jobmap_geocode::GeocodeResolver;

use crate::error::SessionError;

const DEFAULT_MAX_CONCURRENT: usize = 8;

pub struct CatalogLoader {
    resolver: Arc<GeocodeResolver>,
    seed: Vec<SeedJob>,
    max_concurrent: usize,
    loaded: tokio::sync::Mutex<Option<Arc<[JobRecord]>>>,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(resolver: Arc<GeocodeResolver>, seed: Vec<SeedJob>) -> Self {
        Self {
            resolver,
            seed,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            loaded: tokio::sync::Mutex::new(None),
        }
    }

    /// Uses the configured seed file if one is set, else the built-in seed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the seed file cannot be loaded.
    pub fn from_config(
        config: &AppConfig,
        resolver: Arc<GeocodeResolver>,
    ) -> Result<Self, SessionError> {
        let seed = match &config.catalog_path {
            Some(path) => load_seed_file(path)?,
            None => builtin_seed(),
        };
        Ok(Self::new(resolver, seed).with_max_concurrent(config.geocode_max_concurrent))
    }

    /// Caps the number of geocode lookups in flight during a load.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    #[must_use]
    pub fn resolver(&self) -> &Arc<GeocodeResolver> {
        &self.resolver
    }

    /// Returns the enriched catalog, building it on first call.
    ///
    /// Concurrent callers wait for the same build.
    pub async fn load_catalog(&self) -> Arc<[JobRecord]> {
        let mut slot = self.loaded.lock().await;
        if let Some(catalog) = slot.as_ref() {
            return Arc::clone(catalog);
        }

        let catalog: Arc<[JobRecord]> = self.build().await.into();
        let unresolved = catalog.iter().filter(|j| !j.is_plottable()).count();
        tracing::info!(
            jobs = catalog.len(),
            unresolved,
            "job catalog loaded"
        );
        *slot = Some(Arc::clone(&catalog));
        catalog
    }

    /// Drops the cached catalog. The geocode cache is untouched, so the
    /// next load only goes to the network for locations that failed before.
    pub async fn invalidate(&self) {
        *self.loaded.lock().await = None;
    }

    async fn build(&self) -> Vec<JobRecord> {
        let resolver = &self.resolver;
        stream::iter(self.seed.iter().cloned().map(JobRecord::from_seed))
            .map(|mut job| async move {
                if let Some(position) = resolver.resolve(&job.location).await {
                    job.resolve_position(position);
                }
                job
            })
            .buffered(self.max_concurrent)
            .collect()
            .await
    }
}

/// The first `limit` catalog entries with links that open the map on each.
#[must_use]
pub fn trending(catalog: &[JobRecord], limit: usize) -> Vec<(&JobRecord, DeepLink)> {
    catalog
        .iter()
        .take(limit)
        .map(|job| (job, DeepLink::for_job(job)))
        .collect()
}
