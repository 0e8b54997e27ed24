//! Cache-fronted resource loader.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn, Instrument};

use folio_cache::TtlCache;
use folio_core::constants::resource_cache_key;
use folio_core::error::{FolioError, Result};
use folio_core::traits::ResourceFetcher;
use folio_core::types::{LoadSource, LoadState, ResourceClass};

/// Resolves resource identifiers through a shared [`TtlCache`] in front of a
/// [`ResourceFetcher`].
///
/// Resolution:
/// 1. Reject an empty identifier
/// 2. Serve a fresh `resource_<id>` cache entry without touching the fetcher
/// 3. Otherwise call the fetcher exactly once
/// 4. Cache the result with its resource-class TTL, or fall back / fail
///
/// The loader never returns an error; every outcome is a [`LoadState`].
/// Concurrent loads of the same identifier are not coalesced: each one
/// fetches, and the last `set` wins.
///
/// The fetch and the cache store run on a spawned task. A caller that drops
/// a pending load stops waiting, but the fetch still settles and warms the
/// cache for later callers.
pub struct ResourceLoader<F> {
    cache: Arc<TtlCache<String>>,
    fetcher: Arc<F>,
}

impl<F> Clone for ResourceLoader<F> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F: ResourceFetcher + 'static> ResourceLoader<F> {
    /// Creates a loader over a shared cache.
    pub fn new(cache: Arc<TtlCache<String>>, fetcher: F) -> Self {
        Self::with_shared_fetcher(cache, Arc::new(fetcher))
    }

    /// Creates a loader whose fetcher is shared with other owners.
    pub fn with_shared_fetcher(cache: Arc<TtlCache<String>>, fetcher: Arc<F>) -> Self {
        Self { cache, fetcher }
    }

    /// The cache this loader reads and writes.
    pub fn cache(&self) -> &Arc<TtlCache<String>> {
        &self.cache
    }

    /// The fetch collaborator.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Loads a resource, substituting `fallback` if the fetch fails.
    #[instrument(skip(self))]
    pub async fn load(&self, resource_id: &str, fallback: Option<&str>) -> LoadState<String> {
        match self.resolve_immediate(resource_id) {
            Some(state) => state,
            None => self.fetch_and_store(resource_id, fallback).await,
        }
    }

    /// Invalidates the cached entry for `resource_id`, then loads it again.
    ///
    /// The fetcher is always called (unless the identifier is empty).
    #[instrument(skip(self))]
    pub async fn retry(&self, resource_id: &str, fallback: Option<&str>) -> LoadState<String> {
        self.invalidate(resource_id);
        self.load(resource_id, fallback).await
    }

    /// Drops the cached entry for `resource_id`.
    pub fn invalidate(&self, resource_id: &str) {
        self.cache.delete(&resource_cache_key(resource_id));
    }

    /// Settles a load without suspending, if possible.
    ///
    /// Returns `Failed` for an empty identifier and `Succeeded` for a cache
    /// hit; `None` means the fetcher has to be consulted.
    pub(crate) fn resolve_immediate(&self, resource_id: &str) -> Option<LoadState<String>> {
        if resource_id.trim().is_empty() {
            warn!("Load requested without a resource identifier");
            return Some(LoadState::failed(FolioError::MissingResourceId));
        }

        let key = resource_cache_key(resource_id);
        let cached = self.cache.get(&key)?;
        debug!(resource_id, "Cache hit");
        Some(LoadState::succeeded(cached, LoadSource::Cache))
    }

    /// Performs the single fetch for a cache miss and settles the attempt.
    pub(crate) async fn fetch_and_store(
        &self,
        resource_id: &str,
        fallback: Option<&str>,
    ) -> LoadState<String> {
        debug!(resource_id, "Cache miss, fetching");

        let task = tokio::spawn({
            let loader = self.clone();
            let resource_id = resource_id.to_string();
            async move { loader.fetch_through(&resource_id).await }.in_current_span()
        });

        let result = task.await.unwrap_or_else(|e| {
            Err(FolioError::FetchFailed {
                resource_id: resource_id.to_string(),
                reason: format!("fetch task failed: {}", e),
            })
        });

        match result {
            Ok(handle) => LoadState::succeeded(handle, LoadSource::Fetch),
            Err(err) => match fallback {
                Some(fallback) => {
                    warn!(resource_id, error = %err, fallback, "Load failed, using fallback");
                    LoadState::fallback(fallback.to_string(), err)
                }
                None => {
                    warn!(resource_id, error = %err, "Load failed");
                    LoadState::failed(err)
                }
            },
        }
    }

    /// Fetches and stores with the resource-class TTL. Runs detached from
    /// the caller.
    async fn fetch_through(&self, resource_id: &str) -> Result<String> {
        let handle = self.fetcher.fetch(resource_id).await?;
        let class = ResourceClass::from_resource_id(resource_id);
        self.cache
            .set_for_class(&resource_cache_key(resource_id), handle.clone(), class);
        info!(resource_id, %class, "Resolved resource");
        Ok(handle)
    }
}
