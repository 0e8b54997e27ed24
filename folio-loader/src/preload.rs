//! Batch preloading.

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, instrument};

use folio_core::traits::ResourceFetcher;
use folio_core::types::{PreloadFailure, PreloadProgress, PreloadReport};

use crate::loader::ResourceLoader;

impl<F: ResourceFetcher + 'static> ResourceLoader<F> {
    /// Loads every identifier concurrently and reports the aggregate outcome.
    ///
    /// Each identifier gets its own independent [`load`](Self::load) with no
    /// fallback. The returned report is always complete: this only returns
    /// once every load has settled.
    pub async fn preload<S: AsRef<str>>(&self, resource_ids: &[S]) -> PreloadReport {
        self.preload_with_progress(resource_ids, |_| {}).await
    }

    /// Like [`preload`](Self::preload), invoking `on_progress` after each
    /// settlement, in completion order.
    #[instrument(skip_all, fields(total = resource_ids.len()))]
    pub async fn preload_with_progress<S, P>(
        &self,
        resource_ids: &[S],
        mut on_progress: P,
    ) -> PreloadReport
    where
        S: AsRef<str>,
        P: FnMut(&PreloadProgress),
    {
        let mut report = PreloadReport::new(resource_ids.len());

        let mut pending: FuturesUnordered<_> = resource_ids
            .iter()
            .enumerate()
            .map(|(index, id)| async move {
                let id = id.as_ref();
                (index, id, self.load(id, None).await)
            })
            .collect();

        while let Some((index, resource_id, state)) = pending.next().await {
            if state.is_succeeded() {
                report.loaded_count += 1;
            } else {
                let error = state
                    .error()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown error".to_string());
                debug!(resource_id, index, %error, "Preload failed");
                report.errors.push(PreloadFailure {
                    resource_id: resource_id.to_string(),
                    error,
                    index,
                });
            }

            on_progress(&PreloadProgress {
                total: report.total_count,
                settled: report.settled_count(),
                loaded: report.loaded_count,
                last_resource_id: resource_id.to_string(),
            });
        }

        report.is_complete = true;
        info!(
            loaded = report.loaded_count,
            failed = report.errors.len(),
            "Preload complete"
        );
        report
    }
}
