//! Visibility-triggered loading.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::debug;

use folio_core::traits::ResourceFetcher;
use folio_core::types::LoadState;

use crate::binding::ResourceBinding;
use crate::loader::ResourceLoader;

/// A resource that is not requested until it becomes visible.
///
/// Before the visibility signal the state is always `Pending` and the
/// fetcher is never called. The signal is one-shot: the first
/// [`mark_visible`](Self::mark_visible) performs the load, later calls do
/// nothing.
pub struct LazyResource<F> {
    binding: ResourceBinding<F>,
    visible: AtomicBool,
}

impl<F: ResourceFetcher + 'static> LazyResource<F> {
    /// Creates an unarmed lazy resource.
    pub fn new(
        loader: ResourceLoader<F>,
        resource_id: impl Into<String>,
        fallback: Option<String>,
    ) -> Self {
        Self {
            binding: ResourceBinding::new(loader, resource_id, fallback),
            visible: AtomicBool::new(false),
        }
    }

    /// Returns true once the visibility signal has fired.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoadState<String> {
        self.binding.state()
    }

    /// Subscribes to lifecycle changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<String>> {
        self.binding.subscribe()
    }

    /// Fires the visibility signal.
    ///
    /// Returns the terminal state of the load on the first call and `None`
    /// on every later call.
    pub async fn mark_visible(&self) -> Option<LoadState<String>> {
        if self.visible.swap(true, Ordering::AcqRel) {
            return None;
        }
        debug!(resource_id = self.binding.resource_id(), "Became visible, loading");
        Some(self.binding.load().await)
    }

    /// Waits for `signal`, then fires the visibility signal.
    pub async fn load_when<S>(&self, signal: S) -> Option<LoadState<String>>
    where
        S: Future<Output = ()>,
    {
        signal.await;
        self.mark_visible().await
    }

    /// Retries a visible resource. Before visibility this stays `Pending`
    /// and does not fetch.
    pub async fn retry(&self) -> LoadState<String> {
        if !self.is_visible() {
            return LoadState::Pending;
        }
        self.binding.retry().await
    }
}
