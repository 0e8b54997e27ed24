//! Observable load lifecycle for a single resource.

use tokio::sync::watch;
use tracing::instrument;

use folio_core::traits::ResourceFetcher;
use folio_core::types::LoadState;

use crate::loader::ResourceLoader;

/// Binds one resource identifier (and optional fallback) to a loader and
/// publishes its [`LoadState`] on a watch channel.
///
/// This is what a rendering layer holds: it reads [`state`](Self::state) to
/// pick between a spinner, the resource and an error affordance, and calls
/// [`retry`](Self::retry) from that affordance.
pub struct ResourceBinding<F> {
    resource_id: String,
    fallback: Option<String>,
    loader: ResourceLoader<F>,
    state: watch::Sender<LoadState<String>>,
}

impl<F: ResourceFetcher + 'static> ResourceBinding<F> {
    /// Creates a binding in the `Pending` state. Nothing is fetched until
    /// [`load`](Self::load) is called.
    pub fn new(
        loader: ResourceLoader<F>,
        resource_id: impl Into<String>,
        fallback: Option<String>,
    ) -> Self {
        let (state, _) = watch::channel(LoadState::Pending);
        Self {
            resource_id: resource_id.into(),
            fallback,
            loader,
            state,
        }
    }

    /// The bound resource identifier.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// The loader this binding resolves through.
    pub fn loader(&self) -> &ResourceLoader<F> {
        &self.loader
    }

    /// The fallback substituted on failure, if any.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoadState<String> {
        self.state.borrow().clone()
    }

    /// Subscribes to lifecycle changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<String>> {
        self.state.subscribe()
    }

    /// Runs one load attempt and returns its terminal state.
    ///
    /// Publishes `Pending` before suspending on the fetcher; an attempt that
    /// settles immediately (cache hit, missing identifier) publishes only its
    /// terminal state.
    #[instrument(skip(self), fields(resource_id = %self.resource_id))]
    pub async fn load(&self) -> LoadState<String> {
        let state = match self.loader.resolve_immediate(&self.resource_id) {
            Some(state) => state,
            None => {
                self.state.send_replace(LoadState::Pending);
                self.loader
                    .fetch_and_store(&self.resource_id, self.fallback.as_deref())
                    .await
            }
        };
        self.publish(state)
    }

    /// Invalidates the cached entry and runs a fresh attempt.
    #[instrument(skip(self), fields(resource_id = %self.resource_id))]
    pub async fn retry(&self) -> LoadState<String> {
        self.loader.invalidate(&self.resource_id);
        self.load().await
    }

    fn publish(&self, state: LoadState<String>) -> LoadState<String> {
        self.state.send_replace(state.clone());
        state
    }
}
