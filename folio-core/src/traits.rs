//! Common traits for Folio.
//!
//! These traits define the seams between the loader and the outside world,
//! enabling substitution with test doubles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// RESOURCE FETCHER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for resolving a resource identifier to a concrete handle.
///
/// Implementations might use:
/// - A local asset directory (see `folio-fetch`'s `FsFetcher`)
/// - An HTTP asset host (see `folio-fetch`'s `HttpFetcher`)
/// - An in-memory table (for testing)
///
/// # Contract
/// Exactly one attempt per call. Implementations must not retry internally;
/// any timeout policy belongs to the implementation itself.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Resolves `resource_id` to a handle (typically a URL or public path).
    async fn fetch(&self, resource_id: &str) -> Result<String>;
}

#[async_trait]
impl<F: ResourceFetcher + ?Sized> ResourceFetcher for Arc<F> {
    async fn fetch(&self, resource_id: &str) -> Result<String> {
        (**self).fetch(resource_id).await
    }
}

#[async_trait]
impl<F: ResourceFetcher + ?Sized> ResourceFetcher for Box<F> {
    async fn fetch(&self, resource_id: &str) -> Result<String> {
        (**self).fetch(resource_id).await
    }
}
