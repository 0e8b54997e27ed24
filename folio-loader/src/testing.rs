//! Test doubles shared by the loader's unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use folio_core::error::{FolioError, Result};
use folio_core::traits::ResourceFetcher;

/// Scripted fetcher that records every call.
///
/// Unknown identifiers fail with `ResourceNotFound`. Every fetch yields to
/// the scheduler once, so joined loads genuinely interleave.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, std::result::Result<String, String>>>,
    calls: Mutex<HashMap<String, usize>>,
    gate: Option<Arc<Notify>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(self, resource_id: &str, handle: &str) -> Self {
        self.set_response(resource_id, Ok(handle.to_string()));
        self
    }

    pub fn fail(self, resource_id: &str, reason: &str) -> Self {
        self.set_response(resource_id, Err(reason.to_string()));
        self
    }

    /// Holds every fetch until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_response(&self, resource_id: &str, response: std::result::Result<String, String>) {
        self.responses.lock().insert(resource_id.to_string(), response);
    }

    pub fn calls(&self, resource_id: &str) -> usize {
        self.calls.lock().get(resource_id).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, resource_id: &str) -> Result<String> {
        *self.calls.lock().entry(resource_id.to_string()).or_default() += 1;

        tokio::task::yield_now().await;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let response = self.responses.lock().get(resource_id).cloned();
        match response {
            Some(Ok(handle)) => Ok(handle),
            Some(Err(reason)) => Err(FolioError::FetchFailed {
                resource_id: resource_id.to_string(),
                reason,
            }),
            None => Err(FolioError::ResourceNotFound(resource_id.to_string())),
        }
    }
}
