//! Remote asset host fetcher.
//!
//! Confirms an asset exists with a single `HEAD` request and hands back its
//! absolute URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use folio_core::constants::DEFAULT_TIMEOUT_SECS;
use folio_core::error::{FolioError, Result};
use folio_core::traits::ResourceFetcher;

/// HTTP fetcher configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpFetcherConfig {
    /// Base URL assets are resolved against (e.g. "https://cdn.example.com/assets/")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl HttpFetcherConfig {
    /// Creates a config for the given asset base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Resolves identifiers to URLs on a remote asset host.
pub struct HttpFetcher {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given config.
    pub fn with_config(config: HttpFetcherConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| FolioError::ConfigError(format!("Invalid asset base URL '{}': {}", base, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FolioError::HttpError(e.to_string()))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// The base URL identifiers are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the absolute URL for an identifier without issuing a request.
    pub fn resolve_url(&self, resource_id: &str) -> Result<Url> {
        let trimmed = resource_id.trim();
        if trimmed.is_empty() {
            return Err(FolioError::MissingResourceId);
        }
        // Absolute and scheme-relative identifiers would leave the asset host.
        if trimmed.starts_with("//") || Url::parse(trimmed).is_ok() {
            return Err(FolioError::InvalidResourceId(format!(
                "'{}' is not relative to the asset host",
                resource_id
            )));
        }

        let url = self
            .base_url
            .join(trimmed.trim_start_matches('/'))
            .map_err(|e| FolioError::InvalidResourceId(format!("{}: {}", resource_id, e)))?;

        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(FolioError::InvalidResourceId(format!(
                "'{}' escapes the asset base URL",
                resource_id
            )));
        }
        Ok(url)
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, resource_id: &str) -> Result<String> {
        let url = self.resolve_url(resource_id)?;

        let response = self
            .http_client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| FolioError::HttpError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FolioError::ResourceNotFound(resource_id.to_string()));
        }
        if !status.is_success() {
            return Err(FolioError::FetchFailed {
                resource_id: resource_id.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        debug!(resource_id, url = %url, "Resolved remote asset");
        Ok(url.to_string())
    }
}
