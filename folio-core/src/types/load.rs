//! Load lifecycle types.
//!
//! Every `load`/`retry` runs one instance of a small state machine:
//!
//! ```text
//! Pending ──► Succeeded   (cache hit, fetch success, fallback substitution)
//!    │
//!    └──────► Failed      (fetch failure without fallback, missing identifier)
//! ```
//!
//! `Succeeded` and `Failed` are terminal for that invocation.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Where a successful value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    /// Served from a fresh cache entry; the fetcher was not called.
    Cache,
    /// Produced by the fetch collaborator and written to the cache.
    Fetch,
    /// The fetch failed and the caller's fallback was substituted.
    Fallback,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadSource::Cache => write!(f, "cache"),
            LoadSource::Fetch => write!(f, "fetch"),
            LoadSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Lifecycle state of a single load attempt.
///
/// Errors are shared behind an [`Arc`] so states can be cloned into
/// watchers without losing the original error value.
#[derive(Clone, Debug, Default)]
pub enum LoadState<T> {
    /// The fetch is outstanding (or, for lazy resources, not yet armed).
    #[default]
    Pending,
    /// A value is available.
    Succeeded {
        /// The resolved (or fallback) value
        value: T,
        /// Where the value came from
        source: LoadSource,
        /// Underlying failure, retained for diagnostics when `source` is `Fallback`
        error: Option<Arc<FolioError>>,
    },
    /// The load failed and no fallback was available.
    Failed {
        /// The failure that ended the attempt
        error: Arc<FolioError>,
    },
}

impl<T> LoadState<T> {
    /// A successful state with no diagnostic error.
    pub fn succeeded(value: T, source: LoadSource) -> Self {
        LoadState::Succeeded {
            value,
            source,
            error: None,
        }
    }

    /// A fallback substitution that keeps the underlying error.
    pub fn fallback(value: T, error: FolioError) -> Self {
        LoadState::Succeeded {
            value,
            source: LoadSource::Fallback,
            error: Some(Arc::new(error)),
        }
    }

    /// A failed state.
    pub fn failed(error: FolioError) -> Self {
        LoadState::Failed {
            error: Arc::new(error),
        }
    }

    /// Returns true while the attempt is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    /// Returns true if a value is available (including fallback values).
    pub fn is_succeeded(&self) -> bool {
        matches!(self, LoadState::Succeeded { .. })
    }

    /// Returns true if the attempt failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }

    /// Returns true once the attempt has settled either way.
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// The available value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Succeeded { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Consumes the state and returns the value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            LoadState::Succeeded { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Where the value came from, if the attempt succeeded.
    pub fn source(&self) -> Option<LoadSource> {
        match self {
            LoadState::Succeeded { source, .. } => Some(*source),
            _ => None,
        }
    }

    /// The failure or the diagnostic retained behind a fallback.
    pub fn error(&self) -> Option<&FolioError> {
        match self {
            LoadState::Succeeded { error, .. } => error.as_deref(),
            LoadState::Failed { error } => Some(error.as_ref()),
            LoadState::Pending => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for LoadState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Pending => write!(f, "pending"),
            LoadState::Succeeded { value, source, .. } => {
                write!(f, "succeeded ({}): {}", source, value)
            }
            LoadState::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        let state: LoadState<String> = LoadState::default();
        assert!(state.is_pending());
        assert!(!state.is_settled());
        assert!(state.value().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_fallback_keeps_error() {
        let state = LoadState::fallback(
            "/placeholder.svg".to_string(),
            FolioError::ResourceNotFound("missing.png".into()),
        );
        assert!(state.is_succeeded());
        assert_eq!(state.source(), Some(LoadSource::Fallback));
        assert_eq!(state.value().map(String::as_str), Some("/placeholder.svg"));
        assert!(matches!(state.error(), Some(FolioError::ResourceNotFound(_))));
    }

    #[test]
    fn test_failed_state() {
        let state: LoadState<String> = LoadState::failed(FolioError::MissingResourceId);
        assert!(state.is_failed());
        assert!(state.is_settled());
        assert!(state.clone().into_value().is_none());
        assert_eq!(state.to_string(), "failed: No resource identifier provided");
    }

    #[test]
    fn test_display_success() {
        let state = LoadState::succeeded("blob://abc".to_string(), LoadSource::Cache);
        assert_eq!(state.to_string(), "succeeded (cache): blob://abc");
    }
}
