//! Error types for Folio.
//!
//! A single error hierarchy built with `thiserror`, shared by the fetch
//! collaborators, the contact relay and the command-line front end. The
//! resource loader never returns these directly; it folds them into
//! [`LoadState`](crate::types::LoadState).

use thiserror::Error;

use crate::constants::MISSING_RESOURCE_ID_MESSAGE;

/// Result type alias using `FolioError`.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Main error type for all Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    // ═══════════════════════════════════════════════════════════════════════════
    // RESOURCE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A load was attempted without a resource identifier.
    #[error("{}", MISSING_RESOURCE_ID_MESSAGE)]
    MissingResourceId,

    /// The identifier cannot address a resource (absolute path, `..`, bad URL).
    #[error("Invalid resource identifier: {0}")]
    InvalidResourceId(String),

    /// The resource does not exist.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The fetch collaborator failed for a reason other than absence.
    #[error("Failed to load resource '{resource_id}': {reason}")]
    FetchFailed {
        /// Identifier that was being fetched
        resource_id: String,
        /// Collaborator-supplied reason
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The email relay rejected a message.
    #[error("Failed to send message (HTTP {status}): {body}")]
    EmailSendFailed {
        /// HTTP status returned by the relay
        status: u16,
        /// Response body
        body: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE & SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FolioError {
    /// Returns true if repeating the same operation may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FolioError::HttpError(_)
                | FolioError::FetchFailed { .. }
                | FolioError::IoError(_)
        ) || matches!(self, FolioError::EmailSendFailed { status, .. } if *status >= 500)
    }

    /// Returns true if this is a caller input problem.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            FolioError::MissingResourceId
                | FolioError::InvalidResourceId(_)
                | FolioError::ValidationError(_)
        )
    }
}
