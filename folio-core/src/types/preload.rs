//! Batch preload reporting.

use serde::{Deserialize, Serialize};

/// A single failed resource within a preload batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadFailure {
    /// Identifier that failed to load
    pub resource_id: String,
    /// Rendered error message
    pub error: String,
    /// Position of the identifier in the requested batch
    pub index: usize,
}

/// Snapshot of a preload batch, emitted after every settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadProgress {
    /// Number of identifiers in the batch
    pub total: usize,
    /// Loads settled so far (success or failure)
    pub settled: usize,
    /// Loads that succeeded so far
    pub loaded: usize,
    /// Identifier whose settlement produced this snapshot
    pub last_resource_id: String,
}

/// Aggregate outcome of a preload batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadReport {
    /// Loads that succeeded
    pub loaded_count: usize,
    /// Number of identifiers requested
    pub total_count: usize,
    /// Failures, in settlement order
    pub errors: Vec<PreloadFailure>,
    /// Set once every load in the batch has settled
    pub is_complete: bool,
}

impl PreloadReport {
    /// Creates an in-progress report for a batch of `total_count` identifiers.
    pub fn new(total_count: usize) -> Self {
        Self {
            total_count,
            ..Default::default()
        }
    }

    /// Percentage of the batch that loaded successfully (100 for an empty batch).
    pub fn progress(&self) -> f64 {
        if self.total_count == 0 {
            100.0
        } else {
            (self.loaded_count as f64 / self.total_count as f64) * 100.0
        }
    }

    /// Number of loads that have settled either way.
    pub fn settled_count(&self) -> usize {
        self.loaded_count + self.errors.len()
    }

    /// Returns true if every load succeeded.
    pub fn all_loaded(&self) -> bool {
        self.is_complete && self.errors.is_empty()
    }
}
