//! Unified error handling for consolidation runs.
//!
//! Only conditions that abort a run are errors; recoverable conditions
//! (unavailable authority, unclassifiable features) are diagnostics carried
//! in [`RunSummary`](crate::RunSummary) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ConsolidateError>;

/// Errors that abort a consolidation run.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    /// The input collection file does not exist.
    #[error("input collection not found: {path}")]
    InputMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a valid GeoJSON FeatureCollection.
    #[error("input collection is malformed: {reason}")]
    InputMalformed { reason: String },

    /// A group reached the merger without any coordinate sequence.
    ///
    /// The grouper only admits line geometries, so this is a caller defect
    /// rather than a data condition.
    #[error("route group {key} contributed no coordinate sequences")]
    EmptyGroup { key: String },

    /// Failed to serialize the output collection.
    #[error("failed to serialize output collection")]
    OutputSerialize(#[from] serde_json::Error),

    /// Any other I/O failure while reading or writing files.
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
