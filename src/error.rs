//! Error types for SlateKV
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using SlateError
pub type Result<T> = std::result::Result<T, SlateError>;

/// Unified error type for SlateKV operations
#[derive(Debug, Error)]
pub enum SlateError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Startup Errors (fatal)
    // -------------------------------------------------------------------------
    /// The log file exists but could not be read
    #[error("Could not open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log line could not be decoded; `line` is 1-based
    #[error("Invalid data at line {line}: {reason}\n\t{content}")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Mutation Errors
    // -------------------------------------------------------------------------
    #[error("Key \"{0}\" already exists.")]
    DuplicateKey(String),

    #[error("Invalid key {0:?}: keys must be non-empty and free of tabs and newlines")]
    InvalidKey(String),

    /// Append or compaction I/O failure
    #[error("Write to {} failed: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Link Errors
    // -------------------------------------------------------------------------
    #[error("Slug can only contain numbers, lowercase letters, dashes and underscores: {0:?}")]
    InvalidSlug(String),

    #[error("URL must be a valid http(s) URL: {0:?}")]
    InvalidUrl(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Store worker has stopped")]
    WorkerStopped,
}

impl SlateError {
    /// Wrap an I/O failure that happened while writing `path`
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlateError::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the caller can recover from this error and keep using the store
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SlateError::DuplicateKey(_)
                | SlateError::InvalidKey(_)
                | SlateError::InvalidSlug(_)
                | SlateError::InvalidUrl(_)
        )
    }
}
