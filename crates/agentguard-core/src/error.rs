//! Error types for the AgentGuard scanning engine.
//!
//! [`ScanError`] covers the failures that escape to callers. Failures
//! local to one rule or one file inside a directory scan are contained
//! and reported through `tracing` instead (see [`crate::scan::Scanner`]).

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the scanning API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScanError {
    /// The scan target does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The target exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O or decode error.
        #[source]
        source: std::io::Error,
    },

    /// A severity name outside `{critical, high, medium, low, info}`.
    #[error("unknown severity: {value}")]
    UnknownSeverity {
        /// The rejected input.
        value: String,
    },
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScanError>;
