//! Error types for the Phalanx library.
//!
//! This module provides error handling for all Phalanx operations. All errors
//! are represented by the [`PhalanxError`] enum, which carries a description
//! of what went wrong.
//!
//! # Examples
//!
//! ```
//! use phalanx::error::{PhalanxError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(PhalanxError::configuration("worker count must be at least 2"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Phalanx operations.
///
/// This enum represents all possible errors that can occur in the Phalanx
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum PhalanxError {
    /// I/O errors (reading data files, writing reports, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid container or executor configuration (bad worker counts, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation not supported by the container kind
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A partition task failed inside the worker pool
    #[error("Worker error: {0}")]
    Worker(String),

    /// Worker pool construction or dispatch errors
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PhalanxError.
pub type Result<T> = std::result::Result<T, PhalanxError>;

impl PhalanxError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        PhalanxError::Configuration(msg.into())
    }

    /// Create a new unsupported operation error.
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        PhalanxError::UnsupportedOperation(msg.into())
    }

    /// Create a new worker error.
    pub fn worker<S: Into<String>>(msg: S) -> Self {
        PhalanxError::Worker(msg.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        PhalanxError::ThreadPool(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PhalanxError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        PhalanxError::Other(format!("Internal error: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PhalanxError::configuration("worker count must be at least 2");
        assert_eq!(
            error.to_string(),
            "Configuration error: worker count must be at least 2"
        );

        let error = PhalanxError::unsupported("remove_all on immutable container");
        assert_eq!(
            error.to_string(),
            "Unsupported operation: remove_all on immutable container"
        );

        let error = PhalanxError::worker("partition task 3 failed");
        assert_eq!(error.to_string(), "Worker error: partition task 3 failed");

        let error = PhalanxError::internal("missing partial");
        assert_eq!(error.to_string(), "Error: Internal error: missing partial");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let phalanx_error = PhalanxError::from(io_error);

        match phalanx_error {
            PhalanxError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
