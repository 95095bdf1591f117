//! Request-level errors.
//!
//! Per-tool failures never appear here. They are contained in the
//! [`ExtractionOutcome`](crate::ExtractionOutcome) of the report. Only
//! precondition failures that the caller must surface are modelled as
//! errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Precondition failures for a single engine request.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input path exists but is not a regular file.
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The input path exists but could not be examined.
    #[error("Cannot access {}: {source}", .path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The request itself is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type for engine requests.
pub type EngineResult<T> = Result<T, EngineError>;
