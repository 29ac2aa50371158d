//! Custom error types for fqsort operations.

use thiserror::Error;

/// Result type alias for fqsort operations
pub type Result<T> = std::result::Result<T, FqsortError>;

/// Error type for fqsort operations
#[derive(Error, Debug)]
pub enum FqsortError {
    /// A sorter was run more than once
    #[error("Sorter for '{path}' has already run; a sorter is single use")]
    InvalidState {
        /// Path the sorter was built for
        path: String,
    },

    /// I/O failure (open, read, write or delete)
    #[error("I/O error on '{path}': {reason}")]
    Io {
        /// Path of the file involved
        path: String,
        /// What went wrong (e.g. "is a directory", "permission denied")
        reason: String,
    },

    /// Malformed record data
    #[error("Invalid FASTQ in '{path}': {reason}")]
    Format {
        /// Path of the file involved
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}

impl FqsortError {
    /// Build an [`FqsortError::Io`] from an OS error, keeping the path.
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        FqsortError::Io { path: path.into(), reason: err.to_string() }
    }
}
