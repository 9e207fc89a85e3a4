//! Error types for the pattern library

use thiserror::Error;

/// Errors that can occur when using the pattern catalog
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Pattern id does not name a catalog pattern
    #[error("Pattern not found: {0}")]
    PatternNotFound(String),
}

/// Result type for library operations
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
