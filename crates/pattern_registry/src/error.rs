//! Error types for the pattern registry

use thiserror::Error;

/// Errors that can occur in registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Id names neither a catalog pattern nor a stored custom pattern
    #[error("Pattern not found: {0}")]
    PatternNotFound(String),

    /// A custom pattern's base must be a catalog pattern, never another
    /// custom pattern
    #[error("Custom pattern base must be a catalog pattern: {0}")]
    CustomBaseNotCatalog(String),

    /// Stored customizations could not be deserialized
    #[error("Invalid stored customizations for '{id}': {source}")]
    InvalidCustomizations {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Rating outside the accepted range
    #[error("Rating {0} is outside the range 0..=5")]
    RatingOutOfRange(f64),
}

impl From<pattern_library::LibraryError> for RegistryError {
    fn from(err: pattern_library::LibraryError) -> Self {
        match err {
            pattern_library::LibraryError::PatternNotFound(id) => RegistryError::PatternNotFound(id),
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
