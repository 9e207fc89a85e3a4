//! Error types for the template data model

use thiserror::Error;

/// Errors that can occur when building or validating model types
#[derive(Debug, Error)]
pub enum ModelError {
    /// Color string is not 6-digit hex, rgb() or rgba()
    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    /// Version string is not a valid semver triple
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    /// Two variables share a name within one template
    #[error("Duplicate variable name: {0}")]
    DuplicateVariable(String),

    /// Two sections share an id within one template
    #[error("Duplicate section id: {0}")]
    DuplicateSection(String),

    /// Serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for model operations
pub type ModelResult<T> = std::result::Result<T, ModelError>;
