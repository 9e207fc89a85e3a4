//! Error types for customization operations

use thiserror::Error;

/// Errors that can occur while customizing a template
#[derive(Debug, Error)]
pub enum CustomizationError {
    /// Preset id does not name a built-in preset
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Section id does not exist on the target template
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Variable name does not exist on the target template
    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    /// Options overlay could not be deserialized
    #[error("Invalid customization payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Result type for customization operations
pub type CustomizationResult<T> = std::result::Result<T, CustomizationError>;
