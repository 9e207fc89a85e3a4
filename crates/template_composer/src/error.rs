//! Error types for template composition

use thiserror::Error;

/// Errors that can occur while composing a template
#[derive(Debug, Error)]
pub enum CompositionError {
    /// One or more required variables had neither a supplied value nor a
    /// default. Every missing name is reported so callers can show the
    /// complete fix-list at once.
    #[error("Missing required variables: {}", .0.join(", "))]
    MissingRequiredVariables(Vec<String>),

    /// A `{{#each}}` or `{{#if}}` block is unbalanced or malformed
    #[error("Malformed placeholder in section '{section}': {detail}")]
    MalformedPlaceholder { section: String, detail: String },
}

/// Result type for composition operations
pub type CompositionResult<T> = std::result::Result<T, CompositionError>;
