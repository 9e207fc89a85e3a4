//! Template variables - named placeholders a template consumes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The declared type of a template variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    Text,
    Number,
    Date,
    Boolean,
    Array,
    Object,
}

impl Default for VariableType {
    fn default() -> Self {
        VariableType::Text
    }
}

/// Optional constraints attached to a variable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableValidation {
    /// Regex pattern the string form must match
    pub pattern: Option<String>,
    /// Minimum numeric value
    pub min: Option<f64>,
    /// Maximum numeric value
    pub max: Option<f64>,
    /// Allowed values (enum-like variables)
    pub options: Option<Vec<String>>,
}

/// A named placeholder a template consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// Name used in `{{name}}` placeholders; unique within a template
    pub name: String,
    /// Declared type
    pub var_type: VariableType,
    /// Whether composition fails when no value and no default is present
    pub required: bool,
    /// Fallback value when the caller supplies none
    pub default_value: Option<Value>,
    /// Human-readable description for editors
    pub description: Option<String>,
    /// Optional constraints
    pub validation: Option<VariableValidation>,
}

impl TemplateVariable {
    /// Create an optional text variable
    pub fn new(name: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            name: name.into(),
            var_type,
            required: false,
            default_value: None,
            description: None,
            validation: None,
        }
    }

    /// Create a required variable
    pub fn required(name: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            required: true,
            ..Self::new(name, var_type)
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set validation constraints
    pub fn with_validation(mut self, validation: VariableValidation) -> Self {
        self.validation = Some(validation);
        self
    }
}
