//! Advisory validation of customization options
//!
//! Validation never mutates its input and never fails the process: it
//! returns a report with field-level errors and warnings, and the caller
//! decides whether to proceed on warnings.

use crate::options::CustomizationOptions;
use serde::{Deserialize, Serialize};
use template_model::{is_valid_color, Template};

/// One actionable finding, tied to the field that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `colors.primary`
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The outcome of validating an options bundle against a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_findings(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validate an options bundle against a target template.
pub fn validate_customization(
    _template: &Template,
    options: &CustomizationOptions,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Some(colors) = &options.colors {
        let fields = [
            ("colors.primary", &colors.primary),
            ("colors.secondary", &colors.secondary),
            ("colors.accent", &colors.accent),
            ("colors.background", &colors.background),
            ("colors.text", &colors.text),
        ];
        for (field, value) in fields {
            if let Some(color) = value {
                if !is_valid_color(color) {
                    errors.push(ValidationIssue::new(
                        field,
                        format!(
                            "'{}' is not a valid color; use 6-digit hex, rgb() or rgba()",
                            color
                        ),
                    ));
                }
            }
        }
        // Low-contrast risk is advisory, never an error
        if let (Some(primary), Some(background)) = (&colors.primary, &colors.background) {
            if primary == background {
                warnings.push(ValidationIssue::new(
                    "colors.primary",
                    "primary color equals background color; text may be unreadable",
                ));
            }
        }
    }

    if let Some(typography) = &options.typography {
        if let Some(family) = &typography.font_family {
            if family.trim().is_empty() {
                errors.push(ValidationIssue::new(
                    "typography.font_family",
                    "font family must not be empty",
                ));
            }
        }
        if let Some(heading) = &typography.heading_family {
            if heading.trim().is_empty() {
                errors.push(ValidationIssue::new(
                    "typography.heading_family",
                    "heading font family must not be empty",
                ));
            }
        }
    }

    if let Some(layout) = &options.layout {
        if let Some(columns) = layout.columns {
            if columns == 0 || columns > 4 {
                errors.push(ValidationIssue::new(
                    "layout.columns",
                    format!("column count must be between 1 and 4, got {}", columns),
                ));
            }
        }
    }

    ValidationReport::from_findings(errors, warnings)
}
