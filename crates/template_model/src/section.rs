//! Template sections - reusable content blocks

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-section styling overrides
///
/// All fields are optional; unset fields fall through to the template's
/// styling tokens when the stylesheet is generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionStyling {
    /// Background color
    pub background: Option<String>,
    /// CSS padding shorthand
    pub padding: Option<String>,
    /// CSS margin shorthand
    pub margin: Option<String>,
    /// CSS border shorthand
    pub border: Option<String>,
    /// Text alignment (left, center, right, justify)
    pub text_align: Option<String>,
    /// Free-form property -> value pairs appended verbatim
    #[serde(default)]
    pub custom: HashMap<String, String>,
}

impl SectionStyling {
    pub fn is_empty(&self) -> bool {
        self.background.is_none()
            && self.padding.is_none()
            && self.margin.is_none()
            && self.border.is_none()
            && self.text_align.is_none()
            && self.custom.is_empty()
    }
}

/// A reusable content block within a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    /// Unique within a template
    pub id: String,
    /// Display name
    pub name: String,
    /// Markup with `{{var}}` placeholders and block helpers
    pub content: String,
    /// Assembly position; sections are concatenated in ascending order
    pub order: u32,
    /// Names of the template variables this section references
    #[serde(default)]
    pub variables: Vec<String>,
    /// Per-section styling overrides
    #[serde(default)]
    pub styling: SectionStyling,
}

impl TemplateSection {
    /// Create a new section
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            order: 0,
            variables: Vec::new(),
            styling: SectionStyling::default(),
        }
    }

    /// Set the assembly order
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Declare the variables this section references
    pub fn with_variables(mut self, names: Vec<&str>) -> Self {
        self.variables = names.into_iter().map(String::from).collect();
        self
    }

    /// Set the section styling
    pub fn with_styling(mut self, styling: SectionStyling) -> Self {
        self.styling = styling;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builder() {
        let section = TemplateSection::new("intro", "Introduction", "<p>{{greeting}}</p>")
            .with_order(2)
            .with_variables(vec!["greeting"]);
        assert_eq!(section.order, 2);
        assert_eq!(section.variables, vec!["greeting".to_string()]);
        assert!(section.styling.is_empty());
    }
}
