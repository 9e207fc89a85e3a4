//! Template - a concrete, versioned document definition

use crate::error::ModelError;
use crate::page::PageSettings;
use crate::section::TemplateSection;
use crate::styling::StyleTokens;
use crate::variable::TemplateVariable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Layout-level settings for a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Number of content columns
    pub columns: Option<u32>,
    /// Header markup, rendered above the sections
    pub header: Option<String>,
    /// Footer markup, rendered below the sections
    pub footer: Option<String>,
    /// Whether header markup is rendered (toggle, not removal)
    #[serde(default = "default_true")]
    pub show_header: bool,
    /// Whether footer markup is rendered
    #[serde(default = "default_true")]
    pub show_footer: bool,
    /// Whether paginated output shows page numbers
    #[serde(default)]
    pub page_numbers: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            columns: None,
            header: None,
            footer: None,
            show_header: true,
            show_footer: true,
            page_numbers: false,
        }
    }
}

/// The declarative schema of a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSchema {
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    #[serde(default)]
    pub sections: Vec<TemplateSection>,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub styling: StyleTokens,
}

/// A binary or linked asset referenced by a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub mime_type: String,
    pub url: String,
}

/// Pre-built content carried alongside the schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateContent {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    pub js: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Descriptive metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for TemplateMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            tags: Vec::new(),
            category: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A document definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Semver string; the patch component increases on structural edits
    pub version: String,
    pub schema: TemplateSchema,
    #[serde(default)]
    pub content: TemplateContent,
    /// Required only when the export target is PDF
    pub page_settings: Option<PageSettings>,
    #[serde(default)]
    pub metadata: TemplateMetadata,
}

impl Template {
    /// Create an empty template with a fresh id at version 1.0.0
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            version: "1.0.0".to_string(),
            schema: TemplateSchema::default(),
            content: TemplateContent::default(),
            page_settings: None,
            metadata: TemplateMetadata::default(),
        }
    }

    /// Look up a variable declaration by name
    pub fn variable(&self, name: &str) -> Option<&TemplateVariable> {
        self.schema.variables.iter().find(|v| v.name == name)
    }

    /// Look up a section by id
    pub fn section(&self, id: &str) -> Option<&TemplateSection> {
        self.schema.sections.iter().find(|s| s.id == id)
    }

    /// Sections sorted by ascending assembly order (stable for ties)
    pub fn ordered_sections(&self) -> Vec<&TemplateSection> {
        let mut sections: Vec<&TemplateSection> = self.schema.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Bump the patch component and stamp `updated_at`.
    ///
    /// Call after any structural edit so versions stay monotonic.
    pub fn bump_version(&mut self) {
        if let Some((major_minor, patch)) = self.version.rsplit_once('.') {
            if let Ok(n) = patch.parse::<u64>() {
                self.version = format!("{}.{}", major_minor, n + 1);
            }
        }
        self.metadata.updated_at = Utc::now();
    }

    /// Validate structural invariants, collecting every violation.
    pub fn validate(&self) -> Vec<ModelError> {
        let mut errors = Vec::new();
        let mut seen_vars = HashSet::new();
        for var in &self.schema.variables {
            if !seen_vars.insert(var.name.as_str()) {
                errors.push(ModelError::DuplicateVariable(var.name.clone()));
            }
        }
        let mut seen_sections = HashSet::new();
        for section in &self.schema.sections {
            if !seen_sections.insert(section.id.as_str()) {
                errors.push(ModelError::DuplicateSection(section.id.clone()));
            }
        }
        if parse_version(&self.version).is_none() {
            errors.push(ModelError::InvalidVersion(self.version.clone()));
        }
        errors
    }
}

/// Parse a `major.minor.patch` version string
pub fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}
