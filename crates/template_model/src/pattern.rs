//! Patterns - immutable catalog archetypes and user-derived variants

use crate::section::TemplateSection;
use crate::styling::StyleTokens;
use crate::variable::TemplateVariable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pattern categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Business,
    Marketing,
    Report,
    Letter,
    Invoice,
    Newsletter,
}

impl std::fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternCategory::Business => write!(f, "business"),
            PatternCategory::Marketing => write!(f, "marketing"),
            PatternCategory::Report => write!(f, "report"),
            PatternCategory::Letter => write!(f, "letter"),
            PatternCategory::Invoice => write!(f, "invoice"),
            PatternCategory::Newsletter => write!(f, "newsletter"),
        }
    }
}

/// How involved a pattern's structure is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// A catalog entry that can instantiate a `Template`
///
/// Patterns are immutable once published; user variants go through
/// `CustomPattern` and never mutate the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePattern {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PatternCategory,
    pub complexity: Complexity,
    pub variables: Vec<TemplateVariable>,
    pub sections: Vec<TemplateSection>,
    pub styling: StyleTokens,
    /// Prose describing when to reach for this pattern
    pub use_case: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A user-derived variant of a catalog pattern
///
/// `customizations` is a strict overlay over the base pattern; fields the
/// overlay does not mention keep the base value. The base must always be a
/// catalog pattern, never another custom pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPattern {
    pub id: String,
    pub base_pattern_id: String,
    pub name: String,
    /// Serialized `CustomizationOptions` overlay
    pub customizations: serde_json::Value,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
}

impl CustomPattern {
    pub fn new(
        base_pattern_id: impl Into<String>,
        name: impl Into<String>,
        customizations: serde_json::Value,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            base_pattern_id: base_pattern_id.into(),
            name: name.into(),
            customizations,
            created_by: created_by.into(),
            created_at: Utc::now(),
            is_public: false,
        }
    }

    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }
}

/// Accumulated usage signal for one pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternUsage {
    pub pattern_id: String,
    pub usage_count: u64,
    pub last_used: Option<DateTime<Utc>>,
    /// Running weighted mean of feedback ratings, bounded to [0, 5]
    pub average_rating: f64,
    pub feedback_count: u64,
}

impl PatternUsage {
    pub fn new(pattern_id: impl Into<String>) -> Self {
        Self {
            pattern_id: pattern_id.into(),
            usage_count: 0,
            last_used: None,
            average_rating: 0.0,
            feedback_count: 0,
        }
    }
}
