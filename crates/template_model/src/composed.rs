//! Composed templates - the materialized, render-ready document

use crate::data::TemplateData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fully substituted output bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledContent {
    pub html: String,
    pub css: String,
    pub js: Option<String>,
    #[serde(default)]
    pub assets: Vec<crate::template::Asset>,
}

/// Bookkeeping about one composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionMetadata {
    pub composed_at: DateTime<Utc>,
    pub render_time_ms: u64,
    /// Derived from (template id, version, data hash, branding hash)
    pub cache_key: String,
    /// Variable names that contributed to the output
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// The materialized, render-ready document for one data+branding combination
///
/// Composition is a pure function of its inputs: identical inputs produce
/// identical `compiled_content` (the `composed_at` timestamp excepted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedTemplate {
    pub template_id: String,
    pub template_version: String,
    pub data: TemplateData,
    pub compiled_content: CompiledContent,
    pub metadata: CompositionMetadata,
}

impl ComposedTemplate {
    /// Plain-text length of the HTML with tags stripped; used by the PDF
    /// pipeline's page-count heuristic.
    pub fn plain_text_len(&self) -> usize {
        let mut len = 0;
        let mut in_tag = false;
        for ch in self.compiled_content.html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => len += 1,
                _ => {}
            }
        }
        len
    }
}
