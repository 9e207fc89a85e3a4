//! Export results
//!
//! All failure states resolve to structured result objects; nothing in the
//! pipeline propagates a panic to the caller.

use crate::options::{ExportFormat, HtmlMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rendered HTML artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlArtifact {
    pub content: String,
    pub mode: HtmlMode,
    pub size_bytes: usize,
}

impl HtmlArtifact {
    pub fn new(content: String, mode: HtmlMode) -> Self {
        let size_bytes = content.len();
        Self {
            content,
            mode,
            size_bytes,
        }
    }
}

/// PDF document metadata carried alongside the bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,
}

/// A rendered PDF artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfArtifact {
    pub bytes: Vec<u8>,
    /// Estimated, not measured; see the PDF service's page-count heuristic
    pub page_count: usize,
    pub metadata: PdfMetadata,
}

/// One recorded failure, tagged with the sub-pipeline that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportIssue {
    /// The requested format this failure belongs to, if any
    pub format: Option<ExportFormat>,
    pub message: String,
}

impl ExportIssue {
    pub fn for_format(format: ExportFormat, message: impl Into<String>) -> Self {
        Self {
            format: Some(format),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            format: None,
            message: message.into(),
        }
    }
}

/// The unified outcome of one export request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportResult {
    /// True iff at least one requested format produced output
    pub success: bool,
    pub html: Option<HtmlArtifact>,
    pub pdf: Option<PdfArtifact>,
    pub errors: Vec<ExportIssue>,
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

impl ExportResult {
    /// Total artifact size in bytes.
    pub fn total_size(&self) -> usize {
        self.html.as_ref().map(|h| h.size_bytes).unwrap_or(0)
            + self.pdf.as_ref().map(|p| p.bytes.len()).unwrap_or(0)
    }
}

/// One item in a batch request
#[derive(Debug, Clone)]
pub struct BatchExportItem {
    pub template: template_model::Template,
    pub data: template_model::TemplateData,
    /// Overrides the batch-level options when present
    pub options: Option<crate::options::ExportOptions>,
}

/// Accumulated outcome of a batch export
#[derive(Debug, Clone, Default)]
pub struct BatchExportSummary {
    pub successful: usize,
    pub failed: usize,
    pub total_size: usize,
    pub total_time_ms: u64,
    /// Per-item results, in input order
    pub results: Vec<ExportResult>,
    /// Per-item failure messages, tagged by input index
    pub errors: Vec<(usize, String)>,
}
