//! Multi-format export pipeline
//!
//! Turns a composed template into HTML and PDF artifacts. The manager
//! composes through `template_composer`, then dispatches to the two format
//! strategies; external rendering, compression, and branding lookup sit
//! behind async collaborator traits with in-memory defaults.
//!
//! ```
//! use export_pipeline::{ExportManager, ExportOptions};
//! use template_model::{Template, TemplateData, TemplateSection};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread()
//! #     .enable_time()
//! #     .build()
//! #     .unwrap();
//! # rt.block_on(async {
//! let mut template = Template::new("Note");
//! template
//!     .schema
//!     .sections
//!     .push(TemplateSection::new("body", "Body", "<p>Hello {{name}}</p>"));
//!
//! let data = TemplateData::new().set("name", serde_json::json!("Ada"));
//! let mut manager = ExportManager::default();
//! let result = manager
//!     .export_document(&template, &data, &ExportOptions::html())
//!     .await;
//! assert!(result.success);
//! # });
//! ```

pub mod collaborators;
pub mod html;
pub mod manager;
pub mod options;
pub mod pdf;
pub mod profile;
pub mod result;

pub use collaborators::{
    BrandingProvider, InMemoryBrandingProvider, PassthroughCompressor, PdfCompressor, PdfRenderer,
    StubPdfRenderer,
};
pub use html::HtmlExportService;
pub use manager::ExportManager;
pub use options::{
    ClientCustomization, DeliveryOptions, ExportFormat, ExportOptions, ExportQuality,
    HtmlExportOptions, HtmlMode, OptimizationFlags, Theme, Watermark,
};
pub use pdf::{PdfExportOptions, PdfExportService};
pub use profile::{ClientCustomizationProfile, ExportOverrides, ExportPreferences, ProfileStore};
pub use result::{
    BatchExportItem, BatchExportSummary, ExportIssue, ExportResult, HtmlArtifact, PdfArtifact,
    PdfMetadata,
};
