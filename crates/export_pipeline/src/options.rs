//! Export configuration
//!
//! These are the externally visible knobs a caller (UI, CLI, API route)
//! sets. `format` drives which sub-pipelines run; everything else threads
//! into the HTML and PDF services.

use serde::{Deserialize, Serialize};

/// Which sub-pipelines to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Html,
    Both,
}

impl ExportFormat {
    pub fn wants_html(&self) -> bool {
        matches!(self, ExportFormat::Html | ExportFormat::Both)
    }

    pub fn wants_pdf(&self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Both)
    }
}

/// Output quality, forwarded to the renderer and compressor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportQuality {
    Draft,
    #[default]
    Standard,
    High,
}

/// Color theme applied to HTML output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    /// Follows the reader's `prefers-color-scheme`
    Auto,
}

/// Watermark layered behind PDF content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
    pub text: String,
    /// Degrees, applied verbatim
    pub rotation: f32,
    /// 0.0..=1.0, applied verbatim
    pub opacity: f32,
}

impl Watermark {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rotation: -45.0,
            opacity: 0.12,
        }
    }
}

/// Per-client customization applied at export time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientCustomization {
    /// Branding id resolved through the branding provider
    pub branding_id: Option<String>,
    pub theme: Option<Theme>,
    /// Extra CSS appended after generated styles
    pub custom_css: Option<String>,
    /// Extra JS included in standalone HTML output
    pub custom_js: Option<String>,
    pub watermark: Option<Watermark>,
}

/// Optimization request flags
///
/// Failures in any of these are downgraded to warnings; the unoptimized
/// artifact is still returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationFlags {
    /// Whitespace-collapsing HTML minification (idempotent)
    pub minify: bool,
    /// PDF byte compression through the codec collaborator
    pub compress: bool,
    /// Fixed-breakpoint responsive CSS
    pub responsive: bool,
    /// Accessibility meta/landmarks in standalone HTML
    pub accessibility: bool,
    /// SEO meta tags in standalone HTML
    pub seo: bool,
}

/// Delivery preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    /// Base filename without extension
    pub filename: Option<String>,
    /// Inline generated CSS into the HTML document; when false, standalone
    /// output links a sibling `<basename>.css` stylesheet instead
    #[serde(default = "default_true")]
    pub inline_assets: bool,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            filename: None,
            inline_assets: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    #[serde(default)]
    pub quality: ExportQuality,
    /// Document shape for the HTML sub-pipeline
    #[serde(default)]
    pub html_mode: HtmlMode,
    pub client_customization: Option<ClientCustomization>,
    #[serde(default)]
    pub optimization: OptimizationFlags,
    #[serde(default)]
    pub delivery: DeliveryOptions,
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            quality: ExportQuality::default(),
            html_mode: HtmlMode::default(),
            client_customization: None,
            optimization: OptimizationFlags::default(),
            delivery: DeliveryOptions::default(),
        }
    }

    pub fn with_html_mode(mut self, mode: HtmlMode) -> Self {
        self.html_mode = mode;
        self
    }

    pub fn pdf() -> Self {
        Self::new(ExportFormat::Pdf)
    }

    pub fn html() -> Self {
        Self::new(ExportFormat::Html)
    }

    pub fn both() -> Self {
        Self::new(ExportFormat::Both)
    }

    pub fn with_quality(mut self, quality: ExportQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_customization(mut self, customization: ClientCustomization) -> Self {
        self.client_customization = Some(customization);
        self
    }

    pub fn with_optimization(mut self, optimization: OptimizationFlags) -> Self {
        self.optimization = optimization;
        self
    }
}

/// HTML document structure produced by the HTML service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HtmlMode {
    /// Full `<html>` document with meta tags
    #[default]
    Standalone,
    /// Scoped `<div>` fragment with scoped `<style>`
    Embedded,
    /// Bare inner HTML, no wrapper
    Fragment,
}

/// Options for the HTML sub-pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlExportOptions {
    #[serde(default)]
    pub mode: HtmlMode,
    #[serde(default)]
    pub optimization: OptimizationFlags,
    pub theme: Option<Theme>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
    pub title: Option<String>,
    /// Inline CSS into standalone output; when false a `<link>` to
    /// `<stylesheet>.css` is emitted instead
    #[serde(default = "default_true")]
    pub inline_assets: bool,
    /// Basename for the linked stylesheet when CSS is not inlined
    pub stylesheet: Option<String>,
    /// Include a page-view analytics stub in standalone output
    #[serde(default)]
    pub analytics_stub: bool,
}

impl Default for HtmlExportOptions {
    fn default() -> Self {
        Self {
            mode: HtmlMode::default(),
            optimization: OptimizationFlags::default(),
            theme: None,
            custom_css: None,
            custom_js: None,
            title: None,
            inline_assets: true,
            stylesheet: None,
            analytics_stub: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dispatch() {
        assert!(ExportFormat::Both.wants_html());
        assert!(ExportFormat::Both.wants_pdf());
        assert!(ExportFormat::Html.wants_html());
        assert!(!ExportFormat::Html.wants_pdf());
        assert!(!ExportFormat::Pdf.wants_html());
    }

    #[test]
    fn test_options_builders() {
        let options = ExportOptions::pdf().with_quality(ExportQuality::High);
        assert_eq!(options.format, ExportFormat::Pdf);
        assert_eq!(options.quality, ExportQuality::High);
        assert!(!options.optimization.compress);
    }
}
