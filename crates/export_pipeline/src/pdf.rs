//! PDF export service
//!
//! Builds the paginated print document (page geometry CSS, watermark layer,
//! metadata) and drives the renderer collaborator. Page count is estimated
//! from text length, never measured; callers must treat it as approximate.

use crate::collaborators::PdfRenderer;
use crate::options::{ExportQuality, Watermark};
use crate::result::{PdfArtifact, PdfMetadata};
use chrono::Utc;
use template_model::{ComposedTemplate, MarginUnit, Orientation, PageSettings, PageSize};

/// Physical page size in millimeters, portrait
pub fn page_size_mm(size: PageSize) -> (f64, f64) {
    match size {
        PageSize::A4 => (210.0, 297.0),
        PageSize::A3 => (297.0, 420.0),
        PageSize::Letter => (215.9, 279.4),
        PageSize::Legal => (215.9, 355.6),
    }
}

/// Page size in CSS pixels at 96dpi, portrait. Feeds the page-count
/// estimate; physical output uses the mm table.
pub fn page_size_px(size: PageSize) -> (u32, u32) {
    match size {
        PageSize::A4 => (794, 1123),
        PageSize::A3 => (1123, 1587),
        PageSize::Letter => (816, 1056),
        PageSize::Legal => (816, 1344),
    }
}

/// Assumed glyph cell in px (8x16) with half the page area as body text.
const PX_PER_CHAR: usize = 8 * 16 * 2;

/// Characters-per-page constant for the page-count heuristic, derived
/// from the pixel table. Fixed per format.
fn avg_chars_per_page(size: PageSize) -> usize {
    let (width, height) = page_size_px(size);
    (width as usize * height as usize) / PX_PER_CHAR
}

fn oriented(dims: (f64, f64), orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Portrait => dims,
        Orientation::Landscape => (dims.1, dims.0),
    }
}

/// Options for the PDF sub-pipeline
#[derive(Debug, Clone, Default)]
pub struct PdfExportOptions {
    pub page: PageSettings,
    pub quality: ExportQuality,
    pub watermark: Option<Watermark>,
    /// Extra CSS appended after generated page rules
    pub custom_css: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Renders composed templates to PDF through a renderer collaborator
#[derive(Debug, Default)]
pub struct PdfExportService;

impl PdfExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render the composed template to PDF bytes.
    pub async fn export<R: PdfRenderer>(
        &self,
        composed: &ComposedTemplate,
        options: &PdfExportOptions,
        renderer: &R,
    ) -> Result<PdfArtifact, String> {
        let (html, css) = self.build_print_document(composed, options);
        let bytes = renderer.render(&html, &css, options.quality).await?;
        Ok(PdfArtifact {
            bytes,
            page_count: self.estimate_page_count(composed, options.page.size),
            metadata: self.build_metadata(composed, options),
        })
    }

    /// Assemble the HTML and CSS handed to the renderer.
    pub fn build_print_document(
        &self,
        composed: &ComposedTemplate,
        options: &PdfExportOptions,
    ) -> (String, String) {
        let mut css = composed.compiled_content.css.clone();
        css.push_str(&self.page_css(&options.page));
        if let Some(custom) = &options.custom_css {
            css.push_str(custom);
            if !custom.ends_with('\n') {
                css.push('\n');
            }
        }

        let body = &composed.compiled_content.html;
        let html = match &options.watermark {
            Some(watermark) => format!("{}\n{}", watermark_layer(watermark), body),
            None => body.clone(),
        };
        (html, css)
    }

    /// `@page` geometry for the configured page settings. Margins are
    /// converted into the page's millimeter frame, whatever unit the
    /// settings declare.
    pub fn page_css(&self, page: &PageSettings) -> String {
        let (width, height) = oriented(page_size_mm(page.size), page.orientation);
        let margins = page.margins.in_unit(MarginUnit::Mm);
        let unit = margins.unit.css_suffix();
        format!(
            "@page {{\n  size: {width}mm {height}mm;\n  margin: {top}{u} {right}{u} {bottom}{u} {left}{u};\n}}\n",
            width = width,
            height = height,
            top = margins.top,
            right = margins.right,
            bottom = margins.bottom,
            left = margins.left,
            u = unit
        )
    }

    /// Estimated page count: ceil(text length / per-format constant).
    /// A heuristic only; the renderer's actual pagination may differ.
    pub fn estimate_page_count(&self, composed: &ComposedTemplate, size: PageSize) -> usize {
        let chars = composed.plain_text_len();
        let per_page = avg_chars_per_page(size);
        chars.div_ceil(per_page).max(1)
    }

    fn build_metadata(&self, composed: &ComposedTemplate, options: &PdfExportOptions) -> PdfMetadata {
        let now = Utc::now();
        PdfMetadata {
            title: options.title.clone(),
            author: options.author.clone(),
            subject: Some(format!("Document {}", composed.template_id)),
            keywords: Vec::new(),
            creator: Some("docpress".to_string()),
            producer: Some("docpress export pipeline".to_string()),
            creation_date: Some(now),
            modification_date: Some(now),
        }
    }
}

/// Fixed, centered, rotated text layer placed behind content.
fn watermark_layer(watermark: &Watermark) -> String {
    format!(
        "<div class=\"watermark\" style=\"position: fixed; top: 50%; left: 50%; \
         transform: translate(-50%, -50%) rotate({rotation}deg); opacity: {opacity}; \
         z-index: -1; font-size: 72px; white-space: nowrap; pointer-events: none;\">{text}</div>",
        rotation = watermark.rotation,
        opacity = watermark.opacity,
        text = watermark.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::StubPdfRenderer;
    use chrono::Utc;
    use template_model::{CompiledContent, CompositionMetadata, MarginUnit, Margins, TemplateData};

    fn composed(html: &str) -> ComposedTemplate {
        ComposedTemplate {
            template_id: "t-1".to_string(),
            template_version: "1.0.0".to_string(),
            data: TemplateData::new(),
            compiled_content: CompiledContent {
                html: html.to_string(),
                ..Default::default()
            },
            metadata: CompositionMetadata {
                composed_at: Utc::now(),
                render_time_ms: 0,
                cache_key: "k".to_string(),
                dependencies: Vec::new(),
            },
        }
    }

    #[test]
    fn test_page_css_landscape() {
        let service = PdfExportService::new();
        let page = PageSettings {
            size: PageSize::A4,
            orientation: Orientation::Landscape,
            margins: Margins::uniform(10.0, MarginUnit::Mm),
        };
        let css = service.page_css(&page);
        assert!(css.contains("size: 297mm 210mm;"));
        assert!(css.contains("margin: 10mm 10mm 10mm 10mm;"));
    }

    #[test]
    fn test_page_css_converts_inch_margins_to_mm() {
        let service = PdfExportService::new();
        let page = PageSettings {
            size: PageSize::Letter,
            orientation: Orientation::Portrait,
            margins: Margins::uniform(1.0, MarginUnit::In),
        };
        let css = service.page_css(&page);
        assert!(css.contains("size: 215.9mm 279.4mm;"));
        assert!(css.contains("margin: 25.4mm 25.4mm 25.4mm 25.4mm;"));
    }

    #[test]
    fn test_page_count_is_clamped_to_one() {
        let service = PdfExportService::new();
        assert_eq!(
            service.estimate_page_count(&composed("<p>hi</p>"), PageSize::A4),
            1
        );
    }

    #[test]
    fn test_page_count_scales_with_text() {
        let service = PdfExportService::new();
        // A4 fits 794*1123/256 = 3483 chars per page, A3 6961
        let long = format!("<p>{}</p>", "x".repeat(8000));
        assert_eq!(
            service.estimate_page_count(&composed(&long), PageSize::A4),
            3
        );
        assert_eq!(
            service.estimate_page_count(&composed(&long), PageSize::A3),
            2
        );
    }

    #[test]
    fn test_page_capacity_tracks_pixel_area() {
        // Larger px area means more characters per estimated page
        let ordering = [
            PageSize::Letter,
            PageSize::A4,
            PageSize::Legal,
            PageSize::A3,
        ];
        let capacities: Vec<usize> = ordering.iter().map(|s| avg_chars_per_page(*s)).collect();
        assert!(capacities.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_watermark_layer_behind_content() {
        let layer = watermark_layer(&Watermark::new("DRAFT"));
        assert!(layer.contains("z-index: -1"));
        assert!(layer.contains("rotate(-45deg)"));
        assert!(layer.contains("opacity: 0.12"));
        assert!(layer.contains("DRAFT"));
    }

    #[tokio::test]
    async fn test_export_yields_bytes_and_metadata() {
        let service = PdfExportService::new();
        let options = PdfExportOptions {
            title: Some("Proposal".to_string()),
            ..Default::default()
        };
        let artifact = service
            .export(&composed("<p>hello</p>"), &options, &StubPdfRenderer)
            .await
            .unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF-1.7"));
        assert!(artifact.page_count >= 1);
        assert_eq!(artifact.metadata.title.as_deref(), Some("Proposal"));
    }

    #[tokio::test]
    async fn test_watermark_reaches_renderer() {
        let service = PdfExportService::new();
        let options = PdfExportOptions {
            watermark: Some(Watermark::new("CONFIDENTIAL")),
            ..Default::default()
        };
        let (html, _) = service.build_print_document(&composed("<p>x</p>"), &options);
        assert!(html.contains("CONFIDENTIAL"));
        assert!(html.contains("class=\"watermark\""));
    }
}
