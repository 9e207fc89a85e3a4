//! Export manager
//!
//! Orchestrates composition and the two format strategies. Each requested
//! format runs in isolation: a PDF failure never suppresses HTML output and
//! vice versa. Collaborator calls are awaited under a bounded timeout.

use crate::collaborators::{
    BrandingProvider, InMemoryBrandingProvider, PassthroughCompressor, PdfCompressor, PdfRenderer,
    StubPdfRenderer,
};
use crate::html::HtmlExportService;
use crate::options::{ExportFormat, ExportOptions, HtmlExportOptions};
use crate::pdf::{PdfExportOptions, PdfExportService};
use crate::result::{BatchExportItem, BatchExportSummary, ExportIssue, ExportResult};
use std::time::{Duration, Instant};
use template_composer::Composer;
use template_model::{ClientBranding, Template, TemplateData};

const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives the full export flow: compose, then fan out per format.
pub struct ExportManager<R = StubPdfRenderer, C = PassthroughCompressor, B = InMemoryBrandingProvider>
{
    composer: Composer,
    html_service: HtmlExportService,
    pdf_service: PdfExportService,
    renderer: R,
    compressor: C,
    branding_provider: B,
    collaborator_timeout: Duration,
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new(
            StubPdfRenderer,
            PassthroughCompressor,
            InMemoryBrandingProvider::new(),
        )
    }
}

impl<R, C, B> ExportManager<R, C, B>
where
    R: PdfRenderer,
    C: PdfCompressor,
    B: BrandingProvider,
{
    pub fn new(renderer: R, compressor: C, branding_provider: B) -> Self {
        Self {
            composer: Composer::new(),
            html_service: HtmlExportService::new(),
            pdf_service: PdfExportService::new(),
            renderer,
            compressor,
            branding_provider,
            collaborator_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }

    pub fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = timeout;
        self
    }

    pub fn branding_provider(&self) -> &B {
        &self.branding_provider
    }

    /// Export one document. Every failure mode resolves into the returned
    /// result; this never propagates an error to the caller.
    pub async fn export_document(
        &mut self,
        template: &Template,
        data: &TemplateData,
        options: &ExportOptions,
    ) -> ExportResult {
        let started = Instant::now();
        let mut result = ExportResult::default();

        let branding = self.resolve_branding(options, &mut result).await;

        let composed = match self.composer.compose(template, data, branding.as_ref()) {
            Ok(composed) => composed,
            Err(err) => {
                result.errors.push(ExportIssue::general(err.to_string()));
                result.duration_ms = started.elapsed().as_millis() as u64;
                return result;
            }
        };

        if options.format.wants_html() {
            let html_options = self.html_options(options);
            result.html = Some(self.html_service.export(&composed, &html_options));
        }

        if options.format.wants_pdf() {
            let pdf_options = self.pdf_options(template, options);
            match tokio::time::timeout(
                self.collaborator_timeout,
                self.pdf_service.export(&composed, &pdf_options, &self.renderer),
            )
            .await
            {
                Err(_) => {
                    result.errors.push(ExportIssue::for_format(
                        ExportFormat::Pdf,
                        "PDF renderer timed out",
                    ));
                }
                Ok(Err(message)) => {
                    result
                        .errors
                        .push(ExportIssue::for_format(ExportFormat::Pdf, message));
                }
                Ok(Ok(mut artifact)) => {
                    if options.optimization.compress {
                        match tokio::time::timeout(
                            self.collaborator_timeout,
                            self.compressor.compress(&artifact.bytes, options.quality),
                        )
                        .await
                        {
                            Ok(Ok(compressed)) => artifact.bytes = compressed,
                            Ok(Err(message)) => {
                                tracing::warn!(error = %message, "PDF compression failed, keeping uncompressed bytes");
                                result
                                    .warnings
                                    .push(format!("PDF compression failed: {}", message));
                            }
                            Err(_) => {
                                result
                                    .warnings
                                    .push("PDF compression timed out".to_string());
                            }
                        }
                    }
                    result.pdf = Some(artifact);
                }
            }
        }

        result.success = result.html.is_some() || result.pdf.is_some();
        result.duration_ms = started.elapsed().as_millis() as u64;
        result
    }

    /// Export items strictly in input order. One item's failure is recorded
    /// and does not abort the remainder.
    pub async fn batch_export(
        &mut self,
        items: &[BatchExportItem],
        default_options: &ExportOptions,
    ) -> BatchExportSummary {
        let started = Instant::now();
        let mut summary = BatchExportSummary::default();

        for (index, item) in items.iter().enumerate() {
            let options = item.options.as_ref().unwrap_or(default_options);
            let result = self.export_document(&item.template, &item.data, options).await;

            if result.success {
                summary.successful += 1;
            } else {
                summary.failed += 1;
                let message = result
                    .errors
                    .first()
                    .map(|issue| issue.message.clone())
                    .unwrap_or_else(|| "export produced no output".to_string());
                summary.errors.push((index, message));
            }
            summary.total_size += result.total_size();
            summary.results.push(result);
        }

        summary.total_time_ms = started.elapsed().as_millis() as u64;
        summary
    }

    async fn resolve_branding(
        &self,
        options: &ExportOptions,
        result: &mut ExportResult,
    ) -> Option<ClientBranding> {
        let branding_id = options
            .client_customization
            .as_ref()
            .and_then(|c| c.branding_id.as_deref())?;
        match tokio::time::timeout(
            self.collaborator_timeout,
            self.branding_provider.get_branding(branding_id),
        )
        .await
        {
            Ok(Some(branding)) => Some(branding),
            Ok(None) => {
                // Absence is not an error; the export proceeds unbranded
                result
                    .warnings
                    .push(format!("branding '{}' not found", branding_id));
                None
            }
            Err(_) => {
                result.errors.push(ExportIssue::general(format!(
                    "branding lookup for '{}' timed out",
                    branding_id
                )));
                None
            }
        }
    }

    fn html_options(&self, options: &ExportOptions) -> HtmlExportOptions {
        let customization = options.client_customization.as_ref();
        HtmlExportOptions {
            mode: options.html_mode,
            optimization: options.optimization,
            theme: customization.and_then(|c| c.theme),
            custom_css: customization.and_then(|c| c.custom_css.clone()),
            custom_js: customization.and_then(|c| c.custom_js.clone()),
            title: options.delivery.filename.clone(),
            inline_assets: options.delivery.inline_assets,
            stylesheet: options.delivery.filename.clone(),
            analytics_stub: false,
        }
    }

    fn pdf_options(&self, template: &Template, options: &ExportOptions) -> PdfExportOptions {
        let customization = options.client_customization.as_ref();
        PdfExportOptions {
            page: template.page_settings.clone().unwrap_or_default(),
            quality: options.quality,
            watermark: customization.and_then(|c| c.watermark.clone()),
            custom_css: customization.and_then(|c| c.custom_css.clone()),
            title: options.delivery.filename.clone(),
            author: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ExportQuality, OptimizationFlags};
    use template_model::{TemplateSection, TemplateVariable, VariableType};

    struct FailingRenderer;

    impl PdfRenderer for FailingRenderer {
        async fn render(
            &self,
            _html: &str,
            _css: &str,
            _quality: ExportQuality,
        ) -> Result<Vec<u8>, String> {
            Err("renderer unavailable".to_string())
        }
    }

    struct StalledBrandingProvider;

    impl BrandingProvider for StalledBrandingProvider {
        async fn get_branding(&self, _branding_id: &str) -> Option<ClientBranding> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            None
        }
    }

    struct FailingCompressor;

    impl PdfCompressor for FailingCompressor {
        async fn compress(&self, _bytes: &[u8], _quality: ExportQuality) -> Result<Vec<u8>, String> {
            Err("codec crashed".to_string())
        }
    }

    fn sample_template() -> Template {
        let mut template = Template::new("Greeting");
        template
            .schema
            .variables
            .push(TemplateVariable::required("name", VariableType::Text));
        template.schema.sections.push(
            TemplateSection::new("body", "Body", "<p>Hello {{name}}</p>").with_order(0),
        );
        template
    }

    fn sample_data() -> TemplateData {
        TemplateData::new().set("name", serde_json::json!("Ada"))
    }

    #[tokio::test]
    async fn test_both_formats_export() {
        let mut manager = ExportManager::default();
        let result = manager
            .export_document(&sample_template(), &sample_data(), &ExportOptions::both())
            .await;
        assert!(result.success);
        assert!(result.html.is_some());
        assert!(result.pdf.is_some());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_pdf_failure_does_not_suppress_html() {
        let mut manager = ExportManager::new(
            FailingRenderer,
            PassthroughCompressor,
            InMemoryBrandingProvider::new(),
        );
        let result = manager
            .export_document(&sample_template(), &sample_data(), &ExportOptions::both())
            .await;
        assert!(result.success);
        assert!(result.html.is_some());
        assert!(result.pdf.is_none());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].format, Some(ExportFormat::Pdf));
    }

    #[tokio::test]
    async fn test_compression_failure_downgrades_to_warning() {
        let mut manager = ExportManager::new(
            StubPdfRenderer,
            FailingCompressor,
            InMemoryBrandingProvider::new(),
        );
        let options = ExportOptions::pdf().with_optimization(OptimizationFlags {
            compress: true,
            ..Default::default()
        });
        let result = manager
            .export_document(&sample_template(), &sample_data(), &options)
            .await;
        assert!(result.success);
        assert!(result.pdf.is_some());
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("compression failed"));
    }

    #[tokio::test]
    async fn test_missing_required_variable_fails_cleanly() {
        let mut manager = ExportManager::default();
        let result = manager
            .export_document(&sample_template(), &TemplateData::new(), &ExportOptions::html())
            .await;
        assert!(!result.success);
        assert!(result.html.is_none());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("name"));
    }

    #[tokio::test]
    async fn test_unknown_branding_is_a_warning() {
        let mut manager = ExportManager::default();
        let options = ExportOptions::html().with_customization(crate::options::ClientCustomization {
            branding_id: Some("ghost".to_string()),
            ..Default::default()
        });
        let result = manager
            .export_document(&sample_template(), &sample_data(), &options)
            .await;
        assert!(result.success);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("ghost"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_branding_timeout_is_an_export_error() {
        let mut manager = ExportManager::new(
            StubPdfRenderer,
            PassthroughCompressor,
            StalledBrandingProvider,
        )
        .with_collaborator_timeout(Duration::from_millis(50));
        let options = ExportOptions::html().with_customization(crate::options::ClientCustomization {
            branding_id: Some("tenant-1".to_string()),
            ..Default::default()
        });
        let result = manager
            .export_document(&sample_template(), &sample_data(), &options)
            .await;

        // The export still produces output, but the stalled lookup is an
        // error, not a warning
        assert!(result.success);
        assert!(result.html.is_some());
        assert!(result.warnings.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].format.is_none());
        assert!(result.errors[0].message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let mut manager = ExportManager::default();
        let good = BatchExportItem {
            template: sample_template(),
            data: sample_data(),
            options: None,
        };
        let bad = BatchExportItem {
            template: sample_template(),
            data: TemplateData::new(),
            options: None,
        };
        let items = vec![good.clone(), bad, good];
        let summary = manager.batch_export(&items, &ExportOptions::html()).await;

        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.results.len(), 3);
        assert!(!summary.results[1].success);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].0, 1);
    }
}
