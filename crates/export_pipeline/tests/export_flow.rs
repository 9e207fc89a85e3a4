//! End-to-end export flow over the built-in pattern catalog.

use export_pipeline::{
    ClientCustomization, ExportManager, ExportOptions, HtmlMode, InMemoryBrandingProvider,
    OptimizationFlags, PassthroughCompressor, StubPdfRenderer, Theme, Watermark,
};
use pattern_library::PatternLibrary;
use serde_json::json;
use template_model::{ClientBranding, TemplateData};

fn proposal_data() -> TemplateData {
    TemplateData::new()
        .set("client_name", json!("Acme"))
        .set("project_title", json!("Website Revamp"))
        .set("total_cost", json!(5000))
        .set("deliverables", json!(["Design", "Build"]))
}

#[tokio::test]
async fn business_proposal_exports_to_both_formats() {
    let library = PatternLibrary::new();
    let template = library
        .create_template_from_pattern("business-proposal", None)
        .unwrap();

    let mut manager = ExportManager::default();
    let result = manager
        .export_document(&template, &proposal_data(), &ExportOptions::both())
        .await;

    assert!(result.success, "errors: {:?}", result.errors);

    let html = result.html.expect("html artifact");
    assert!(html.content.contains("Acme"));
    assert!(html.content.contains("Website Revamp"));
    assert!(html.content.contains("$5000"));
    assert_eq!(html.content.matches("<li>").count(), 2);

    let pdf = result.pdf.expect("pdf artifact");
    assert!(pdf.page_count >= 1);
    assert!(!pdf.bytes.is_empty());
}

#[tokio::test]
async fn branding_flows_into_exported_css() {
    let library = PatternLibrary::new();
    let template = library
        .create_template_from_pattern("business-proposal", None)
        .unwrap();

    let provider = InMemoryBrandingProvider::new();
    let mut branding = ClientBranding::new("tenant-1");
    branding.color_palette.primary = Some("#ff6600".to_string());
    provider.insert(branding);

    let mut manager = ExportManager::new(StubPdfRenderer, PassthroughCompressor, provider);
    let options = ExportOptions::html().with_customization(ClientCustomization {
        branding_id: Some("tenant-1".to_string()),
        theme: Some(Theme::Auto),
        ..Default::default()
    });
    let result = manager
        .export_document(&template, &proposal_data(), &options)
        .await;

    assert!(result.success);
    assert!(result.warnings.is_empty());
    let html = result.html.unwrap();
    assert!(html.content.contains("#ff6600"));
    assert!(html.content.contains("prefers-color-scheme"));
}

#[tokio::test]
async fn watermark_appears_in_pdf_bytes() {
    let library = PatternLibrary::new();
    let template = library
        .create_template_from_pattern("business-proposal", None)
        .unwrap();

    let mut manager = ExportManager::default();
    let options = ExportOptions::pdf().with_customization(ClientCustomization {
        watermark: Some(Watermark::new("DRAFT")),
        ..Default::default()
    });
    let result = manager
        .export_document(&template, &proposal_data(), &options)
        .await;

    // The stub renderer embeds the document text, so the watermark layer
    // is visible in the bytes.
    let pdf = result.pdf.expect("pdf artifact");
    let text = String::from_utf8_lossy(&pdf.bytes);
    assert!(text.contains("DRAFT"));
    assert!(text.contains("z-index: -1"));
}

#[tokio::test]
async fn fragment_export_has_no_document_shell() {
    let library = PatternLibrary::new();
    let template = library
        .create_template_from_pattern("business-proposal", None)
        .unwrap();

    let mut manager = ExportManager::default();
    let options = ExportOptions::html().with_html_mode(HtmlMode::Fragment);
    let result = manager
        .export_document(&template, &proposal_data(), &options)
        .await;

    let html = result.html.unwrap();
    assert!(!html.content.contains("<!DOCTYPE html>"));
    assert!(!html.content.contains("<style>"));
    assert!(html.content.contains("Acme"));
}

#[tokio::test]
async fn minified_export_is_stable() {
    let library = PatternLibrary::new();
    let template = library
        .create_template_from_pattern("business-proposal", None)
        .unwrap();

    let mut manager = ExportManager::default();
    let options = ExportOptions::html().with_optimization(OptimizationFlags {
        minify: true,
        ..Default::default()
    });
    let result = manager
        .export_document(&template, &proposal_data(), &options)
        .await;

    let html = result.html.unwrap();
    assert_eq!(
        export_pipeline::html::minify_html(&html.content),
        html.content
    );
}

mod minify_properties {
    use export_pipeline::html::minify_html;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn minify_is_idempotent(input in "[ a-zA-Z0-9<>/\n\t]{0,200}") {
            let once = minify_html(&input);
            let twice = minify_html(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn minify_never_grows(input in "[ a-zA-Z0-9<>/\n\t]{0,200}") {
            prop_assert!(minify_html(&input).len() <= input.len());
        }
    }
}
