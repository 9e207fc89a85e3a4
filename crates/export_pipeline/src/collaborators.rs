//! External collaborator boundaries
//!
//! The pipeline treats rendering, compression, and branding lookup as black
//! boxes behind async traits: valid HTML+CSS in, PDF bytes out; PDF bytes
//! plus a quality level in, smaller PDF bytes out. Calls are awaited under a
//! bounded timeout by the manager. The in-memory implementations here are
//! deterministic defaults for tests and offline use.

use crate::options::ExportQuality;
use std::collections::HashMap;
use std::sync::Mutex;
use template_model::ClientBranding;

/// Renders final HTML+CSS into PDF bytes.
#[trait_variant::make(Send)]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str, css: &str, quality: ExportQuality)
        -> Result<Vec<u8>, String>;
}

/// Compresses PDF bytes at a quality level.
#[trait_variant::make(Send)]
pub trait PdfCompressor: Send + Sync {
    async fn compress(&self, bytes: &[u8], quality: ExportQuality) -> Result<Vec<u8>, String>;
}

/// Looks up a tenant's branding profile. Absence is not an error.
#[trait_variant::make(Send)]
pub trait BrandingProvider: Send + Sync {
    async fn get_branding(&self, branding_id: &str) -> Option<ClientBranding>;
}

/// Deterministic renderer that wraps the document text in a minimal PDF
/// shell. Stands in for a real HTML-to-PDF engine.
#[derive(Debug, Default)]
pub struct StubPdfRenderer;

impl PdfRenderer for StubPdfRenderer {
    async fn render(
        &self,
        html: &str,
        css: &str,
        _quality: ExportQuality,
    ) -> Result<Vec<u8>, String> {
        let mut bytes = Vec::with_capacity(html.len() + css.len() + 64);
        bytes.extend_from_slice(b"%PDF-1.7\n");
        bytes.extend_from_slice(b"% docpress stub renderer\n");
        bytes.extend_from_slice(html.as_bytes());
        bytes.extend_from_slice(b"\n");
        bytes.extend_from_slice(css.as_bytes());
        bytes.extend_from_slice(b"\n%%EOF\n");
        Ok(bytes)
    }
}

/// Compressor that returns its input unchanged.
#[derive(Debug, Default)]
pub struct PassthroughCompressor;

impl PdfCompressor for PassthroughCompressor {
    async fn compress(&self, bytes: &[u8], _quality: ExportQuality) -> Result<Vec<u8>, String> {
        Ok(bytes.to_vec())
    }
}

/// Branding provider over an in-memory map.
#[derive(Debug, Default)]
pub struct InMemoryBrandingProvider {
    brandings: Mutex<HashMap<String, ClientBranding>>,
}

impl InMemoryBrandingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, branding: ClientBranding) {
        self.brandings
            .lock()
            .unwrap()
            .insert(branding.id.clone(), branding);
    }
}

impl BrandingProvider for InMemoryBrandingProvider {
    async fn get_branding(&self, branding_id: &str) -> Option<ClientBranding> {
        self.brandings.lock().unwrap().get(branding_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_renderer_emits_pdf_header() {
        let renderer = StubPdfRenderer;
        let bytes = renderer
            .render("<p>hi</p>", "body{}", ExportQuality::Standard)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(!bytes.is_empty());
    }

    #[tokio::test]
    async fn test_passthrough_compressor() {
        let compressor = PassthroughCompressor;
        let bytes = compressor
            .compress(b"%PDF-1.7", ExportQuality::High)
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_branding_provider_absence_is_none() {
        let provider = InMemoryBrandingProvider::new();
        assert!(provider.get_branding("nope").await.is_none());

        provider.insert(ClientBranding::new("acme"));
        assert!(provider.get_branding("acme").await.is_some());
    }
}
