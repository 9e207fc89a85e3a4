//! Docpress - template composition and export from the command line
//!
//! Usage:
//!   docpress list
//!   docpress export <pattern-id> <data.json> <output-basename>
//!
//! `export` instantiates the pattern, composes it with the JSON data file,
//! and writes `<output-basename>.html` and `<output-basename>.pdf`.

use anyhow::{bail, Context};
use export_pipeline::{ExportManager, ExportOptions};
use pattern_registry::PatternRegistry;
use template_model::TemplateData;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => list_patterns(),
        Some("export") => {
            let [_, pattern_id, data_path, output] = args.as_slice() else {
                bail!("usage: docpress export <pattern-id> <data.json> <output-basename>");
            };
            export(pattern_id, data_path, output).await
        }
        _ => bail!("usage: docpress <list|export> ..."),
    }
}

fn list_patterns() -> anyhow::Result<()> {
    let registry = PatternRegistry::new();
    for pattern in registry.library().all_patterns() {
        println!(
            "{:<24} {:<12} {}",
            pattern.id, pattern.category, pattern.description
        );
    }
    Ok(())
}

async fn export(pattern_id: &str, data_path: &str, output: &str) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(data_path)
        .with_context(|| format!("reading data file {}", data_path))?;
    let data: TemplateData =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", data_path))?;

    let registry = PatternRegistry::new();
    let template = registry.generate_template_from_pattern(pattern_id, None)?;

    let mut manager = ExportManager::default();
    let result = manager
        .export_document(&template, &data, &ExportOptions::both())
        .await;

    for warning in &result.warnings {
        tracing::warn!(%warning, "export warning");
    }
    if !result.success {
        let messages: Vec<&str> = result.errors.iter().map(|e| e.message.as_str()).collect();
        bail!("export failed: {}", messages.join("; "));
    }

    if let Some(html) = &result.html {
        let path = format!("{}.html", output);
        std::fs::write(&path, &html.content).with_context(|| format!("writing {}", path))?;
        println!("wrote {} ({} bytes)", path, html.size_bytes);
    }
    if let Some(pdf) = &result.pdf {
        let path = format!("{}.pdf", output);
        std::fs::write(&path, &pdf.bytes).with_context(|| format!("writing {}", path))?;
        println!("wrote {} (~{} pages)", path, pdf.page_count);
    }
    Ok(())
}
