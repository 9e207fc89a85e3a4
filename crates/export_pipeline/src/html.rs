//! HTML export service
//!
//! Renders a composed template into one of three document shapes:
//! standalone (full document), embedded (scoped fragment), or fragment
//! (bare inner HTML). Responsive, theme, and minification behavior are
//! driven by the export options.

use crate::options::{HtmlExportOptions, HtmlMode, Theme};
use crate::result::HtmlArtifact;
use template_model::ComposedTemplate;

/// Fixed responsive breakpoints, in px
const BREAKPOINT_TABLET: u32 = 768;
const BREAKPOINT_PHONE: u32 = 480;

/// Renders composed templates to HTML
#[derive(Debug, Default)]
pub struct HtmlExportService;

impl HtmlExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render the composed template according to the options.
    pub fn export(&self, composed: &ComposedTemplate, options: &HtmlExportOptions) -> HtmlArtifact {
        let css = self.build_css(composed, options);
        let body = composed.compiled_content.html.clone();

        let content = match options.mode {
            HtmlMode::Fragment => body,
            HtmlMode::Embedded => {
                let scoped = scope_css(&css, "dp-embed");
                format!(
                    "<div class=\"dp-embed\">\n<style>\n{}</style>\n{}\n</div>",
                    scoped, body
                )
            }
            HtmlMode::Standalone => self.standalone_document(&body, &css, composed, options),
        };

        let content = if options.optimization.minify {
            minify_html(&content)
        } else {
            content
        };

        HtmlArtifact::new(content, options.mode)
    }

    fn build_css(&self, composed: &ComposedTemplate, options: &HtmlExportOptions) -> String {
        let mut css = composed.compiled_content.css.clone();
        if options.optimization.responsive {
            css.push_str(&responsive_css());
        }
        if let Some(theme) = options.theme {
            css.push_str(&theme_css(theme));
        }
        if let Some(custom) = &options.custom_css {
            css.push_str(custom);
            if !custom.ends_with('\n') {
                css.push('\n');
            }
        }
        css
    }

    fn standalone_document(
        &self,
        body: &str,
        css: &str,
        composed: &ComposedTemplate,
        options: &HtmlExportOptions,
    ) -> String {
        let title = options
            .title
            .clone()
            .unwrap_or_else(|| format!("Document {}", composed.template_id));

        let mut head = String::new();
        head.push_str("<meta charset=\"utf-8\"/>\n");
        head.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n");
        head.push_str(&format!("<title>{}</title>\n", title));
        if options.optimization.seo {
            head.push_str(&format!(
                "<meta name=\"description\" content=\"{}\"/>\n",
                title
            ));
            head.push_str(&format!(
                "<meta property=\"og:title\" content=\"{}\"/>\n",
                title
            ));
            head.push_str("<meta property=\"og:type\" content=\"article\"/>\n");
            head.push_str("<meta name=\"robots\" content=\"index, follow\"/>\n");
        }
        if options.optimization.accessibility {
            head.push_str("<meta name=\"color-scheme\" content=\"light dark\"/>\n");
        }
        if options.inline_assets {
            head.push_str(&format!("<style>\n{}</style>\n", css));
        } else {
            let name = options.stylesheet.as_deref().unwrap_or("document");
            head.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}.css\"/>\n",
                name
            ));
        }

        let mut scripts = String::new();
        if let Some(js) = &options.custom_js {
            scripts.push_str(&format!("<script>\n{}\n</script>\n", js));
        }
        if options.analytics_stub {
            scripts.push_str(
                "<script>\n/* analytics stub */\nwindow.__dp_pageview = Date.now();\n</script>\n",
            );
        }

        let main_open = if options.optimization.accessibility {
            "<main role=\"main\">"
        } else {
            "<main>"
        };

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{head}</head>\n<body>\n{main_open}\n{body}\n</main>\n{scripts}</body>\n</html>\n",
            head = head,
            main_open = main_open,
            body = body,
            scripts = scripts
        )
    }
}

/// Two fixed viewport breakpoints plus a print block.
fn responsive_css() -> String {
    format!(
        "@media (max-width: {tablet}px) {{\n  .document {{\n    padding: 1rem;\n  }}\n  .section {{\n    margin-bottom: 1rem;\n  }}\n}}\n\
         @media (max-width: {phone}px) {{\n  body {{\n    font-size: 14px;\n  }}\n  .document {{\n    padding: 0.5rem;\n  }}\n}}\n\
         @media print {{\n  body {{\n    background: none;\n  }}\n  .section {{\n    break-inside: avoid;\n  }}\n}}\n",
        tablet = BREAKPOINT_TABLET,
        phone = BREAKPOINT_PHONE
    )
}

fn theme_css(theme: Theme) -> String {
    const LIGHT: &str = "body {\n  background-color: #ffffff;\n  color: #1a1a1a;\n}\n";
    const DARK: &str = "body {\n  background-color: #1e1e1e;\n  color: #e6e6e6;\n}\n";
    match theme {
        Theme::Light => LIGHT.to_string(),
        Theme::Dark => DARK.to_string(),
        Theme::Auto => format!("@media (prefers-color-scheme: dark) {{\n{}}}\n", DARK),
    }
}

/// Prefix every top-level selector with the scope class. At-rules are kept
/// as-is; this is a shallow scoper, not a CSS parser.
fn scope_css(css: &str, scope_class: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut depth = 0usize;
    for line in css.lines() {
        let trimmed = line.trim_start();
        let opens = line.matches('{').count();
        let closes = line.matches('}').count();
        let at_top = depth == 0;
        if at_top
            && opens > 0
            && !trimmed.starts_with('@')
            && !trimmed.is_empty()
        {
            let (selector, rest) = line.split_once('{').unwrap_or((line, ""));
            let scoped: Vec<String> = selector
                .split(',')
                .map(|s| format!(".{} {}", scope_class, s.trim()))
                .collect();
            out.push_str(&format!("{} {{{}\n", scoped.join(", "), rest));
        } else {
            out.push_str(line);
            out.push('\n');
        }
        depth = depth.saturating_add(opens).saturating_sub(closes);
    }
    out
}

/// Whitespace-collapsing minification. No semantic minification; running it
/// twice changes nothing.
pub fn minify_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last_was_space = false;
    for ch in html.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    // Whitespace between tags carries no content
    let out = out.replace("> <", "><");
    out.trim().to_string()
}
