//! Stylesheet generation
//!
//! Two entry points share the same emission rules: `generate_custom_css`
//! renders an options overlay, `base_stylesheet` renders a template's or
//! pattern's style tokens. Output is deterministic for identical input.

use crate::options::CustomizationOptions;
use template_model::StyleTokens;

/// Emit CSS for an ad-hoc options bundle.
///
/// Emits, in order: a `:root` block of color custom properties (only for
/// colors actually present), a typography block, spacing rules, and an
/// `@page` margin rule. Absent option groups emit nothing.
pub fn generate_custom_css(options: &CustomizationOptions) -> String {
    let mut css = String::new();

    if let Some(colors) = &options.colors {
        let set = colors.iter_set();
        if !set.is_empty() {
            css.push_str(":root {\n");
            for (name, value) in set {
                css.push_str(&format!("  --color-{}: {};\n", name, value));
            }
            css.push_str("}\n");
        }
    }

    if let Some(typography) = &options.typography {
        let mut body_rules = String::new();
        if let Some(family) = &typography.font_family {
            body_rules.push_str(&format!("  font-family: {};\n", family));
        }
        if let Some(size) = typography.font_size {
            body_rules.push_str(&format!("  font-size: {}px;\n", size.px()));
        }
        if !body_rules.is_empty() {
            css.push_str(&format!("body {{\n{}}}\n", body_rules));
        }
        if let Some(heading) = &typography.heading_family {
            css.push_str(&format!(
                "h1, h2, h3, h4, h5, h6 {{\n  font-family: {};\n}}\n",
                heading
            ));
        }
    }

    if let Some(spacing) = &options.spacing {
        if let Some(scale) = spacing.scale {
            css.push_str(&format!(
                ".section {{\n  margin-bottom: {}rem;\n}}\n",
                scale.section_rem()
            ));
            css.push_str(&format!(
                "p {{\n  margin-bottom: {}rem;\n}}\n",
                scale.paragraph_rem()
            ));
        }
    }

    if let Some(layout) = &options.layout {
        if let Some(margins) = layout.margins {
            css.push_str(&format!("@page {{\n  margin: {}in;\n}}\n", margins.inches()));
        }
        if let Some(columns) = layout.columns {
            if columns > 1 {
                css.push_str(&format!(
                    ".document {{\n  column-count: {};\n}}\n",
                    columns
                ));
            }
        }
    }

    css
}

/// Emit CSS for a resolved style-token set.
///
/// Used when instantiating a pattern and when composing a template, so both
/// paths produce the same stylesheet for the same tokens.
pub fn base_stylesheet(tokens: &StyleTokens) -> String {
    let mut css = String::new();

    let colors = tokens.colors.iter_set();
    if !colors.is_empty() {
        css.push_str(":root {\n");
        for (name, value) in &colors {
            css.push_str(&format!("  --color-{}: {};\n", name, value));
        }
        css.push_str("}\n");
    }

    let mut body_rules = String::new();
    if let Some(family) = &tokens.typography.font_family {
        body_rules.push_str(&format!("  font-family: {};\n", family));
    }
    if let Some(size) = tokens.typography.base_size_px {
        body_rules.push_str(&format!("  font-size: {}px;\n", size));
    }
    if let Some(line_height) = tokens.typography.line_height {
        body_rules.push_str(&format!("  line-height: {};\n", line_height));
    }
    if let Some(text) = &tokens.colors.text {
        body_rules.push_str(&format!("  color: {};\n", text));
    }
    if let Some(background) = &tokens.colors.background {
        body_rules.push_str(&format!("  background-color: {};\n", background));
    }
    if !body_rules.is_empty() {
        css.push_str(&format!("body {{\n{}}}\n", body_rules));
    }

    if let Some(heading) = &tokens.typography.heading_family {
        css.push_str(&format!(
            "h1, h2, h3, h4, h5, h6 {{\n  font-family: {};\n}}\n",
            heading
        ));
    }
    if let Some(primary) = &tokens.colors.primary {
        css.push_str(&format!(
            "h1, h2, h3 {{\n  color: {};\n}}\na {{\n  color: {};\n}}\n",
            primary, primary
        ));
    }

    if let Some(gap) = tokens.spacing.section_gap {
        css.push_str(&format!(".section {{\n  margin-bottom: {}rem;\n}}\n", gap));
    }
    if let Some(gap) = tokens.spacing.paragraph_gap {
        css.push_str(&format!("p {{\n  margin-bottom: {}rem;\n}}\n", gap));
    }

    css
}
