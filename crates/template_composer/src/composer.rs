//! Template composition
//!
//! Merges a template with runtime data and optional branding into a
//! render-ready bundle. Composition is a pure function of its inputs:
//! identical inputs produce identical compiled content, timestamps aside.

use crate::cache::CompositionCache;
use crate::error::{CompositionError, CompositionResult};
use crate::placeholder::{self, referenced_variables};
use chrono::Utc;
use serde_json::Value;
use template_model::{
    ClientBranding, CompiledContent, ComposedTemplate, CompositionMetadata, StyleTokens, Template,
    TemplateData, TemplateSection,
};

/// A soft-invariant finding from `Composer::lint`
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub section_id: String,
    pub message: String,
}

/// Composes templates with data and branding
#[derive(Debug, Default)]
pub struct Composer {
    cache: Option<CompositionCache>,
}

impl Composer {
    /// A composer with caching enabled
    pub fn new() -> Self {
        Self {
            cache: Some(CompositionCache::new()),
        }
    }

    /// A composer that recomputes every request
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    /// Compose a template with runtime data and optional branding.
    ///
    /// Every required variable that is absent after applying defaults is
    /// collected into one `MissingRequiredVariables` error so the caller can
    /// present the complete fix-list.
    pub fn compose(
        &mut self,
        template: &Template,
        data: &TemplateData,
        branding: Option<&ClientBranding>,
    ) -> CompositionResult<ComposedTemplate> {
        let started = std::time::Instant::now();

        let missing = missing_required(template, data);
        if !missing.is_empty() {
            return Err(CompositionError::MissingRequiredVariables(missing));
        }

        let resolved = resolve_data(template, data);
        let cache_key = cache_key(template, &resolved, branding);

        let compiled_content = if let Some(cached) = self
            .cache
            .as_mut()
            .and_then(|cache| cache.get(&cache_key))
        {
            cached
        } else {
            let content = compile(template, &resolved, branding)?;
            if let Some(cache) = self.cache.as_mut() {
                cache.insert(cache_key.clone(), content.clone());
            }
            content
        };

        let dependencies = template
            .schema
            .sections
            .iter()
            .flat_map(|s| referenced_variables(&s.content))
            .fold(Vec::new(), |mut acc, name| {
                if !acc.contains(&name) {
                    acc.push(name);
                }
                acc
            });

        Ok(ComposedTemplate {
            template_id: template.id.clone(),
            template_version: template.version.clone(),
            data: resolved,
            compiled_content,
            metadata: CompositionMetadata {
                composed_at: Utc::now(),
                render_time_ms: started.elapsed().as_millis() as u64,
                cache_key,
                dependencies,
            },
        })
    }

    /// Check the soft invariant that every placeholder a section references
    /// appears in its declared `variables` list. Violations are warnings.
    pub fn lint(&self, template: &Template) -> Vec<LintWarning> {
        let mut warnings = Vec::new();
        for section in &template.schema.sections {
            for name in referenced_variables(&section.content) {
                if name.starts_with("__section_") {
                    continue;
                }
                if !section.variables.iter().any(|v| v == &name) {
                    warnings.push(LintWarning {
                        section_id: section.id.clone(),
                        message: format!(
                            "placeholder '{{{{{}}}}}' is not declared in the section's variables",
                            name
                        ),
                    });
                }
            }
        }
        warnings
    }
}

/// Required variables with neither a supplied value nor a default.
fn missing_required(template: &Template, data: &TemplateData) -> Vec<String> {
    template
        .schema
        .variables
        .iter()
        .filter(|var| var.required)
        .filter(|var| {
            let supplied = data.get(&var.name).map(|v| !is_empty_value(v)).unwrap_or(false);
            let defaulted = var
                .default_value
                .as_ref()
                .map(|v| !is_empty_value(v))
                .unwrap_or(false);
            !supplied && !defaulted
        })
        .map(|var| var.name.clone())
        .collect()
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Supplied data plus declared defaults for anything the caller omitted.
fn resolve_data(template: &Template, data: &TemplateData) -> TemplateData {
    let mut resolved = data.clone();
    for var in &template.schema.variables {
        if resolved.get(&var.name).is_none() {
            if let Some(default) = &var.default_value {
                resolved.insert(var.name.clone(), default.clone());
            }
        }
    }
    resolved
}

fn compile(
    template: &Template,
    data: &TemplateData,
    branding: Option<&ClientBranding>,
) -> CompositionResult<CompiledContent> {
    let mut body = String::new();

    if template.schema.layout.show_header {
        if let Some(header) = &template.schema.layout.header {
            let rendered = render_fragment(header, data, "__header")?;
            body.push_str(&format!("<header class=\"document-header\">{}</header>\n", rendered));
        }
    }

    for section in template.ordered_sections() {
        let rendered = render_fragment(&section.content, data, &section.id)?;
        if rendered.is_empty() && is_visibility_wrapped(section) {
            // Hidden section: emit nothing, not an empty wrapper
            continue;
        }
        body.push_str(&format!(
            "<section class=\"section section-{id}\" id=\"{id}\">{content}</section>\n",
            id = section.id,
            content = rendered
        ));
    }

    if template.schema.layout.show_footer {
        if let Some(footer) = &template.schema.layout.footer {
            let rendered = render_fragment(footer, data, "__footer")?;
            body.push_str(&format!("<footer class=\"document-footer\">{}</footer>\n", rendered));
        }
    }

    let html = format!("<div class=\"document\">\n{}</div>", body);

    // Branding overlays styling tokens additively before CSS generation
    let mut tokens: StyleTokens = template.schema.styling.clone();
    if let Some(branding) = branding {
        tokens.overlay(&branding.as_style_overlay());
    }
    let mut css = customization::base_stylesheet(&tokens);
    for section in &template.schema.sections {
        css.push_str(&section_css(section));
    }
    if !template.content.css.is_empty() {
        css.push_str(&template.content.css);
        if !template.content.css.ends_with('\n') {
            css.push('\n');
        }
    }

    Ok(CompiledContent {
        html,
        css,
        js: template.content.js.clone(),
        assets: template.content.assets.clone(),
    })
}

fn render_fragment(
    content: &str,
    data: &TemplateData,
    section_id: &str,
) -> CompositionResult<String> {
    placeholder::render(content, data).map_err(|e| CompositionError::MalformedPlaceholder {
        section: section_id.to_string(),
        detail: e.0,
    })
}

fn is_visibility_wrapped(section: &TemplateSection) -> bool {
    section
        .content
        .starts_with(&format!("{{{{#if __section_{}}}}}", section.id))
}

fn section_css(section: &TemplateSection) -> String {
    let styling = &section.styling;
    if styling.is_empty() {
        return String::new();
    }
    let mut rules = String::new();
    if let Some(v) = &styling.background {
        rules.push_str(&format!("  background: {};\n", v));
    }
    if let Some(v) = &styling.padding {
        rules.push_str(&format!("  padding: {};\n", v));
    }
    if let Some(v) = &styling.margin {
        rules.push_str(&format!("  margin: {};\n", v));
    }
    if let Some(v) = &styling.border {
        rules.push_str(&format!("  border: {};\n", v));
    }
    if let Some(v) = &styling.text_align {
        rules.push_str(&format!("  text-align: {};\n", v));
    }
    let mut custom: Vec<_> = styling.custom.iter().collect();
    custom.sort_by(|a, b| a.0.cmp(b.0));
    for (property, value) in custom {
        rules.push_str(&format!("  {}: {};\n", property, value));
    }
    format!(".section-{} {{\n{}}}\n", section.id, rules)
}

/// Deterministic cache key for one (template, data, branding) combination.
fn cache_key(template: &Template, data: &TemplateData, branding: Option<&ClientBranding>) -> String {
    let data_hash = fnv1a(data.canonical_json().as_bytes());
    let branding_hash = match branding {
        Some(b) => fnv1a(
            serde_json::to_string(b)
                .unwrap_or_default()
                .as_bytes(),
        ),
        None => 0,
    };
    format!(
        "{}:{}:{:016x}:{:016x}",
        template.id, template.version, data_hash, branding_hash
    )
}

/// FNV-1a, 64-bit
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use template_model::{TemplateVariable, VariableType};

    fn proposal_template() -> Template {
        let mut t = Template::new("Proposal");
        t.schema
            .variables
            .push(TemplateVariable::required("client_name", VariableType::Text));
        t.schema
            .variables
            .push(TemplateVariable::required("project_title", VariableType::Text));
        t.schema.variables.push(
            TemplateVariable::new("greeting", VariableType::Text)
                .with_default(json!("Dear")),
        );
        t.schema.sections.push(
            TemplateSection::new(
                "intro",
                "Introduction",
                "<p>{{greeting}} {{client_name}}, re: {{project_title}}</p>",
            )
            .with_order(1)
            .with_variables(vec!["greeting", "client_name", "project_title"]),
        );
        t
    }

    #[test]
    fn test_all_missing_required_reported() {
        let template = proposal_template();
        let result = Composer::new().compose(&template, &TemplateData::new(), None);
        match result {
            Err(CompositionError::MissingRequiredVariables(names)) => {
                assert_eq!(names, vec!["client_name", "project_title"]);
            }
            other => panic!("expected missing-variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let template = proposal_template();
        let data = TemplateData::new()
            .set("client_name", json!(""))
            .set("project_title", json!("X"));
        let result = Composer::new().compose(&template, &data, None);
        match result {
            Err(CompositionError::MissingRequiredVariables(names)) => {
                assert_eq!(names, vec!["client_name"]);
            }
            other => panic!("expected missing-variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_compose_substitutes_and_defaults() {
        let template = proposal_template();
        let data = TemplateData::new()
            .set("client_name", json!("Acme"))
            .set("project_title", json!("Website Revamp"));
        let composed = Composer::new().compose(&template, &data, None).unwrap();
        assert!(composed
            .compiled_content
            .html
            .contains("Dear Acme, re: Website Revamp"));
    }

    #[test]
    fn test_determinism() {
        let template = proposal_template();
        let data = TemplateData::new()
            .set("client_name", json!("Acme"))
            .set("project_title", json!("X"));
        let a = Composer::uncached().compose(&template, &data, None).unwrap();
        let b = Composer::uncached().compose(&template, &data, None).unwrap();
        assert_eq!(a.compiled_content, b.compiled_content);
        assert_eq!(a.metadata.cache_key, b.metadata.cache_key);
    }

    #[test]
    fn test_cached_and_uncached_agree() {
        let template = proposal_template();
        let data = TemplateData::new()
            .set("client_name", json!("Acme"))
            .set("project_title", json!("X"));
        let mut cached = Composer::new();
        let first = cached.compose(&template, &data, None).unwrap();
        let second = cached.compose(&template, &data, None).unwrap();
        let fresh = Composer::uncached().compose(&template, &data, None).unwrap();
        assert_eq!(first.compiled_content, second.compiled_content);
        assert_eq!(first.compiled_content, fresh.compiled_content);
    }

    #[test]
    fn test_branding_changes_cache_key_and_css() {
        let template = proposal_template();
        let data = TemplateData::new()
            .set("client_name", json!("Acme"))
            .set("project_title", json!("X"));
        let mut branding = ClientBranding::new("acme");
        branding.color_palette.primary = Some("#336699".to_string());

        let plain = Composer::uncached().compose(&template, &data, None).unwrap();
        let branded = Composer::uncached()
            .compose(&template, &data, Some(&branding))
            .unwrap();
        assert_ne!(plain.metadata.cache_key, branded.metadata.cache_key);
        assert!(branded.compiled_content.css.contains("#336699"));
    }

    #[test]
    fn test_sections_assembled_in_order() {
        let mut template = proposal_template();
        template.schema.sections.push(
            TemplateSection::new("closing", "Closing", "<p>Regards</p>").with_order(0),
        );
        let data = TemplateData::new()
            .set("client_name", json!("Acme"))
            .set("project_title", json!("X"));
        let composed = Composer::new().compose(&template, &data, None).unwrap();
        let html = &composed.compiled_content.html;
        let closing = html.find("id=\"closing\"").unwrap();
        let intro = html.find("id=\"intro\"").unwrap();
        assert!(closing < intro);
    }

    #[test]
    fn test_hidden_section_emits_nothing() {
        let mut template = proposal_template();
        template.schema.sections.push(
            TemplateSection::new(
                "notes",
                "Notes",
                "{{#if __section_notes}}<p>internal</p>{{/if}}",
            )
            .with_order(9),
        );
        let data = TemplateData::new()
            .set("client_name", json!("Acme"))
            .set("project_title", json!("X"));
        let composed = Composer::new().compose(&template, &data, None).unwrap();
        assert!(!composed.compiled_content.html.contains("id=\"notes\""));
        assert!(!composed.compiled_content.html.contains("internal"));
    }

    #[test]
    fn test_lint_accepts_each_body_fields() {
        let mut template = proposal_template();
        template.schema.sections.push(
            TemplateSection::new(
                "metrics",
                "Metrics",
                "<table>{{#each metrics}}<tr><td>{{label}}</td><td>{{value}}</td></tr>{{/each}}</table>",
            )
            .with_order(5)
            .with_variables(vec!["metrics"]),
        );
        assert!(Composer::new().lint(&template).is_empty());
    }

    #[test]
    fn test_lint_flags_undeclared_placeholder() {
        let mut template = proposal_template();
        template.schema.sections.push(
            TemplateSection::new("extra", "Extra", "<p>{{surprise}}</p>").with_order(3),
        );
        let warnings = Composer::new().lint(&template);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].section_id, "extra");
    }

    mod determinism {
        use super::proposal_template;
        use crate::composer::Composer;
        use proptest::prelude::*;
        use serde_json::json;
        use template_model::TemplateData;

        proptest! {
            #[test]
            fn compose_is_deterministic(
                name in "[a-zA-Z0-9 ]{1,40}",
                title in "[a-zA-Z0-9 ]{1,40}",
            ) {
                let template = proposal_template();
                let data = TemplateData::new()
                    .set("client_name", json!(name))
                    .set("project_title", json!(title));
                let a = Composer::uncached().compose(&template, &data, None).unwrap();
                let b = Composer::uncached().compose(&template, &data, None).unwrap();
                prop_assert_eq!(a.compiled_content, b.compiled_content);
                prop_assert_eq!(a.metadata.cache_key, b.metadata.cache_key);
            }
        }
    }

    #[test]
    fn test_malformed_section_content() {
        let mut template = proposal_template();
        template.schema.sections.push(
            TemplateSection::new("bad", "Bad", "{{#each items}}x").with_order(2),
        );
        let data = TemplateData::new()
            .set("client_name", json!("Acme"))
            .set("project_title", json!("X"));
        let result = Composer::new().compose(&template, &data, None);
        assert!(matches!(
            result,
            Err(CompositionError::MalformedPlaceholder { .. })
        ));
    }
}
