//! Customization application
//!
//! All entry points are non-destructive overlays: fields the options do not
//! name keep their prior value, at every nesting level. A template's version
//! is bumped only when the overlay actually changed something, so re-applying
//! the same options is idempotent.

use crate::error::{CustomizationError, CustomizationResult};
use crate::options::CustomizationOptions;
use crate::presets::Preset;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use template_model::{
    Asset, MarginUnit, Margins, PageSettings, SectionStyling, Template, TemplateVariable,
    VariableType,
};

/// Per-section customization request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionCustomization {
    pub section_id: String,
    /// Replacement markup for the section body
    pub content: Option<String>,
    /// Visibility toggle; hiding wraps the content in a synthetic
    /// conditional so the toggle is reversible
    pub visible: Option<bool>,
    /// New assembly position
    pub order: Option<u32>,
    /// Styling overlay for the section
    pub styling: Option<SectionStyling>,
}

/// Per-variable customization request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableCustomization {
    pub name: String,
    pub default_value: Option<Value>,
    pub required: Option<bool>,
    pub description: Option<String>,
}

/// The synthetic variable name guarding a hidden section's content.
pub fn visibility_binding(section_id: &str) -> String {
    format!("__section_{}", section_id)
}

fn hide_wrapper(section_id: &str, content: &str) -> String {
    format!(
        "{{{{#if {}}}}}{}{{{{/if}}}}",
        visibility_binding(section_id),
        content
    )
}

fn is_hidden(section_id: &str, content: &str) -> bool {
    let prefix = format!("{{{{#if {}}}}}", visibility_binding(section_id));
    content.starts_with(&prefix) && content.ends_with("{{/if}}")
}

fn unwrap_hidden(section_id: &str, content: &str) -> String {
    let prefix = format!("{{{{#if {}}}}}", visibility_binding(section_id));
    content
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix("{{/if}}"))
        .unwrap_or(content)
        .to_string()
}

/// Apply an ad-hoc options overlay to a template.
pub fn customize_template(template: &Template, options: &CustomizationOptions) -> Template {
    let mut result = template.clone();

    if let Some(colors) = &options.colors {
        let tokens = &mut result.schema.styling.colors;
        if let Some(v) = &colors.primary {
            tokens.primary = Some(v.clone());
        }
        if let Some(v) = &colors.secondary {
            tokens.secondary = Some(v.clone());
        }
        if let Some(v) = &colors.accent {
            tokens.accent = Some(v.clone());
        }
        if let Some(v) = &colors.background {
            tokens.background = Some(v.clone());
        }
        if let Some(v) = &colors.text {
            tokens.text = Some(v.clone());
        }
    }

    if let Some(typography) = &options.typography {
        let tokens = &mut result.schema.styling.typography;
        if let Some(v) = &typography.font_family {
            tokens.font_family = Some(v.clone());
        }
        if let Some(v) = &typography.heading_family {
            tokens.heading_family = Some(v.clone());
        }
        if let Some(size) = typography.font_size {
            tokens.base_size_px = Some(size.px());
        }
    }

    if let Some(spacing) = &options.spacing {
        if let Some(scale) = spacing.scale {
            result.schema.styling.spacing.section_gap = Some(scale.section_rem());
            result.schema.styling.spacing.paragraph_gap = Some(scale.paragraph_rem());
        }
    }

    if let Some(layout) = &options.layout {
        if layout.page_size.is_some() || layout.orientation.is_some() || layout.margins.is_some() {
            let settings = result.page_settings.get_or_insert_with(PageSettings::default);
            if let Some(size) = layout.page_size {
                settings.size = size;
            }
            if let Some(orientation) = layout.orientation {
                settings.orientation = orientation;
            }
            if let Some(preset) = layout.margins {
                settings.margins = Margins::uniform(preset.inches(), MarginUnit::In);
            }
        }
        if let Some(columns) = layout.columns {
            result.schema.layout.columns = Some(columns);
        }
    }

    if let Some(content) = &options.content {
        if let Some(show) = content.show_header {
            result.schema.layout.show_header = show;
        }
        if let Some(show) = content.show_footer {
            result.schema.layout.show_footer = show;
        }
        if let Some(show) = content.show_page_numbers {
            result.schema.layout.page_numbers = show;
        }
    }

    if let Some(branding) = &options.branding {
        if let Some(url) = &branding.logo_url {
            result.content.assets.retain(|a| a.name != "logo");
            result.content.assets.push(Asset {
                name: "logo".to_string(),
                mime_type: "image/*".to_string(),
                url: url.clone(),
            });
        }
        if let Some(footer) = &branding.footer_text {
            result.schema.layout.footer = Some(footer.clone());
        }
        if let Some(company) = &branding.company_name {
            match result
                .schema
                .variables
                .iter_mut()
                .find(|v| v.name == "company_name")
            {
                Some(var) => var.default_value = Some(Value::String(company.clone())),
                None => result.schema.variables.push(
                    TemplateVariable::new("company_name", VariableType::Text)
                        .with_default(Value::String(company.clone())),
                ),
            }
        }
    }

    if result.schema != template.schema
        || result.page_settings != template.page_settings
        || result.content != template.content
    {
        result.bump_version();
    }
    result
}

/// Apply a named preset, then layer caller overrides on top.
pub fn customize_from_preset(
    template: &Template,
    preset_id: &str,
    overrides: Option<&CustomizationOptions>,
) -> CustomizationResult<Template> {
    let preset = Preset::from_id(preset_id)
        .ok_or_else(|| CustomizationError::UnknownPreset(preset_id.to_string()))?;
    let mut options = preset.options();
    if let Some(overrides) = overrides {
        options.merge(overrides);
    }
    Ok(customize_template(template, &options))
}

/// Apply per-section customizations.
pub fn customize_sections(
    template: &Template,
    customizations: &[SectionCustomization],
) -> CustomizationResult<Template> {
    let mut result = template.clone();
    for custom in customizations {
        let section = result
            .schema
            .sections
            .iter_mut()
            .find(|s| s.id == custom.section_id)
            .ok_or_else(|| CustomizationError::SectionNotFound(custom.section_id.clone()))?;

        if let Some(content) = &custom.content {
            // Preserve a hide wrapper across content replacement
            let hidden = is_hidden(&section.id, &section.content);
            section.content = if hidden {
                hide_wrapper(&section.id, content)
            } else {
                content.clone()
            };
        }
        if let Some(visible) = custom.visible {
            let hidden = is_hidden(&section.id, &section.content);
            if !visible && !hidden {
                section.content = hide_wrapper(&section.id, &section.content);
            } else if visible && hidden {
                section.content = unwrap_hidden(&section.id, &section.content);
            }
        }
        if let Some(order) = custom.order {
            section.order = order;
        }
        if let Some(styling) = &custom.styling {
            if let Some(v) = &styling.background {
                section.styling.background = Some(v.clone());
            }
            if let Some(v) = &styling.padding {
                section.styling.padding = Some(v.clone());
            }
            if let Some(v) = &styling.margin {
                section.styling.margin = Some(v.clone());
            }
            if let Some(v) = &styling.border {
                section.styling.border = Some(v.clone());
            }
            if let Some(v) = &styling.text_align {
                section.styling.text_align = Some(v.clone());
            }
            for (k, v) in &styling.custom {
                section.styling.custom.insert(k.clone(), v.clone());
            }
        }
    }
    if result.schema != template.schema {
        result.bump_version();
    }
    Ok(result)
}

/// Apply per-variable customizations.
pub fn customize_variables(
    template: &Template,
    customizations: &[VariableCustomization],
) -> CustomizationResult<Template> {
    let mut result = template.clone();
    for custom in customizations {
        let variable = result
            .schema
            .variables
            .iter_mut()
            .find(|v| v.name == custom.name)
            .ok_or_else(|| CustomizationError::VariableNotFound(custom.name.clone()))?;

        if let Some(default) = &custom.default_value {
            variable.default_value = Some(default.clone());
        }
        if let Some(required) = custom.required {
            variable.required = required;
        }
        if let Some(description) = &custom.description {
            variable.description = Some(description.clone());
        }
    }
    if result.schema != template.schema {
        result.bump_version();
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ColorOptions;
    use template_model::TemplateSection;

    fn template_with_section() -> Template {
        let mut t = Template::new("Test");
        t.schema.styling.colors.secondary = Some("#222222".to_string());
        t.schema
            .sections
            .push(TemplateSection::new("body", "Body", "<p>{{text}}</p>"));
        t
    }

    #[test]
    fn test_overlay_changes_only_named_fields() {
        let template = template_with_section();
        let options = CustomizationOptions {
            colors: Some(ColorOptions {
                primary: Some("#111111".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = customize_template(&template, &options);
        assert_eq!(result.schema.styling.colors.primary.as_deref(), Some("#111111"));
        assert_eq!(
            result.schema.styling.colors.secondary,
            template.schema.styling.colors.secondary
        );
        assert_eq!(result.schema.styling.typography, template.schema.styling.typography);
        assert_eq!(result.schema.sections, template.schema.sections);
    }

    #[test]
    fn test_preset_idempotence() {
        let template = template_with_section();
        let once = customize_from_preset(&template, "professional", None).unwrap();
        let twice = customize_from_preset(&once, "professional", None).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preset_overrides_win() {
        let template = template_with_section();
        let overrides = CustomizationOptions {
            colors: Some(ColorOptions {
                primary: Some("#ff0000".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = customize_from_preset(&template, "professional", Some(&overrides)).unwrap();
        assert_eq!(result.schema.styling.colors.primary.as_deref(), Some("#ff0000"));
        // Rest of the preset still applied
        assert_eq!(result.schema.styling.colors.text.as_deref(), Some("#222222"));
    }

    #[test]
    fn test_unknown_preset() {
        let template = template_with_section();
        let result = customize_from_preset(&template, "funky", None);
        assert!(matches!(result, Err(CustomizationError::UnknownPreset(_))));
    }

    #[test]
    fn test_hide_and_show_round_trip() {
        let template = template_with_section();
        let hide = vec![SectionCustomization {
            section_id: "body".to_string(),
            visible: Some(false),
            ..Default::default()
        }];
        let hidden = customize_sections(&template, &hide).unwrap();
        let content = &hidden.section("body").unwrap().content;
        assert!(content.starts_with("{{#if __section_body}}"));
        assert!(content.ends_with("{{/if}}"));

        let show = vec![SectionCustomization {
            section_id: "body".to_string(),
            visible: Some(true),
            ..Default::default()
        }];
        let restored = customize_sections(&hidden, &show).unwrap();
        assert_eq!(
            restored.section("body").unwrap().content,
            template.section("body").unwrap().content
        );
    }

    #[test]
    fn test_hiding_twice_does_not_double_wrap() {
        let template = template_with_section();
        let hide = vec![SectionCustomization {
            section_id: "body".to_string(),
            visible: Some(false),
            ..Default::default()
        }];
        let once = customize_sections(&template, &hide).unwrap();
        let twice = customize_sections(&once, &hide).unwrap();
        assert_eq!(
            once.section("body").unwrap().content,
            twice.section("body").unwrap().content
        );
    }

    #[test]
    fn test_section_reorder() {
        let mut template = template_with_section();
        template
            .schema
            .sections
            .push(TemplateSection::new("footer", "Footer", "<p>end</p>").with_order(1));
        let reorder = vec![SectionCustomization {
            section_id: "body".to_string(),
            order: Some(5),
            ..Default::default()
        }];
        let result = customize_sections(&template, &reorder).unwrap();
        let ids: Vec<_> = result.ordered_sections().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["footer", "body"]);
    }

    #[test]
    fn test_variable_customization() {
        let mut template = template_with_section();
        template
            .schema
            .variables
            .push(TemplateVariable::required("text", VariableType::Text));
        let customs = vec![VariableCustomization {
            name: "text".to_string(),
            default_value: Some(Value::String("hello".to_string())),
            required: Some(false),
            ..Default::default()
        }];
        let result = customize_variables(&template, &customs).unwrap();
        let var = result.variable("text").unwrap();
        assert!(!var.required);
        assert_eq!(var.default_value, Some(Value::String("hello".to_string())));

        let missing = vec![VariableCustomization {
            name: "nope".to_string(),
            ..Default::default()
        }];
        assert!(matches!(
            customize_variables(&template, &missing),
            Err(CustomizationError::VariableNotFound(_))
        ));
    }

    #[test]
    fn test_unchanged_overlay_keeps_version() {
        let template = template_with_section();
        let result = customize_template(&template, &CustomizationOptions::default());
        assert_eq!(result.version, template.version);
        assert_eq!(result, template);
    }
}
