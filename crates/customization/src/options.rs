//! Customization option bundles
//!
//! Every option is optional: an options value is an overlay, and applying it
//! only touches the fields it names. Merging is written out field by field
//! per option type so the overlay semantics stay auditable; list-valued
//! fields replace, they never concatenate.

use serde::{Deserialize, Serialize};
use template_model::{Orientation, PageSize};

/// Three-level font size with a fixed pixel mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// Fixed mapping; presets depend on these exact values.
    pub fn px(&self) -> u32 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 18,
        }
    }
}

/// Spacing scale with fixed rem values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingScale {
    Tight,
    Normal,
    Loose,
}

impl SpacingScale {
    /// Gap between sections, in rem
    pub fn section_rem(&self) -> f32 {
        match self {
            SpacingScale::Tight => 1.0,
            SpacingScale::Normal => 2.0,
            SpacingScale::Loose => 3.0,
        }
    }

    /// Gap between paragraphs, in rem
    pub fn paragraph_rem(&self) -> f32 {
        match self {
            SpacingScale::Tight => 0.5,
            SpacingScale::Normal => 1.0,
            SpacingScale::Loose => 1.5,
        }
    }
}

/// Page margin preset with fixed inch values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginPreset {
    Narrow,
    Normal,
    Wide,
}

impl MarginPreset {
    pub fn inches(&self) -> f64 {
        match self {
            MarginPreset::Narrow => 0.5,
            MarginPreset::Normal => 1.0,
            MarginPreset::Wide => 1.5,
        }
    }
}

/// Color overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorOptions {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

impl ColorOptions {
    pub fn merge(&mut self, overlay: &ColorOptions) {
        if let Some(v) = &overlay.primary {
            self.primary = Some(v.clone());
        }
        if let Some(v) = &overlay.secondary {
            self.secondary = Some(v.clone());
        }
        if let Some(v) = &overlay.accent {
            self.accent = Some(v.clone());
        }
        if let Some(v) = &overlay.background {
            self.background = Some(v.clone());
        }
        if let Some(v) = &overlay.text {
            self.text = Some(v.clone());
        }
    }

    /// Set colors as (name, value) pairs in declaration order.
    pub fn iter_set(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = &self.primary {
            out.push(("primary", v.as_str()));
        }
        if let Some(v) = &self.secondary {
            out.push(("secondary", v.as_str()));
        }
        if let Some(v) = &self.accent {
            out.push(("accent", v.as_str()));
        }
        if let Some(v) = &self.background {
            out.push(("background", v.as_str()));
        }
        if let Some(v) = &self.text {
            out.push(("text", v.as_str()));
        }
        out
    }
}

/// Typography overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypographyOptions {
    pub font_family: Option<String>,
    pub heading_family: Option<String>,
    pub font_size: Option<FontSize>,
}

impl TypographyOptions {
    pub fn merge(&mut self, overlay: &TypographyOptions) {
        if let Some(v) = &overlay.font_family {
            self.font_family = Some(v.clone());
        }
        if let Some(v) = &overlay.heading_family {
            self.heading_family = Some(v.clone());
        }
        if let Some(v) = overlay.font_size {
            self.font_size = Some(v);
        }
    }
}

/// Spacing overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacingOptions {
    pub scale: Option<SpacingScale>,
}

impl SpacingOptions {
    pub fn merge(&mut self, overlay: &SpacingOptions) {
        if let Some(v) = overlay.scale {
            self.scale = Some(v);
        }
    }
}

/// Layout overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub page_size: Option<PageSize>,
    pub orientation: Option<Orientation>,
    pub margins: Option<MarginPreset>,
    pub columns: Option<u32>,
}

impl LayoutOptions {
    pub fn merge(&mut self, overlay: &LayoutOptions) {
        if let Some(v) = overlay.page_size {
            self.page_size = Some(v);
        }
        if let Some(v) = overlay.orientation {
            self.orientation = Some(v);
        }
        if let Some(v) = overlay.margins {
            self.margins = Some(v);
        }
        if let Some(v) = overlay.columns {
            self.columns = Some(v);
        }
    }
}

/// Content toggles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentOptions {
    pub show_header: Option<bool>,
    pub show_footer: Option<bool>,
    pub show_page_numbers: Option<bool>,
}

impl ContentOptions {
    pub fn merge(&mut self, overlay: &ContentOptions) {
        if let Some(v) = overlay.show_header {
            self.show_header = Some(v);
        }
        if let Some(v) = overlay.show_footer {
            self.show_footer = Some(v);
        }
        if let Some(v) = overlay.show_page_numbers {
            self.show_page_numbers = Some(v);
        }
    }
}

/// Branding-related overrides applied at customization time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandingOptions {
    pub logo_url: Option<String>,
    pub company_name: Option<String>,
    pub footer_text: Option<String>,
}

impl BrandingOptions {
    pub fn merge(&mut self, overlay: &BrandingOptions) {
        if let Some(v) = &overlay.logo_url {
            self.logo_url = Some(v.clone());
        }
        if let Some(v) = &overlay.company_name {
            self.company_name = Some(v.clone());
        }
        if let Some(v) = &overlay.footer_text {
            self.footer_text = Some(v.clone());
        }
    }
}

/// The full ad-hoc customization bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomizationOptions {
    pub colors: Option<ColorOptions>,
    pub typography: Option<TypographyOptions>,
    pub spacing: Option<SpacingOptions>,
    pub layout: Option<LayoutOptions>,
    pub content: Option<ContentOptions>,
    pub branding: Option<BrandingOptions>,
}

impl CustomizationOptions {
    /// Layer `overlay` on top of `self`; overlay fields always win.
    pub fn merge(&mut self, overlay: &CustomizationOptions) {
        merge_opt(&mut self.colors, &overlay.colors, ColorOptions::merge);
        merge_opt(
            &mut self.typography,
            &overlay.typography,
            TypographyOptions::merge,
        );
        merge_opt(&mut self.spacing, &overlay.spacing, SpacingOptions::merge);
        merge_opt(&mut self.layout, &overlay.layout, LayoutOptions::merge);
        merge_opt(&mut self.content, &overlay.content, ContentOptions::merge);
        merge_opt(
            &mut self.branding,
            &overlay.branding,
            BrandingOptions::merge,
        );
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_none()
            && self.typography.is_none()
            && self.spacing.is_none()
            && self.layout.is_none()
            && self.content.is_none()
            && self.branding.is_none()
    }
}

fn merge_opt<T: Clone>(base: &mut Option<T>, overlay: &Option<T>, merge: impl Fn(&mut T, &T)) {
    if let Some(over) = overlay {
        match base {
            Some(b) => merge(b, over),
            None => *base = Some(over.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlay_wins() {
        let mut base = CustomizationOptions {
            colors: Some(ColorOptions {
                primary: Some("#111111".to_string()),
                secondary: Some("#222222".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = CustomizationOptions {
            colors: Some(ColorOptions {
                primary: Some("#ff0000".to_string()),
                ..Default::default()
            }),
            typography: Some(TypographyOptions {
                font_size: Some(FontSize::Large),
                ..Default::default()
            }),
            ..Default::default()
        };
        base.merge(&overlay);

        let colors = base.colors.unwrap();
        assert_eq!(colors.primary.as_deref(), Some("#ff0000"));
        assert_eq!(colors.secondary.as_deref(), Some("#222222"));
        assert_eq!(base.typography.unwrap().font_size, Some(FontSize::Large));
    }

    #[test]
    fn test_fixed_mapping_tables() {
        assert_eq!(FontSize::Small.px(), 14);
        assert_eq!(FontSize::Medium.px(), 16);
        assert_eq!(FontSize::Large.px(), 18);
        assert_eq!(SpacingScale::Tight.section_rem(), 1.0);
        assert_eq!(SpacingScale::Normal.section_rem(), 2.0);
        assert_eq!(SpacingScale::Loose.section_rem(), 3.0);
        assert_eq!(MarginPreset::Narrow.inches(), 0.5);
        assert_eq!(MarginPreset::Wide.inches(), 1.5);
    }
}
