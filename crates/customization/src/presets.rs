//! Built-in customization presets
//!
//! Four named, immutable option bundles. `customize_from_preset` applies the
//! preset first and layers any caller overrides on top, so overrides always
//! win.

use crate::options::{
    ColorOptions, CustomizationOptions, FontSize, MarginPreset, SpacingOptions, SpacingScale,
    TypographyOptions,
};
use crate::options::LayoutOptions;

/// The built-in presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Professional,
    Creative,
    Minimal,
    Corporate,
}

impl Preset {
    /// Resolve a preset from its public id.
    pub fn from_id(id: &str) -> Option<Preset> {
        match id {
            "professional" => Some(Preset::Professional),
            "creative" => Some(Preset::Creative),
            "minimal" => Some(Preset::Minimal),
            "corporate" => Some(Preset::Corporate),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Preset::Professional => "professional",
            Preset::Creative => "creative",
            Preset::Minimal => "minimal",
            Preset::Corporate => "corporate",
        }
    }

    /// The option bundle this preset stands for.
    pub fn options(&self) -> CustomizationOptions {
        match self {
            Preset::Professional => CustomizationOptions {
                colors: Some(ColorOptions {
                    primary: Some("#1f3a5f".to_string()),
                    secondary: Some("#4a6fa5".to_string()),
                    background: Some("#ffffff".to_string()),
                    text: Some("#222222".to_string()),
                    ..Default::default()
                }),
                typography: Some(TypographyOptions {
                    font_family: Some("Georgia, 'Times New Roman', serif".to_string()),
                    heading_family: Some("Georgia, serif".to_string()),
                    font_size: Some(FontSize::Medium),
                }),
                spacing: Some(SpacingOptions {
                    scale: Some(SpacingScale::Normal),
                }),
                layout: Some(LayoutOptions {
                    margins: Some(MarginPreset::Normal),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Preset::Creative => CustomizationOptions {
                colors: Some(ColorOptions {
                    primary: Some("#e63946".to_string()),
                    accent: Some("#f4a261".to_string()),
                    background: Some("#fffdf7".to_string()),
                    text: Some("#2b2d42".to_string()),
                    ..Default::default()
                }),
                typography: Some(TypographyOptions {
                    font_family: Some("'Poppins', 'Segoe UI', sans-serif".to_string()),
                    heading_family: Some("'Poppins', sans-serif".to_string()),
                    font_size: Some(FontSize::Large),
                }),
                spacing: Some(SpacingOptions {
                    scale: Some(SpacingScale::Loose),
                }),
                layout: Some(LayoutOptions {
                    margins: Some(MarginPreset::Wide),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Preset::Minimal => CustomizationOptions {
                colors: Some(ColorOptions {
                    primary: Some("#000000".to_string()),
                    background: Some("#ffffff".to_string()),
                    text: Some("#111111".to_string()),
                    ..Default::default()
                }),
                typography: Some(TypographyOptions {
                    font_family: Some("'Helvetica Neue', Helvetica, sans-serif".to_string()),
                    heading_family: None,
                    font_size: Some(FontSize::Small),
                }),
                spacing: Some(SpacingOptions {
                    scale: Some(SpacingScale::Tight),
                }),
                layout: Some(LayoutOptions {
                    margins: Some(MarginPreset::Narrow),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Preset::Corporate => CustomizationOptions {
                colors: Some(ColorOptions {
                    primary: Some("#0b3d91".to_string()),
                    secondary: Some("#6b7a8f".to_string()),
                    background: Some("#ffffff".to_string()),
                    text: Some("#1a1a1a".to_string()),
                    ..Default::default()
                }),
                typography: Some(TypographyOptions {
                    font_family: Some("Arial, 'Helvetica Neue', sans-serif".to_string()),
                    heading_family: Some("Arial, sans-serif".to_string()),
                    font_size: Some(FontSize::Medium),
                }),
                spacing: Some(SpacingOptions {
                    scale: Some(SpacingScale::Normal),
                }),
                layout: Some(LayoutOptions {
                    margins: Some(MarginPreset::Normal),
                    ..Default::default()
                }),
                ..Default::default()
            },
        }
    }

    /// All built-in preset ids, in display order.
    pub fn all() -> [Preset; 4] {
        [
            Preset::Professional,
            Preset::Creative,
            Preset::Minimal,
            Preset::Corporate,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_roundtrip() {
        for preset in Preset::all() {
            assert_eq!(Preset::from_id(preset.id()), Some(preset));
        }
        assert_eq!(Preset::from_id("bold"), None);
    }

    #[test]
    fn test_preset_options_are_stable() {
        // Presets are immutable bundles: two lookups yield identical options.
        assert_eq!(
            Preset::Professional.options(),
            Preset::Professional.options()
        );
    }
}
