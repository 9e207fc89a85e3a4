//! Client branding - a tenant's visual identity
//!
//! Branding is applied additively over template styling: branding keys
//! overwrite matching token names, unspecified tokens are retained.

use crate::color::is_valid_color;
use crate::error::{ModelError, ModelResult};
use crate::styling::{ColorTokens, StyleTokens, TypographyTokens};
use crate::template::Asset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tenant's color palette
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub neutral: Option<String>,
    /// Semantic names (success, error, ...) -> color value
    #[serde(default)]
    pub semantic: HashMap<String, String>,
}

/// Brand typography preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandTypography {
    pub font_family: Option<String>,
    pub heading_family: Option<String>,
}

/// Brand spacing preferences, in rem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandSpacing {
    pub section_gap: Option<f32>,
    pub paragraph_gap: Option<f32>,
}

/// A tenant's visual identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientBranding {
    pub id: String,
    #[serde(default)]
    pub color_palette: ColorPalette,
    #[serde(default)]
    pub typography: BrandTypography,
    pub spacing: Option<BrandSpacing>,
    pub logo: Option<Asset>,
}

impl ClientBranding {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Check every color in the palette, returning the first invalid one.
    pub fn validate_colors(&self) -> ModelResult<()> {
        let named = [
            &self.color_palette.primary,
            &self.color_palette.secondary,
            &self.color_palette.accent,
            &self.color_palette.neutral,
        ];
        for color in named.into_iter().flatten() {
            if !is_valid_color(color) {
                return Err(ModelError::InvalidColor(color.clone()));
            }
        }
        for color in self.color_palette.semantic.values() {
            if !is_valid_color(color) {
                return Err(ModelError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }

    /// Express this branding as a style-token overlay.
    pub fn as_style_overlay(&self) -> StyleTokens {
        let mut colors = ColorTokens {
            primary: self.color_palette.primary.clone(),
            secondary: self.color_palette.secondary.clone(),
            accent: self.color_palette.accent.clone(),
            ..Default::default()
        };
        if let Some(neutral) = &self.color_palette.neutral {
            colors.extra.insert("neutral".to_string(), neutral.clone());
        }
        for (name, value) in &self.color_palette.semantic {
            colors.extra.insert(name.clone(), value.clone());
        }
        let typography = TypographyTokens {
            font_family: self.typography.font_family.clone(),
            heading_family: self.typography.heading_family.clone(),
            ..Default::default()
        };
        let spacing = self
            .spacing
            .as_ref()
            .map(|s| crate::styling::SpacingTokens {
                section_gap: s.section_gap,
                paragraph_gap: s.paragraph_gap,
            })
            .unwrap_or_default();
        StyleTokens {
            colors,
            typography,
            spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_colors() {
        let mut branding = ClientBranding::new("acme");
        branding.color_palette.primary = Some("#336699".to_string());
        assert!(branding.validate_colors().is_ok());

        branding.color_palette.secondary = Some("cornflower".to_string());
        assert!(matches!(
            branding.validate_colors(),
            Err(ModelError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_overlay_is_additive() {
        let mut branding = ClientBranding::new("acme");
        branding.color_palette.primary = Some("#336699".to_string());

        let mut base = StyleTokens::default();
        base.colors.text = Some("#000000".to_string());
        base.overlay(&branding.as_style_overlay());

        assert_eq!(base.colors.primary.as_deref(), Some("#336699"));
        // unset branding tokens never clobber the base
        assert_eq!(base.colors.text.as_deref(), Some("#000000"));
    }
}
