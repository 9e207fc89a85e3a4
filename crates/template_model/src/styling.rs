//! Style tokens - template-level color, typography and spacing values
//!
//! Tokens are Option-valued so that branding and customization can be
//! layered additively: a layer only overwrites the tokens it names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named color tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorTokens {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
    /// Additional named colors (success, warning, ...)
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl ColorTokens {
    /// Overlay `other` on top of `self`; tokens unset in `other` are kept.
    pub fn overlay(&mut self, other: &ColorTokens) {
        if let Some(v) = &other.primary {
            self.primary = Some(v.clone());
        }
        if let Some(v) = &other.secondary {
            self.secondary = Some(v.clone());
        }
        if let Some(v) = &other.accent {
            self.accent = Some(v.clone());
        }
        if let Some(v) = &other.background {
            self.background = Some(v.clone());
        }
        if let Some(v) = &other.text {
            self.text = Some(v.clone());
        }
        for (k, v) in &other.extra {
            self.extra.insert(k.clone(), v.clone());
        }
    }

    /// Iterate the set tokens as (name, value) pairs in a stable order.
    pub fn iter_set(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(v) = &self.primary {
            out.push(("primary".to_string(), v.clone()));
        }
        if let Some(v) = &self.secondary {
            out.push(("secondary".to_string(), v.clone()));
        }
        if let Some(v) = &self.accent {
            out.push(("accent".to_string(), v.clone()));
        }
        if let Some(v) = &self.background {
            out.push(("background".to_string(), v.clone()));
        }
        if let Some(v) = &self.text {
            out.push(("text".to_string(), v.clone()));
        }
        let mut extra: Vec<_> = self.extra.iter().collect();
        extra.sort_by(|a, b| a.0.cmp(b.0));
        for (k, v) in extra {
            out.push((k.clone(), v.clone()));
        }
        out
    }
}

/// Typography tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypographyTokens {
    /// Body font family stack
    pub font_family: Option<String>,
    /// Heading font family stack
    pub heading_family: Option<String>,
    /// Base font size in px
    pub base_size_px: Option<u32>,
    /// Line height multiplier
    pub line_height: Option<f32>,
}

impl TypographyTokens {
    pub fn overlay(&mut self, other: &TypographyTokens) {
        if let Some(v) = &other.font_family {
            self.font_family = Some(v.clone());
        }
        if let Some(v) = &other.heading_family {
            self.heading_family = Some(v.clone());
        }
        if let Some(v) = other.base_size_px {
            self.base_size_px = Some(v);
        }
        if let Some(v) = other.line_height {
            self.line_height = Some(v);
        }
    }
}

/// Spacing tokens, in rem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacingTokens {
    pub section_gap: Option<f32>,
    pub paragraph_gap: Option<f32>,
}

impl SpacingTokens {
    pub fn overlay(&mut self, other: &SpacingTokens) {
        if let Some(v) = other.section_gap {
            self.section_gap = Some(v);
        }
        if let Some(v) = other.paragraph_gap {
            self.paragraph_gap = Some(v);
        }
    }
}

/// The full style token set carried by a template or pattern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleTokens {
    #[serde(default)]
    pub colors: ColorTokens,
    #[serde(default)]
    pub typography: TypographyTokens,
    #[serde(default)]
    pub spacing: SpacingTokens,
}

impl StyleTokens {
    pub fn overlay(&mut self, other: &StyleTokens) {
        self.colors.overlay(&other.colors);
        self.typography.overlay(&other.typography);
        self.spacing.overlay(&other.spacing);
    }
}
