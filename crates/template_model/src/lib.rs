//! Shared Data Model for Docpress
//!
//! This crate defines the types the rest of the workspace composes around:
//!
//! - Templates: variables, sections, styling tokens, page settings
//! - Patterns: immutable catalog archetypes and user-derived custom patterns
//! - Branding: tenant color/typography identity applied as an additive overlay
//! - Runtime data and the composed (render-ready) output bundle
//!
//! Styling types follow an Option-overlay convention: every token is
//! optional, and layering only overwrites tokens the layer names.

mod branding;
mod color;
mod composed;
mod data;
mod error;
mod page;
mod pattern;
mod section;
mod styling;
mod template;
mod variable;

pub use branding::{BrandSpacing, BrandTypography, ClientBranding, ColorPalette};
pub use color::is_valid_color;
pub use composed::{CompiledContent, ComposedTemplate, CompositionMetadata};
pub use data::{display_value, is_truthy, TemplateData};
pub use error::{ModelError, ModelResult};
pub use page::{MarginUnit, Margins, Orientation, PageSettings, PageSize};
pub use pattern::{Complexity, CustomPattern, PatternCategory, PatternUsage, TemplatePattern};
pub use section::{SectionStyling, TemplateSection};
pub use styling::{ColorTokens, SpacingTokens, StyleTokens, TypographyTokens};
pub use template::{
    parse_version, Asset, LayoutSettings, Template, TemplateContent, TemplateMetadata,
    TemplateSchema,
};
pub use variable::{TemplateVariable, VariableType, VariableValidation};
