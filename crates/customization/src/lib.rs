//! Template Customization
//!
//! Applies named presets or ad-hoc option bundles to a template: colors,
//! typography, spacing, layout, content toggles, and branding extras. All
//! application is overlay-based and non-destructive; stylesheet generation is
//! deterministic; validation is advisory and reports field-level findings.
//!
//! # Example
//!
//! ```rust
//! use customization::{customize_from_preset, CustomizationOptions, ColorOptions};
//! use template_model::Template;
//!
//! let template = Template::new("Quarterly Report");
//! let overrides = CustomizationOptions {
//!     colors: Some(ColorOptions {
//!         primary: Some("#336699".to_string()),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//! let customized = customize_from_preset(&template, "corporate", Some(&overrides)).unwrap();
//! assert_eq!(
//!     customized.schema.styling.colors.primary.as_deref(),
//!     Some("#336699")
//! );
//! ```

mod css;
mod error;
mod options;
mod presets;
mod service;
mod validate;

pub use css::{base_stylesheet, generate_custom_css};
pub use error::{CustomizationError, CustomizationResult};
pub use options::{
    BrandingOptions, ColorOptions, ContentOptions, CustomizationOptions, FontSize, LayoutOptions,
    MarginPreset, SpacingOptions, SpacingScale, TypographyOptions,
};
pub use presets::Preset;
pub use service::{
    customize_from_preset, customize_sections, customize_template, customize_variables,
    visibility_binding, SectionCustomization, VariableCustomization,
};
pub use validate::{validate_customization, ValidationIssue, ValidationReport};
