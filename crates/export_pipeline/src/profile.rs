//! Reusable client customization profiles
//!
//! A profile bundles the per-client export setup (branding, theme, custom
//! CSS/JS, watermark, format preferences) under a stable id so callers do
//! not rebuild `ExportOptions` by hand on every request.

use crate::collaborators::{BrandingProvider, PdfCompressor, PdfRenderer};
use crate::manager::ExportManager;
use crate::options::{
    ClientCustomization, DeliveryOptions, ExportFormat, ExportOptions, ExportQuality, HtmlMode,
    OptimizationFlags, Theme, Watermark,
};
use crate::result::ExportResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use template_model::{Template, TemplateData};

/// Default export settings carried by a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPreferences {
    pub format: ExportFormat,
    #[serde(default)]
    pub quality: ExportQuality,
    #[serde(default)]
    pub html_mode: HtmlMode,
    #[serde(default)]
    pub optimization: OptimizationFlags,
    #[serde(default)]
    pub delivery: DeliveryOptions,
}

impl Default for ExportPreferences {
    fn default() -> Self {
        Self {
            format: ExportFormat::Both,
            quality: ExportQuality::default(),
            html_mode: HtmlMode::default(),
            optimization: OptimizationFlags::default(),
            delivery: DeliveryOptions::default(),
        }
    }
}

/// A named, reusable bundle of per-client export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCustomizationProfile {
    pub id: String,
    pub name: String,
    pub branding_id: Option<String>,
    pub default_theme: Option<Theme>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
    pub watermark: Option<Watermark>,
    #[serde(default)]
    pub export_preferences: ExportPreferences,
}

impl ClientCustomizationProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            branding_id: None,
            default_theme: None,
            custom_css: None,
            custom_js: None,
            watermark: None,
            export_preferences: ExportPreferences::default(),
        }
    }

    /// Expand the profile into full export options.
    pub fn to_export_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.export_preferences.format,
            quality: self.export_preferences.quality,
            html_mode: self.export_preferences.html_mode,
            client_customization: Some(ClientCustomization {
                branding_id: self.branding_id.clone(),
                theme: self.default_theme,
                custom_css: self.custom_css.clone(),
                custom_js: self.custom_js.clone(),
                watermark: self.watermark.clone(),
            }),
            optimization: self.export_preferences.optimization,
            delivery: self.export_preferences.delivery.clone(),
        }
    }
}

/// Caller-supplied overrides layered on top of a profile. Every set field
/// wins over the profile's value; unset fields fall through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportOverrides {
    pub format: Option<ExportFormat>,
    pub quality: Option<ExportQuality>,
    pub html_mode: Option<HtmlMode>,
    pub theme: Option<Theme>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
    pub watermark: Option<Watermark>,
    pub optimization: Option<OptimizationFlags>,
    pub delivery: Option<DeliveryOptions>,
}

/// Resolve profile defaults plus overrides into the options the manager
/// consumes. Overrides always win, field by field.
pub fn resolve_options(
    profile: &ClientCustomizationProfile,
    overrides: Option<&ExportOverrides>,
) -> ExportOptions {
    let mut options = profile.to_export_options();
    let Some(overrides) = overrides else {
        return options;
    };

    if let Some(format) = overrides.format {
        options.format = format;
    }
    if let Some(quality) = overrides.quality {
        options.quality = quality;
    }
    if let Some(mode) = overrides.html_mode {
        options.html_mode = mode;
    }
    if let Some(optimization) = overrides.optimization {
        options.optimization = optimization;
    }
    if let Some(delivery) = &overrides.delivery {
        options.delivery = delivery.clone();
    }

    let customization = options.client_customization.get_or_insert_with(Default::default);
    if overrides.theme.is_some() {
        customization.theme = overrides.theme;
    }
    if overrides.custom_css.is_some() {
        customization.custom_css = overrides.custom_css.clone();
    }
    if overrides.custom_js.is_some() {
        customization.custom_js = overrides.custom_js.clone();
    }
    if overrides.watermark.is_some() {
        customization.watermark = overrides.watermark.clone();
    }

    options
}

/// In-memory profile store
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: Mutex<HashMap<String, ClientCustomizationProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, profile: ClientCustomizationProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile);
    }

    pub fn get(&self, id: &str) -> Option<ClientCustomizationProfile> {
        self.profiles.lock().unwrap().get(id).cloned()
    }

    pub fn delete(&self, id: &str) -> bool {
        self.profiles.lock().unwrap().remove(id).is_some()
    }

    /// All profiles, sorted by id for stable listings.
    pub fn list(&self) -> Vec<ClientCustomizationProfile> {
        let mut profiles: Vec<_> = self.profiles.lock().unwrap().values().cloned().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }
}

impl<R, C, B> ExportManager<R, C, B>
where
    R: PdfRenderer,
    C: PdfCompressor,
    B: BrandingProvider,
{
    /// Export with a stored profile's defaults, letting caller overrides win
    /// field by field.
    pub async fn export_with_profile(
        &mut self,
        template: &Template,
        data: &TemplateData,
        profile: &ClientCustomizationProfile,
        overrides: Option<&ExportOverrides>,
    ) -> ExportResult {
        let options = resolve_options(profile, overrides);
        self.export_document(template, data, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> ClientCustomizationProfile {
        let mut profile = ClientCustomizationProfile::new("acme", "Acme Corp");
        profile.default_theme = Some(Theme::Dark);
        profile.custom_css = Some(".brand { color: teal; }".to_string());
        profile.watermark = Some(Watermark::new("ACME"));
        profile.export_preferences.format = ExportFormat::Html;
        profile
    }

    #[test]
    fn test_profile_expands_to_options() {
        let options = sample_profile().to_export_options();
        assert_eq!(options.format, ExportFormat::Html);
        let customization = options.client_customization.unwrap();
        assert_eq!(customization.theme, Some(Theme::Dark));
        assert_eq!(
            customization.watermark.as_ref().map(|w| w.text.as_str()),
            Some("ACME")
        );
    }

    #[test]
    fn test_overrides_win_field_by_field() {
        let profile = sample_profile();
        let overrides = ExportOverrides {
            format: Some(ExportFormat::Both),
            theme: Some(Theme::Light),
            ..Default::default()
        };
        let options = resolve_options(&profile, Some(&overrides));

        assert_eq!(options.format, ExportFormat::Both);
        let customization = options.client_customization.unwrap();
        // Overridden
        assert_eq!(customization.theme, Some(Theme::Light));
        // Untouched profile fields survive
        assert_eq!(
            customization.custom_css.as_deref(),
            Some(".brand { color: teal; }")
        );
    }

    #[test]
    fn test_store_round_trip() {
        let store = ProfileStore::new();
        store.save(sample_profile());
        assert!(store.get("acme").is_some());
        assert_eq!(store.list().len(), 1);
        assert!(store.delete("acme"));
        assert!(store.get("acme").is_none());
    }
}
