//! The pattern registry
//!
//! Wraps the pattern library with search filters, usage-driven ranking,
//! recommendations, and custom-pattern derivation. Usage, custom patterns,
//! and user preferences are the registry's process-wide mutable state; each
//! lives behind its own lock.

use crate::custom::{CustomPatternCache, PatternStore};
use crate::error::{RegistryError, RegistryResult};
use crate::scoring::{
    recommendation_score, similarity_score, PatternRecommendation, RecommendationContext,
    UserPreferences, RECOMMENDATION_FLOOR, RECOMMENDATION_LIMIT,
};
use crate::usage::UsageStore;
use customization::{customize_template, CustomizationOptions};
use pattern_library::PatternLibrary;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use template_model::{
    Complexity, CustomPattern, PatternCategory, PatternUsage, Template, TemplatePattern,
};

/// AND-combined filters narrowing a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryFilters {
    pub category: Option<PatternCategory>,
    pub complexity: Option<Complexity>,
    /// Case-insensitive substring required in the use case
    pub use_case_contains: Option<String>,
    /// Every listed tag must be present
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RegistryFilters {
    fn matches(&self, pattern: &TemplatePattern) -> bool {
        if let Some(category) = self.category {
            if pattern.category != category {
                return false;
            }
        }
        if let Some(complexity) = self.complexity {
            if pattern.complexity != complexity {
                return false;
            }
        }
        if let Some(fragment) = &self.use_case_contains {
            if !pattern
                .use_case
                .to_lowercase()
                .contains(&fragment.to_lowercase())
            {
                return false;
            }
        }
        self.tags.iter().all(|tag| pattern.tags.contains(tag))
    }
}

/// Registry over the pattern library plus process-wide usage state
pub struct PatternRegistry {
    library: PatternLibrary,
    usage: UsageStore,
    customs: CustomPatternCache,
    preferences: Mutex<HashMap<String, UserPreferences>>,
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self {
            library: PatternLibrary::new(),
            usage: UsageStore::new(),
            customs: CustomPatternCache::new(),
            preferences: Mutex::new(HashMap::new()),
        }
    }

    /// A registry whose custom patterns are backed by an external store.
    pub fn with_pattern_store(store: Box<dyn PatternStore>) -> Self {
        Self {
            customs: CustomPatternCache::with_store(store),
            ..Self::new()
        }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Search with optional filters; results are sorted descending by usage
    /// count, ties keeping library order.
    pub fn search_patterns(
        &self,
        query: &str,
        filters: Option<&RegistryFilters>,
    ) -> Vec<TemplatePattern> {
        let mut hits: Vec<TemplatePattern> = self
            .library
            .search_patterns(query)
            .into_iter()
            .filter(|p| filters.map(|f| f.matches(p)).unwrap_or(true))
            .cloned()
            .collect();
        // Stable sort preserves library order for equal usage counts
        hits.sort_by_key(|p| std::cmp::Reverse(self.usage.usage_count(&p.id)));
        hits
    }

    /// Store a user's recommendation preferences.
    pub fn set_preferences(&self, user_id: &str, preferences: UserPreferences) {
        self.preferences
            .lock()
            .unwrap()
            .insert(user_id.to_string(), preferences);
    }

    /// Rank patterns for a user. Patterns scoring at or below the floor are
    /// excluded; at most ten results are returned, best first.
    pub fn get_recommended_patterns(
        &self,
        user_id: &str,
        context: Option<&RecommendationContext>,
    ) -> Vec<PatternRecommendation> {
        let preferences = self
            .preferences
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default();

        let mut scored: Vec<PatternRecommendation> = self
            .library
            .all_patterns()
            .iter()
            .map(|pattern| {
                let usage = self.usage.get(&pattern.id);
                let (score, reasons) =
                    recommendation_score(pattern, &usage, &preferences, context);
                PatternRecommendation {
                    pattern_id: pattern.id.clone(),
                    score,
                    reasons,
                }
            })
            .filter(|r| r.score > RECOMMENDATION_FLOOR)
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(RECOMMENDATION_LIMIT);
        scored
    }

    /// Patterns most similar to the given one, best first, excluding itself.
    pub fn similar_patterns(&self, pattern_id: &str, limit: usize) -> RegistryResult<Vec<(String, f64)>> {
        let target = self.library.get_pattern(pattern_id)?;
        let mut scored: Vec<(String, f64)> = self
            .library
            .all_patterns()
            .iter()
            .filter(|p| p.id != pattern_id)
            .map(|p| (p.id.clone(), similarity_score(target, p)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }

    /// Record one use of a pattern.
    pub fn track_pattern_usage(&self, pattern_id: &str) {
        self.usage.track(pattern_id);
    }

    /// Fold a rating into the pattern's running average.
    pub fn record_pattern_feedback(
        &self,
        pattern_id: &str,
        rating: f64,
        _feedback: Option<&str>,
    ) -> RegistryResult<()> {
        self.usage.record_feedback(pattern_id, rating)
    }

    /// Usage snapshot for one pattern.
    pub fn pattern_usage(&self, pattern_id: &str) -> PatternUsage {
        self.usage.get(pattern_id)
    }

    /// Derive a custom pattern from a catalog pattern.
    ///
    /// The base must be a catalog pattern: deriving from another custom
    /// pattern is rejected so derivation chains never recurse.
    pub fn create_custom_pattern(
        &self,
        base_pattern_id: &str,
        name: &str,
        customizations: &CustomizationOptions,
        created_by: &str,
        is_public: bool,
    ) -> RegistryResult<CustomPattern> {
        if self.customs.contains(base_pattern_id) {
            return Err(RegistryError::CustomBaseNotCatalog(
                base_pattern_id.to_string(),
            ));
        }
        self.library.get_pattern(base_pattern_id)?;

        let payload = serde_json::to_value(customizations).map_err(|source| {
            RegistryError::InvalidCustomizations {
                id: base_pattern_id.to_string(),
                source,
            }
        })?;
        let mut pattern = CustomPattern::new(base_pattern_id, name, payload, created_by);
        pattern.is_public = is_public;
        self.customs.insert(pattern.clone());
        Ok(pattern)
    }

    /// Custom patterns visible to a user: their own plus public ones.
    pub fn list_custom_patterns(&self, user_id: &str) -> Vec<CustomPattern> {
        self.customs
            .list()
            .into_iter()
            .filter(|p| p.is_public || p.created_by == user_id)
            .collect()
    }

    /// Instantiate a template from either a catalog or a custom pattern.
    ///
    /// For a custom pattern the stored customizations are layered over the
    /// base instantiation first, then any call-site customizations on top.
    pub fn generate_template_from_pattern(
        &self,
        pattern_id: &str,
        customizations: Option<&CustomizationOptions>,
    ) -> RegistryResult<Template> {
        let template = if self.library.contains(pattern_id) {
            self.library
                .create_template_from_pattern(pattern_id, customizations)?
        } else {
            let custom = self
                .customs
                .get(pattern_id)
                .ok_or_else(|| RegistryError::PatternNotFound(pattern_id.to_string()))?;
            let stored: CustomizationOptions =
                serde_json::from_value(custom.customizations.clone()).map_err(|source| {
                    RegistryError::InvalidCustomizations {
                        id: custom.id.clone(),
                        source,
                    }
                })?;
            let base = self
                .library
                .create_template_from_pattern(&custom.base_pattern_id, Some(&stored))?;
            match customizations {
                Some(options) => customize_template(&base, options),
                None => base,
            }
        };
        self.track_pattern_usage(pattern_id);
        Ok(template)
    }
}

impl std::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRegistry")
            .field("patterns", &self.library.all_patterns().len())
            .field("customs", &self.customs)
            .finish()
    }
}
