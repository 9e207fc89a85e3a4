//! Pattern Registry
//!
//! Wraps the pattern library with the signals a growing catalog needs:
//!
//! - filtered search re-ranked by usage
//! - per-pattern usage and feedback accounting (race-free under concurrent
//!   callers)
//! - bounded recommendation and similarity scoring
//! - custom-pattern derivation with an external-store fallback
//!
//! The registry produces `Template`s for the composer; it never feeds the
//! composer directly.

mod custom;
mod error;
mod registry;
mod scoring;
mod usage;

pub use custom::{CustomPatternCache, PatternStore};
pub use error::{RegistryError, RegistryResult};
pub use registry::{PatternRegistry, RegistryFilters};
pub use scoring::{
    recommendation_score, similarity_score, PatternRecommendation, RecommendationContext,
    UserPreferences, RECOMMENDATION_FLOOR, RECOMMENDATION_LIMIT,
};
pub use usage::UsageStore;
