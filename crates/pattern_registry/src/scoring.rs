//! Recommendation and similarity scoring
//!
//! Scores are bounded [0, 1] sums of independently capped contributions, so
//! no single signal can dominate the ranking.

use serde::{Deserialize, Serialize};
use template_model::{Complexity, PatternCategory, PatternUsage, TemplatePattern};

/// A user's stored recommendation preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub preferred_categories: Vec<PatternCategory>,
    pub preferred_complexity: Option<Complexity>,
}

/// Optional per-request context refining a recommendation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationContext {
    /// Industry keyword matched against pattern use cases
    pub industry: Option<String>,
    /// Project-type keyword matched against pattern names
    pub project_type: Option<String>,
}

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecommendation {
    pub pattern_id: String,
    /// Bounded [0, 1]
    pub score: f64,
    /// Human-readable contributions, for display
    pub reasons: Vec<String>,
}

/// Patterns scoring at or below this are never recommended.
pub const RECOMMENDATION_FLOOR: f64 = 0.3;

/// Maximum recommendations returned per request.
pub const RECOMMENDATION_LIMIT: usize = 10;

/// Score one pattern for one user.
///
/// Contributions and caps: usage (≤0.3), rating (≤0.2), preferred category
/// (0.3), preferred complexity (0.2), industry match in use case (0.3),
/// project-type match in name (0.2). The total is clamped to 1.0.
pub fn recommendation_score(
    pattern: &TemplatePattern,
    usage: &PatternUsage,
    preferences: &UserPreferences,
    context: Option<&RecommendationContext>,
) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let usage_term = (usage.usage_count as f64 * 0.01).min(0.3);
    if usage_term > 0.0 {
        score += usage_term;
        reasons.push(format!("used {} times", usage.usage_count));
    }

    let rating_term = ((usage.average_rating / 5.0) * 0.2).min(0.2);
    if rating_term > 0.0 {
        score += rating_term;
        reasons.push(format!("rated {:.1}/5", usage.average_rating));
    }

    if preferences.preferred_categories.contains(&pattern.category) {
        score += 0.3;
        reasons.push(format!("matches preferred category '{}'", pattern.category));
    }

    if preferences.preferred_complexity == Some(pattern.complexity) {
        score += 0.2;
        reasons.push("matches preferred complexity".to_string());
    }

    if let Some(context) = context {
        if let Some(industry) = &context.industry {
            if pattern
                .use_case
                .to_lowercase()
                .contains(&industry.to_lowercase())
            {
                score += 0.3;
                reasons.push(format!("use case mentions '{}'", industry));
            }
        }
        if let Some(project_type) = &context.project_type {
            if pattern
                .name
                .to_lowercase()
                .contains(&project_type.to_lowercase())
            {
                score += 0.2;
                reasons.push(format!("name mentions '{}'", project_type));
            }
        }
    }

    (score.min(1.0), reasons)
}

/// Similarity between two patterns, used to rank "similar patterns"
/// candidates: identical category (+0.4), identical complexity (+0.2), and
/// up to +0.4 proportional to the word overlap of their use cases.
pub fn similarity_score(a: &TemplatePattern, b: &TemplatePattern) -> f64 {
    let mut score = 0.0;
    if a.category == b.category {
        score += 0.4;
    }
    if a.complexity == b.complexity {
        score += 0.2;
    }
    score += 0.4 * use_case_overlap(&a.use_case, &b.use_case);
    score
}

/// Jaccard-style overlap of whitespace-tokenized, lowercased words.
fn use_case_overlap(a: &str, b: &str) -> f64 {
    let words_a: std::collections::HashSet<String> =
        a.split_whitespace().map(|w| w.to_lowercase()).collect();
    let words_b: std::collections::HashSet<String> =
        b.split_whitespace().map(|w| w.to_lowercase()).collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count() as f64;
    let union = words_a.union(&words_b).count() as f64;
    intersection / union
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_library::builtin_patterns;

    fn pattern(id: &str) -> TemplatePattern {
        builtin_patterns()
            .into_iter()
            .find(|p| p.id == id)
            .unwrap()
    }

    #[test]
    fn test_usage_term_capped() {
        let p = pattern("business-proposal");
        let mut usage = PatternUsage::new(&p.id);
        usage.usage_count = 1000;
        let (score, _) =
            recommendation_score(&p, &usage, &UserPreferences::default(), None);
        assert!((score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_in_usage() {
        let p = pattern("business-proposal");
        let prefs = UserPreferences::default();
        let mut previous = 0.0;
        for count in 0..60 {
            let mut usage = PatternUsage::new(&p.id);
            usage.usage_count = count;
            let (score, _) = recommendation_score(&p, &usage, &prefs, None);
            assert!(score >= previous, "score decreased at count {}", count);
            previous = score;
        }
    }

    #[test]
    fn test_category_and_complexity_terms() {
        let p = pattern("business-proposal");
        let usage = PatternUsage::new(&p.id);
        let prefs = UserPreferences {
            preferred_categories: vec![p.category],
            preferred_complexity: Some(p.complexity),
        };
        let (score, reasons) = recommendation_score(&p, &usage, &prefs, None);
        assert!((score - 0.5).abs() < 1e-9);
        assert_eq!(reasons.len(), 2);
    }

    #[test]
    fn test_context_terms_and_clamp() {
        let p = pattern("business-proposal");
        let mut usage = PatternUsage::new(&p.id);
        usage.usage_count = 100;
        usage.average_rating = 5.0;
        usage.feedback_count = 3;
        let prefs = UserPreferences {
            preferred_categories: vec![p.category],
            preferred_complexity: Some(p.complexity),
        };
        let context = RecommendationContext {
            industry: Some("business".to_string()),
            project_type: Some("proposal".to_string()),
        };
        let (score, _) = recommendation_score(&p, &usage, &prefs, Some(&context));
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_self_is_maximal() {
        let p = pattern("business-proposal");
        let score = similarity_score(&p, &p);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_components() {
        let a = pattern("business-proposal");
        let b = pattern("service-invoice");
        let score = similarity_score(&a, &b);
        // Different category; same complexity contributes 0.2
        assert!(score >= 0.2);
        assert!(score < 0.4 + 0.2);
    }
}
