//! Custom pattern storage
//!
//! The registry keeps custom patterns in memory and treats any external
//! persistence as a backing store: lookups fall back to the store on a cache
//! miss, and saves are written through.

use std::collections::HashMap;
use std::sync::Mutex;
use template_model::CustomPattern;

/// External persistence for custom patterns.
///
/// Implementations own the wire/storage format; the registry only needs
/// simple get/save/list operations keyed by id.
pub trait PatternStore: Send + Sync {
    fn get(&self, id: &str) -> Option<CustomPattern>;
    fn save(&self, pattern: &CustomPattern);
    fn list(&self) -> Vec<CustomPattern>;
}

/// In-memory cache over an optional backing store
#[derive(Default)]
pub struct CustomPatternCache {
    cache: Mutex<HashMap<String, CustomPattern>>,
    store: Option<Box<dyn PatternStore>>,
}

impl std::fmt::Debug for CustomPatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomPatternCache")
            .field("cached", &self.cache.lock().unwrap().len())
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

impl CustomPatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Box<dyn PatternStore>) -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
            store: Some(store),
        }
    }

    /// Insert a pattern, writing through to the backing store.
    pub fn insert(&self, pattern: CustomPattern) {
        if let Some(store) = &self.store {
            store.save(&pattern);
        }
        self.cache
            .lock()
            .unwrap()
            .insert(pattern.id.clone(), pattern);
    }

    /// Look up by id, falling back to the backing store on a miss.
    pub fn get(&self, id: &str) -> Option<CustomPattern> {
        if let Some(found) = self.cache.lock().unwrap().get(id).cloned() {
            return Some(found);
        }
        let fetched = self.store.as_ref().and_then(|store| store.get(id))?;
        self.cache
            .lock()
            .unwrap()
            .insert(fetched.id.clone(), fetched.clone());
        Some(fetched)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All known patterns: cached entries plus anything only in the store.
    pub fn list(&self) -> Vec<CustomPattern> {
        let mut patterns: HashMap<String, CustomPattern> = self
            .store
            .as_ref()
            .map(|store| store.list())
            .unwrap_or_default()
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        for (id, pattern) in self.cache.lock().unwrap().iter() {
            patterns.insert(id.clone(), pattern.clone());
        }
        let mut out: Vec<_> = patterns.into_values().collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct MapStore(Mutex<HashMap<String, CustomPattern>>);

    impl PatternStore for MapStore {
        fn get(&self, id: &str) -> Option<CustomPattern> {
            self.0.lock().unwrap().get(id).cloned()
        }
        fn save(&self, pattern: &CustomPattern) {
            self.0
                .lock()
                .unwrap()
                .insert(pattern.id.clone(), pattern.clone());
        }
        fn list(&self) -> Vec<CustomPattern> {
            self.0.lock().unwrap().values().cloned().collect()
        }
    }

    #[test]
    fn test_cache_miss_falls_back_to_store() {
        let pattern = CustomPattern::new("business-proposal", "Mine", json!({}), "user-1");
        let id = pattern.id.clone();

        let mut seeded = HashMap::new();
        seeded.insert(id.clone(), pattern);
        let cache = CustomPatternCache::with_store(Box::new(MapStore(Mutex::new(seeded))));

        // Not cached yet; must come from the store
        assert!(cache.get(&id).is_some());
    }

    #[test]
    fn test_insert_writes_through() {
        let backing = MapStore(Mutex::new(HashMap::new()));
        let cache = CustomPatternCache::with_store(Box::new(backing));
        let pattern = CustomPattern::new("business-proposal", "Mine", json!({}), "user-1");
        let id = pattern.id.clone();
        cache.insert(pattern);
        assert!(cache.contains(&id));
        assert_eq!(cache.list().len(), 1);
    }

    #[test]
    fn test_no_store_is_cache_only() {
        let cache = CustomPatternCache::new();
        assert!(cache.get("anything").is_none());
        let pattern = CustomPattern::new("business-proposal", "Mine", json!({}), "user-1");
        let id = pattern.id.clone();
        cache.insert(pattern);
        assert!(cache.get(&id).is_some());
    }
}
