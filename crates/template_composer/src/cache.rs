//! Composition cache
//!
//! Keyed by the deterministic cache key derived from (template id, version,
//! data hash, branding hash). The cache is an optimization only: composition
//! is deterministic with the cache disabled.

use std::collections::HashMap;
use template_model::CompiledContent;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// An in-memory cache of compiled content
#[derive(Debug, Default)]
pub struct CompositionCache {
    entries: HashMap<String, CompiledContent>,
    hits: u64,
    misses: u64,
    /// Entry limit; oldest insertion order is not tracked, the cache is
    /// simply cleared when full
    capacity: usize,
}

impl CompositionCache {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
            capacity,
        }
    }

    pub fn get(&mut self, key: &str) -> Option<CompiledContent> {
        match self.entries.get(key) {
            Some(content) => {
                self.hits += 1;
                tracing::debug!(cache_key = key, "composition cache hit");
                Some(content.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, content: CompiledContent) {
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(key.into(), content);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
