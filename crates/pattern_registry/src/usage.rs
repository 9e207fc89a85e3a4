//! Usage and feedback accounting
//!
//! Process-wide mutable state. Every read-modify-write goes through the
//! store's mutex so concurrent `track` / `record_feedback` calls against the
//! same pattern never lose increments.

use crate::error::{RegistryError, RegistryResult};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use template_model::PatternUsage;

/// In-memory usage table keyed by pattern id
#[derive(Debug, Default)]
pub struct UsageStore {
    entries: Mutex<HashMap<String, PatternUsage>>,
}

impl UsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the usage counter and stamp `last_used`.
    pub fn track(&self, pattern_id: &str) {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(pattern_id.to_string())
            .or_insert_with(|| PatternUsage::new(pattern_id));
        entry.usage_count += 1;
        entry.last_used = Some(Utc::now());
    }

    /// Fold one rating into the running weighted mean and bump the
    /// feedback count. The mean stays bounded to [0, 5].
    pub fn record_feedback(&self, pattern_id: &str, rating: f64) -> RegistryResult<()> {
        if !(0.0..=5.0).contains(&rating) {
            return Err(RegistryError::RatingOutOfRange(rating));
        }
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(pattern_id.to_string())
            .or_insert_with(|| PatternUsage::new(pattern_id));
        let old_count = entry.feedback_count as f64;
        entry.average_rating =
            ((entry.average_rating * old_count) + rating) / (old_count + 1.0);
        entry.average_rating = entry.average_rating.clamp(0.0, 5.0);
        entry.feedback_count += 1;
        Ok(())
    }

    /// Snapshot of one pattern's usage; zeroed if never used.
    pub fn get(&self, pattern_id: &str) -> PatternUsage {
        self.entries
            .lock()
            .expect("usage store poisoned")
            .get(pattern_id)
            .cloned()
            .unwrap_or_else(|| PatternUsage::new(pattern_id))
    }

    pub fn usage_count(&self, pattern_id: &str) -> u64 {
        self.get(pattern_id).usage_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_track_increments() {
        let store = UsageStore::new();
        store.track("p");
        store.track("p");
        let usage = store.get("p");
        assert_eq!(usage.usage_count, 2);
        assert!(usage.last_used.is_some());
    }

    #[test]
    fn test_feedback_running_mean() {
        let store = UsageStore::new();
        store.record_feedback("p", 4.0).unwrap();
        store.record_feedback("p", 2.0).unwrap();
        let usage = store.get("p");
        assert_eq!(usage.feedback_count, 2);
        assert!((usage.average_rating - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rating_out_of_range() {
        let store = UsageStore::new();
        assert!(matches!(
            store.record_feedback("p", 6.0),
            Err(RegistryError::RatingOutOfRange(_))
        ));
        assert!(matches!(
            store.record_feedback("p", -0.1),
            Err(RegistryError::RatingOutOfRange(_))
        ));
    }

    #[test]
    fn test_concurrent_tracking_loses_nothing() {
        let store = Arc::new(UsageStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    store.track("hot");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.usage_count("hot"), 800);
    }
}
