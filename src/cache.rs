//! Recency cache for repeat-avoidance.
//!
//! Bounded in-process map from previously returned response text to its
//! detected themes and insertion time. Shared across all concurrent
//! requests; the lock is held only for individual operations, so two
//! concurrent requests can both miss a just-inserted duplicate. That
//! staleness is accepted: novelty is best-effort, not a correctness
//! property.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

/// Maximum number of entries retained.
pub const MAX_CACHE_SIZE: usize = 50;

/// How long a theme match counts as a repeat.
pub const THEME_COOLDOWN_MINUTES: i64 = 5;

/// A previously returned response.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub text: String,
    pub themes: HashSet<&'static str>,
    pub timestamp: DateTime<Utc>,
}

/// Bounded map of recent responses, evicting the oldest entry by timestamp
/// once the cap is exceeded.
#[derive(Debug, Clone)]
pub struct RecencyCache {
    entries: Arc<RwLock<HashMap<String, CachedResponse>>>,
}

impl Default for RecencyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Exact-text lookup.
    pub fn contains(&self, text: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(text))
            .unwrap_or(false)
    }

    /// True when any of the given themes appears in an entry younger than
    /// the cooldown window.
    pub fn theme_on_cooldown(&self, themes: &HashSet<&'static str>, now: DateTime<Utc>) -> bool {
        if themes.is_empty() {
            return false;
        }
        let cooldown = Duration::minutes(THEME_COOLDOWN_MINUTES);
        let Ok(entries) = self.entries.read() else {
            return false;
        };
        entries.values().any(|cached| {
            now.signed_duration_since(cached.timestamp) < cooldown
                && themes.iter().any(|theme| cached.themes.contains(theme))
        })
    }

    /// Record an accepted response, then evict the oldest-timestamp entries
    /// while over capacity.
    pub fn insert(&self, text: String, themes: HashSet<&'static str>, now: DateTime<Utc>) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        entries.insert(
            text.clone(),
            CachedResponse {
                text,
                themes,
                timestamp: now,
            },
        );
        while entries.len() > MAX_CACHE_SIZE {
            let oldest = entries
                .iter()
                .min_by_key(|(_, cached)| cached.timestamp)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => entries.remove(&key),
                None => break,
            };
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn themes(names: &[&'static str]) -> HashSet<&'static str> {
        names.iter().copied().collect()
    }

    #[test]
    fn test_contains_after_insert() {
        let cache = RecencyCache::new();
        cache.insert("a wet dog".to_string(), themes(&["animals"]), Utc::now());
        assert!(cache.contains("a wet dog"));
        assert!(!cache.contains("a dry dog"));
    }

    #[test]
    fn test_eviction_drops_oldest_timestamp() {
        let cache = RecencyCache::new();
        let base = Utc::now();
        for i in 0..=MAX_CACHE_SIZE {
            cache.insert(
                format!("response {}", i),
                HashSet::new(),
                base + Duration::seconds(i as i64),
            );
        }
        assert_eq!(cache.len(), MAX_CACHE_SIZE);
        assert!(!cache.contains("response 0"));
        assert!(cache.contains("response 1"));
        assert!(cache.contains(&format!("response {}", MAX_CACHE_SIZE)));
    }

    #[test]
    fn test_theme_on_cooldown_within_window() {
        let cache = RecencyCache::new();
        let now = Utc::now();
        cache.insert("a sweaty towel".to_string(), themes(&["gym"]), now);
        assert!(cache.theme_on_cooldown(&themes(&["gym"]), now + Duration::minutes(1)));
        assert!(!cache.theme_on_cooldown(&themes(&["food"]), now + Duration::minutes(1)));
    }

    #[test]
    fn test_theme_cooldown_expires() {
        let cache = RecencyCache::new();
        let now = Utc::now();
        cache.insert("a sweaty towel".to_string(), themes(&["gym"]), now);
        assert!(!cache.theme_on_cooldown(
            &themes(&["gym"]),
            now + Duration::minutes(THEME_COOLDOWN_MINUTES + 1)
        ));
    }

    #[test]
    fn test_empty_theme_set_never_on_cooldown() {
        let cache = RecencyCache::new();
        let now = Utc::now();
        cache.insert("a sweaty towel".to_string(), themes(&["gym"]), now);
        assert!(!cache.theme_on_cooldown(&HashSet::new(), now));
    }

    #[test]
    fn test_reinsert_same_text_updates_timestamp() {
        let cache = RecencyCache::new();
        let now = Utc::now();
        cache.insert("a wet dog".to_string(), themes(&["animals"]), now);
        cache.insert(
            "a wet dog".to_string(),
            themes(&["animals"]),
            now + Duration::minutes(10),
        );
        assert_eq!(cache.len(), 1);
        assert!(cache.theme_on_cooldown(&themes(&["animals"]), now + Duration::minutes(11)));
    }
}
