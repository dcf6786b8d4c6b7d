//! Search response cache
//!
//! Keeps raw search responses keyed by the exact query string so repeated
//! inline queries don't hit the wiki again. Entries expire after a TTL and
//! the cache is capped in size.

use crate::config::WikiSettings;
use crate::wiki::SearchResponse;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Bounded, time-expiring cache of search responses
#[derive(Clone)]
pub struct SearchCache {
    /// Moka cache storing query -> response with automatic TTL
    cache: Cache<String, Arc<SearchResponse>>,
}

impl SearchCache {
    /// Creates a new `SearchCache`
    ///
    /// # Arguments
    ///
    /// * `ttl` - Time-to-live for cache entries
    /// * `max_capacity` - Maximum number of entries in cache
    ///
    /// # Examples
    ///
    /// ```
    /// use archwiki_core::cache::SearchCache;
    /// use std::time::Duration;
    ///
    /// let cache = SearchCache::new(
    ///     Duration::from_secs(3600), // 1 hour TTL
    ///     10_000,                    // max 10k entries
    /// );
    /// ```
    #[must_use]
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    /// Creates a cache sized from settings
    #[must_use]
    pub fn from_settings(settings: &WikiSettings) -> Self {
        Self::new(settings.cache_ttl(), settings.cache_max_entries)
    }

    /// Returns the cached response for `query`, if any.
    ///
    /// The key is the query verbatim: no trimming, case-sensitive.
    pub async fn get(&self, query: &str) -> Option<Arc<SearchResponse>> {
        self.cache.get(query).await
    }

    /// Stores the response for `query`
    pub async fn insert(&self, query: &str, response: Arc<SearchResponse>) {
        self.cache.insert(query.to_string(), response).await;
    }

    /// Returns the current number of entries in the cache
    ///
    /// The count is approximate until pending maintenance has run.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Run pending eviction and bookkeeping tasks
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::Page;

    fn response(titles: &[&str]) -> Arc<SearchResponse> {
        Arc::new(SearchResponse {
            pages: titles.iter().map(|t| Page::titled(t)).collect(),
        })
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = SearchCache::new(Duration::from_secs(60), 100);

        assert!(cache.get("pacman").await.is_none());

        let stored = response(&["Pacman"]);
        cache.insert("pacman", stored.clone()).await;

        let hit = cache.get("pacman").await.expect("cached entry");
        assert!(Arc::ptr_eq(&hit, &stored));
    }

    #[tokio::test]
    async fn test_keys_are_verbatim() {
        let cache = SearchCache::new(Duration::from_secs(60), 100);
        cache.insert("Pacman", response(&["Pacman"])).await;

        assert!(cache.get("pacman").await.is_none());
        assert!(cache.get(" Pacman").await.is_none());
        assert!(cache.get("Pacman").await.is_some());
    }

    #[tokio::test]
    async fn test_entry_count() {
        let cache = SearchCache::new(Duration::from_secs(60), 100);

        cache.insert("a", response(&[])).await;
        cache.insert("b", response(&[])).await;

        // Manually run pending tasks to update the entry count
        cache.run_pending_tasks().await;

        assert_eq!(cache.entry_count(), 2);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = SearchCache::new(Duration::from_millis(50), 100);
        cache.insert("pacman", response(&["Pacman"])).await;

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert!(cache.get("pacman").await.is_none());
    }
}
