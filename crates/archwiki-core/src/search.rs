//! Inline search pipeline
//!
//! Turns a user query into a list of [`Article`]s: cache lookup, wiki fetch on
//! miss, and article construction. The fetch outcome is explicit so articles
//! are only ever built from a successful payload.

use crate::cache::SearchCache;
use crate::wiki::{page_url, SearchResponse, WikiError, WikiSearch};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Result of looking up a query
#[derive(Debug)]
pub enum SearchOutcome {
    /// Empty query, nothing was looked up
    Skipped,
    /// Served from the cache
    Cached(Arc<SearchResponse>),
    /// Fetched from the wiki and stored in the cache
    Fetched(Arc<SearchResponse>),
    /// The wiki request failed
    Failed(WikiError),
}

impl SearchOutcome {
    /// Payload of a successful lookup
    #[must_use]
    pub fn response(&self) -> Option<&SearchResponse> {
        match self {
            Self::Cached(response) | Self::Fetched(response) => Some(response.as_ref()),
            Self::Skipped | Self::Failed(_) => None,
        }
    }
}

/// One selectable search hit, independent of the messaging transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Freshly generated unique identifier
    pub id: String,
    /// Wiki page title
    pub title: String,
    /// Public page URL
    pub url: String,
}

/// Query-to-articles service with an injected wiki client and cache
pub struct SearchService {
    wiki: Arc<dyn WikiSearch>,
    cache: SearchCache,
    wiki_base_url: String,
}

impl SearchService {
    /// Create a new search service
    #[must_use]
    pub fn new(wiki: Arc<dyn WikiSearch>, cache: SearchCache, wiki_base_url: &str) -> Self {
        Self {
            wiki,
            cache,
            wiki_base_url: wiki_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The cache backing this service
    #[must_use]
    pub const fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Look up `query` in the cache, falling back to the wiki on a miss.
    ///
    /// Failed fetches are logged and not cached.
    pub async fn lookup(&self, query: &str) -> SearchOutcome {
        if query.is_empty() {
            return SearchOutcome::Skipped;
        }

        if let Some(cached) = self.cache.get(query).await {
            info!("Get from cache: {query}");
            return SearchOutcome::Cached(cached);
        }

        match self.wiki.search_titles(query).await {
            Ok(response) => {
                let response = Arc::new(response);
                self.cache.insert(query, response.clone()).await;
                info!(pages = response.pages.len(), "{query}");
                SearchOutcome::Fetched(response)
            }
            Err(e) => {
                error!("Error fetching data from Arch Wiki: {e}");
                SearchOutcome::Failed(e)
            }
        }
    }

    /// Build articles from a lookup outcome, preserving page order.
    ///
    /// Every call generates new ids, cached or not.
    #[must_use]
    pub fn articles(&self, outcome: &SearchOutcome) -> Vec<Article> {
        outcome
            .response()
            .map(|response| {
                response
                    .pages
                    .iter()
                    .map(|page| Article {
                        id: Uuid::new_v4().to_string(),
                        title: page.title.clone(),
                        url: page_url(&self.wiki_base_url, &page.title),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Articles to answer an inline query with.
    ///
    /// Returns `None` for an empty query, which must not be answered at all.
    /// A failed fetch yields `Some` with no articles.
    pub async fn answer(&self, query: &str) -> Option<Vec<Article>> {
        match self.lookup(query).await {
            SearchOutcome::Skipped => None,
            outcome => Some(self.articles(&outcome)),
        }
    }
}
