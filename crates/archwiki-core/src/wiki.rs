//! Arch Wiki REST search client
//!
//! Talks to the MediaWiki REST endpoint `rest.php/v1/search/title`.

use crate::config::WikiSettings;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Path of the title search endpoint, relative to the wiki base URL
pub const SEARCH_TITLE_PATH: &str = "rest.php/v1/search/title";

/// Longest error body kept in `WikiError::Api`
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Errors that can occur while searching the wiki
#[derive(Debug, Error)]
pub enum WikiError {
    /// Connection failure, timeout or other transport problem
    #[error("Network error: {0}")]
    Network(String),
    /// The wiki answered with a non-success status
    #[error("API error: {status} - {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },
    /// The response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(String),
}

/// Response of the title search endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching pages, in relevance order
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// A single page entry in a search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page title as displayed on the wiki
    pub title: String,
    /// Numeric page id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// URL-friendly page key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Short description, if the wiki provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Page {
    /// Page with only a title set
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            id: None,
            key: None,
            description: None,
        }
    }
}

/// Build the public URL of a wiki page.
///
/// Spaces become underscores; nothing else is escaped.
///
/// # Examples
///
/// ```
/// use archwiki_core::wiki::page_url;
///
/// assert_eq!(
///     page_url("https://wiki.archlinux.org", "System Administration"),
///     "https://wiki.archlinux.org/title/System_Administration"
/// );
/// ```
#[must_use]
pub fn page_url(wiki_base_url: &str, title: &str) -> String {
    format!("{wiki_base_url}/title/{}", title.replace(' ', "_"))
}

/// Source of wiki search results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WikiSearch: Send + Sync {
    /// Search page titles matching `query`
    async fn search_titles(&self, query: &str) -> Result<SearchResponse, WikiError>;
}

/// HTTP client for the wiki search API
pub struct WikiClient {
    base_url: String,
    limit: u32,
    client: HttpClient,
}

impl WikiClient {
    /// Create a client from settings
    #[must_use]
    pub fn new(settings: &WikiSettings) -> Self {
        Self::with_timeout(
            &settings.wiki_url,
            settings.search_limit,
            settings.http_timeout(),
        )
    }

    /// Create a client with an explicit timeout
    #[must_use]
    pub fn with_timeout(base_url: &str, limit: u32, timeout: Duration) -> Self {
        Self::from_builder(base_url, limit, HttpClient::builder().timeout(timeout))
    }

    fn from_builder(base_url: &str, limit: u32, builder: ClientBuilder) -> Self {
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build wiki HTTP client, falling back to defaults without timeout: {e}");
            HttpClient::new()
        });

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
            client,
        }
    }

    fn search_url(&self) -> String {
        format!("{}/{SEARCH_TITLE_PATH}", self.base_url)
    }
}

#[async_trait]
impl WikiSearch for WikiClient {
    async fn search_titles(&self, query: &str) -> Result<SearchResponse, WikiError> {
        let url = self.search_url();
        debug!(url = %url, query, limit = self.limit, "Wiki search request");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .query(&[("limit", self.limit)])
            .send()
            .await
            .map_err(|e| WikiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| WikiError::Json(e.to_string()))
    }
}

fn truncate_body(text: &str) -> String {
    if text.chars().count() > MAX_ERROR_BODY_CHARS {
        let truncated: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{truncated}... (truncated)")
    } else {
        text.to_string()
    }
}
