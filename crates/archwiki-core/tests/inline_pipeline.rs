use archwiki_core::cache::SearchCache;
use archwiki_core::config::WikiSettings;
use archwiki_core::search::{SearchOutcome, SearchService};
use archwiki_core::wiki::{Page, SearchResponse, WikiError, WikiSearch};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct CountingWiki {
    call_count: Arc<AtomicUsize>,
    response: Result<SearchResponse, u16>,
}

impl CountingWiki {
    fn ok(pages: &[&str]) -> Self {
        Self {
            call_count: Arc::new(AtomicUsize::new(0)),
            response: Ok(SearchResponse {
                pages: pages.iter().map(|t| Page::titled(t)).collect(),
            }),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            call_count: Arc::new(AtomicUsize::new(0)),
            response: Err(status),
        }
    }
}

#[async_trait::async_trait]
impl WikiSearch for CountingWiki {
    async fn search_titles(&self, _query: &str) -> Result<SearchResponse, WikiError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(status) => Err(WikiError::Api {
                status: *status,
                body: String::new(),
            }),
        }
    }
}

fn service_with(wiki: CountingWiki) -> (SearchService, Arc<AtomicUsize>) {
    let calls = wiki.call_count.clone();
    let settings = WikiSettings::default();
    let service = SearchService::new(
        Arc::new(wiki),
        SearchCache::from_settings(&settings),
        &settings.wiki_url,
    );
    (service, calls)
}

#[tokio::test]
async fn test_repeated_query_fetches_once() {
    let (service, calls) = service_with(CountingWiki::ok(&["Pacman"]));

    let first = service.answer("pacman").await.expect("answered");
    let second = service.answer("pacman").await.expect("answered");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].url, second[0].url);
    assert_ne!(first[0].id, second[0].id);
}

#[tokio::test]
async fn test_distinct_queries_fetch_separately() {
    let (service, calls) = service_with(CountingWiki::ok(&["Pacman"]));

    service.answer("pacman").await;
    service.answer("Pacman").await;
    service.answer("pacman ").await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_empty_query_no_fetch() {
    let (service, calls) = service_with(CountingWiki::ok(&["Pacman"]));

    assert!(service.answer("").await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_pages_answer_empty() {
    let (service, _) = service_with(CountingWiki::ok(&[]));

    let articles = service.answer("zzzz").await.expect("answered");
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_service_unavailable_answers_empty() {
    let (service, calls) = service_with(CountingWiki::failing(503));

    let outcome = service.lookup("pacman").await;
    assert!(matches!(
        outcome,
        SearchOutcome::Failed(WikiError::Api { status: 503, .. })
    ));

    let articles = service.answer("pacman").await.expect("answered");
    assert!(articles.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    service.cache().run_pending_tasks().await;
    assert_eq!(service.cache().entry_count(), 0);
}

#[tokio::test]
async fn test_expired_entry_refetched() {
    let wiki = CountingWiki::ok(&["Pacman"]);
    let calls = wiki.call_count.clone();
    let service = SearchService::new(
        Arc::new(wiki),
        SearchCache::new(Duration::from_millis(50), 100),
        "https://wiki.archlinux.org",
    );

    service.answer("pacman").await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    service.answer("pacman").await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
