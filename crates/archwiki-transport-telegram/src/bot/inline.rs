//! Inline query handling
//!
//! Converts search articles into Telegram inline results and answers the query.

use crate::config::BotSettings;
use anyhow::Result;
use archwiki_core::search::{Article, SearchService};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{
    InlineQuery, InlineQueryResult, InlineQueryResultArticle, InputMessageContent,
    InputMessageContentText,
};
use tracing::debug;

/// Convert an article into a Telegram inline result.
///
/// Selecting the result posts the page URL; the URL is also the description.
#[must_use]
pub fn to_inline_result(article: &Article) -> InlineQueryResult {
    let content = InputMessageContent::Text(InputMessageContentText::new(article.url.clone()));
    InlineQueryResult::Article(
        InlineQueryResultArticle::new(article.id.clone(), article.title.clone(), content)
            .description(article.url.clone()),
    )
}

/// Answer an inline query with wiki search results.
///
/// Empty queries are ignored without answering.
///
/// # Errors
///
/// Returns an error if the answer cannot be delivered to Telegram.
pub async fn handle_inline_query(
    bot: Bot,
    q: InlineQuery,
    search: Arc<SearchService>,
    settings: Arc<BotSettings>,
) -> Result<()> {
    let Some(articles) = search.answer(&q.query).await else {
        return Ok(());
    };

    let results: Vec<InlineQueryResult> = articles.iter().map(to_inline_result).collect();
    debug!(
        query = %q.query,
        results = results.len(),
        "Answering inline query"
    );

    bot.answer_inline_query(q.id, results)
        .cache_time(settings.telegram.inline_cache_time)
        .await?;

    Ok(())
}
