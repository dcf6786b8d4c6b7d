use crate::bot;
use crate::bot::handlers::Command;
use crate::config::BotSettings;
use archwiki_core::cache::SearchCache;
use archwiki_core::search::SearchService;
use archwiki_core::wiki::WikiClient;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{InlineQuery, Me};
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let search = init_search(&settings);

    let bot = Bot::new(settings.telegram.telegram_token.clone());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![search, settings])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_search(settings: &BotSettings) -> Arc<SearchService> {
    let wiki = &settings.wiki;

    info!(
        "Initializing SearchCache (ttl: {}s, max_size: {})",
        wiki.cache_ttl_secs, wiki.cache_max_entries
    );
    let cache = SearchCache::from_settings(wiki);

    info!(
        "Wiki client targeting {} (limit: {}, timeout: {}s)",
        wiki.wiki_url, wiki.search_limit, wiki.http_timeout_secs
    );
    let client = Arc::new(WikiClient::new(wiki));

    Arc::new(SearchService::new(client, cache, &wiki.wiki_url))
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_inline_query().endpoint(handle_inline_query))
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    me: Me,
) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start => bot::handlers::start(bot, msg).await,
        Command::Help => bot::handlers::help(bot, msg, me).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_inline_query(
    bot: Bot,
    q: InlineQuery,
    search: Arc<SearchService>,
    settings: Arc<BotSettings>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::inline::handle_inline_query(bot, q, search, settings).await {
        error!("Inline query handler error: {}", e);
    }
    respond(())
}
