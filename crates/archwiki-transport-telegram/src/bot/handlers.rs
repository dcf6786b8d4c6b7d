use anyhow::Result;
use teloxide::{
    prelude::*,
    types::{Me, ReplyParameters},
    utils::command::BotCommands,
};
use tracing::info;

/// Reply to `/start`
pub const START_TEXT: &str = "Hi, use /help!";

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Greet the user
    #[command(description = "Start the bot.")]
    Start,
    /// Explain inline usage
    #[command(description = "Show how to search the wiki.")]
    Help,
}

/// Help text naming the bot's own handle
///
/// # Examples
///
/// ```
/// use archwiki_transport_telegram::bot::handlers::help_text;
/// assert_eq!(help_text("archwiki_bot"), "Use @archwiki_bot Search term");
/// ```
#[must_use]
pub fn help_text(bot_username: &str) -> String {
    format!("Use @{bot_username} Search term")
}

fn get_user_id_safe(msg: &Message) -> u64 {
    msg.from.as_ref().map_or(0, |u| u.id.0)
}

async fn reply(bot: &Bot, msg: &Message, text: String) -> Result<()> {
    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    info!("User {} initiated /start command.", get_user_id_safe(&msg));
    reply(&bot, &msg, START_TEXT.to_string()).await
}

/// Help handler
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn help(bot: Bot, msg: Message, me: Me) -> Result<()> {
    info!("User {} requested /help.", get_user_id_safe(&msg));
    reply(&bot, &msg, help_text(me.username())).await
}
