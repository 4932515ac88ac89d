use std::sync::Arc;

use log::{info, warn};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::utils::command::BotCommands;

use vacancy_core::Msg;
use vacancy_engine::CatalogClient;

use crate::config::Config;
use crate::render;
use crate::session::SessionRegistry;

pub struct BotContext {
    pub client: Arc<dyn CatalogClient>,
    pub sessions: SessionRegistry,
    pub job_url_base: String,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    #[command(description = "start over and show the main menu")]
    Start,
}

pub async fn run(config: Config, client: Arc<dyn CatalogClient>) -> anyhow::Result<()> {
    let bot = Bot::new(&config.bot_token);
    let ctx = Arc::new(BotContext {
        client,
        sessions: SessionRegistry::new(),
        job_url_base: config.job_url_base,
    });

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("Bot starting...");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Bot stopped.");
    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<BotContext>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            // `/start` doubles as the exit intent: any session is discarded.
            let _ = ctx
                .sessions
                .drive(msg.chat.id, ctx.client.as_ref(), Msg::ExitRequested)
                .await;

            let name = msg
                .from
                .as_ref()
                .map(|user| user.first_name.as_str())
                .unwrap_or("there");
            bot.send_message(
                msg.chat.id,
                format!("Hello {name}, welcome to the university vacancy bot!"),
            )
            .reply_markup(render::start_keyboard())
            .await?;
        }
    }
    Ok(())
}

async fn handle_message(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text != render::SEARCH_BUTTON {
        return Ok(());
    }

    bot.send_message(msg.chat.id, "⏳ Searching for vacancies...")
        .await?;
    let Some(view) = ctx
        .sessions
        .drive(
            msg.chat.id,
            ctx.client.as_ref(),
            Msg::SearchSubmitted {
                query: String::new(),
            },
        )
        .await
    else {
        return Ok(());
    };

    match view.notice {
        Some(notice) => {
            bot.send_message(msg.chat.id, render::notice_text(notice))
                .await?;
        }
        None => {
            let mut request = bot.send_message(msg.chat.id, render::listing_text(&view));
            if let Some(keyboard) = render::listing_keyboard(&view) {
                request = request.reply_markup(keyboard);
            }
            request.await?;
        }
    }
    Ok(())
}

async fn handle_callback(bot: Bot, q: CallbackQuery, ctx: Arc<BotContext>) -> ResponseResult<()> {
    let (Some(data), Some(message)) = (q.data.clone(), q.message.as_ref()) else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    if let Some(raw) = data.strip_prefix("page:") {
        let Ok(page) = raw.parse::<i64>() else {
            warn!("Could not parse page number from callback data: {data:?}");
            bot.answer_callback_query(q.id)
                .text("Invalid page reference.")
                .show_alert(true)
                .await?;
            return Ok(());
        };
        bot.answer_callback_query(q.id)
            .text(format!("⏳ Loading page {page}..."))
            .await?;

        // An idle session ignores page requests and stays clean, so `None`
        // here means buttons from an evicted session; the listing is long
        // gone.
        let Some(view) = ctx
            .sessions
            .drive(chat_id, ctx.client.as_ref(), Msg::PageRequested { page })
            .await
        else {
            edit_or_warn(
                &bot,
                chat_id,
                message_id,
                "This listing is out of date. Please start the search again.".to_string(),
                None,
            )
            .await;
            return Ok(());
        };
        match view.notice {
            Some(notice) => {
                // The previous page stays on screen; report this request only.
                bot.send_message(chat_id, render::notice_text(notice)).await?;
            }
            None => {
                edit_or_warn(
                    &bot,
                    chat_id,
                    message_id,
                    render::listing_text(&view),
                    render::listing_keyboard(&view),
                )
                .await;
            }
        }
        return Ok(());
    }

    if let Some(raw) = data.strip_prefix("vacancy:") {
        bot.answer_callback_query(q.id).await?;
        let Ok(index) = raw.parse::<usize>() else {
            warn!("Could not parse item index from callback data: {data:?}");
            return Ok(());
        };

        let selection = ctx
            .sessions
            .with_session(chat_id, |state| {
                state
                    .item(index)
                    .map(|item| {
                        (
                            render::detail_text(item, &ctx.job_url_base),
                            state.current_page(),
                        )
                    })
            })
            .await;

        match selection {
            Ok((text, current_page)) => {
                info!("Displaying details for item {index} on page {current_page} (chat {chat_id})");
                let edit = bot
                    .edit_message_text(chat_id, message_id, text)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(render::detail_keyboard(current_page));
                if let Err(err) = edit.await {
                    warn!("Could not edit message for item detail: {err}");
                }
            }
            Err(stale) => {
                warn!(
                    "Stale selection for chat {chat_id}: index {} with {} items displayed",
                    stale.index, stale.available
                );
                edit_or_warn(
                    &bot,
                    chat_id,
                    message_id,
                    "That vacancy is no longer on the current page. Please start the search again."
                        .to_string(),
                    None,
                )
                .await;
            }
        }
        return Ok(());
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

/// Message edits race against Telegram-side staleness; a failed edit is
/// logged, never escalated.
async fn edit_or_warn(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: String,
    keyboard: Option<InlineKeyboardMarkup>,
) {
    let mut edit = bot.edit_message_text(chat_id, message_id, text);
    if let Some(keyboard) = keyboard {
        edit = edit.reply_markup(keyboard);
    }
    if let Err(err) = edit.await {
        warn!("Could not edit listing message: {err}");
    }
}
