//! Telegram adapter: UI formatting, slash commands, and the bot dispatcher.
//!
//! Maps inbound messages and callback queries onto the lookup core. This
//! module is boundary glue: number extraction, cooldown gating, redaction,
//! and history live in the core modules and are injected here.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, info, warn};

use crate::cooldown::{Acquire, CooldownGate};
use crate::extractor::extract_number;
use crate::history::HistoryStore;
use crate::lookup::LookupService;

pub mod commands;
pub mod ui;

// ---------------------------------------------------------------------------
// Shared state for handler injection
// ---------------------------------------------------------------------------

/// Shared dependencies injected into teloxide handlers via `dptree::deps!`.
#[derive(Clone)]
struct SharedState {
    service: Arc<LookupService>,
    history: Arc<HistoryStore>,
    cooldown: Arc<CooldownGate>,
    owner_label: String,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the Telegram bot dispatcher.
///
/// Two handler branches:
/// 1. **Messages** -- slash commands, plus number auto-detection in text
///    and captions (private chats and groups alike)
/// 2. **Callback queries** -- the refresh/save/clear buttons under reports
///
/// Blocks until the bot is stopped (Ctrl+C).
pub async fn run_bot(
    bot_token: &str,
    service: Arc<LookupService>,
    history: Arc<HistoryStore>,
    cooldown: Arc<CooldownGate>,
    owner_label: String,
) -> anyhow::Result<()> {
    let bot = Bot::new(bot_token);

    let shared = SharedState {
        service,
        history,
        cooldown,
        owner_label,
    };

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("telegram dispatcher starting");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![shared])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

// ---------------------------------------------------------------------------
// Message handler
// ---------------------------------------------------------------------------

/// Handle an incoming Telegram message.
///
/// Dispatches slash commands; otherwise scans text or caption for a phone
/// number. Messages without a usable number are ignored silently, so the
/// bot stays quiet in group chatter.
async fn handle_message(bot: Bot, msg: Message, state: SharedState) -> ResponseResult<()> {
    let user_id = match msg.from {
        Some(ref user) => user.id.0.to_string(),
        None => return Ok(()),
    };

    let Some(text) = msg.text().or_else(|| msg.caption()) else {
        return Ok(());
    };

    debug!(user_id, "telegram message received");

    if text.starts_with('/') {
        let reply = dispatch_command(text, &state, &user_id).await;
        bot.send_message(msg.chat.id, reply)
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    }

    let Some(number) = extract_number(text) else {
        return Ok(());
    };

    // Anti-spam gate applies to message-triggered lookups only.
    if let Acquire::Rejected { remaining_secs } = state.cooldown.try_acquire(&user_id).await {
        bot.send_message(
            msg.chat.id,
            format!("\u{26A0} Please wait {remaining_secs}s before next lookup."),
        )
        .await?;
        return Ok(());
    }

    match state.service.lookup(&user_id, &number).await {
        Ok(rendered) => {
            send_report(&bot, msg.chat.id, &rendered.text, &number).await?;
        }
        Err(err) => {
            warn!(user_id, number, error = %err, "lookup failed");
            bot.send_message(
                msg.chat.id,
                "\u{274C} API Error \u{2014} couldn't fetch data right now. Please try later.",
            )
            .await?;
        }
    }

    Ok(())
}

/// Send a rendered report with its control row.
///
/// Falls back to a plain-text send (no parse mode, no keyboard) when the
/// transport rejects the formatted message.
async fn send_report(
    bot: &Bot,
    chat_id: ChatId,
    report_text: &str,
    number: &str,
) -> ResponseResult<()> {
    let formatted = bot
        .send_message(chat_id, report_text)
        .parse_mode(ParseMode::Html)
        .reply_markup(ui::report_keyboard(number))
        .await;

    if let Err(err) = formatted {
        warn!(error = %err, "formatted send rejected, falling back to plain text");
        bot.send_message(chat_id, report_text).await?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Command dispatcher
// ---------------------------------------------------------------------------

/// Parse and dispatch a slash command, returning the HTML response.
async fn dispatch_command(text: &str, state: &SharedState, user_id: &str) -> String {
    // Strip the leading "/" and any trailing arguments.
    let without_slash = &text[1..];
    let full_command = without_slash
        .split_once(' ')
        .map_or(without_slash, |(cmd, _)| cmd);
    // Strip @bot_name suffix if present
    let command = full_command.split('@').next().unwrap_or(full_command);

    match command {
        "start" | "help" => commands::handle_welcome(),
        "menu" => commands::handle_menu(),
        "about" => commands::handle_about(&state.owner_label),
        "history" => commands::handle_history(&state.history, user_id).await,
        _ => format!("Unknown command: /{}", ui::escape_html(command)),
    }
}

// ---------------------------------------------------------------------------
// Callback query handler
// ---------------------------------------------------------------------------

/// Handle the refresh/save/clear buttons under a report.
///
/// Callback data is `<action>|<number>`; anything else is acknowledged
/// and dropped. Refresh and save re-run the full lookup pipeline; clear
/// touches only the displayed message, never stored history.
async fn handle_callback(bot: Bot, query: CallbackQuery, state: SharedState) -> ResponseResult<()> {
    let user_id = query.from.id.0.to_string();

    let Some((action, number)) = query
        .data
        .as_deref()
        .and_then(|data| data.split_once('|'))
    else {
        bot.answer_callback_query(&query.id).await?;
        return Ok(());
    };

    let target = query
        .message
        .as_ref()
        .map(|message| (message.chat().id, message.id()));

    match action {
        ui::ACTION_REFRESH => {
            let Some((chat_id, message_id)) = target else {
                bot.answer_callback_query(&query.id).await?;
                return Ok(());
            };
            bot.answer_callback_query(&query.id).await?;

            match state.service.lookup(&user_id, number).await {
                Ok(rendered) => {
                    let formatted = bot
                        .edit_message_text(chat_id, message_id, &rendered.text)
                        .parse_mode(ParseMode::Html)
                        .reply_markup(ui::report_keyboard(number))
                        .await;
                    if let Err(err) = formatted {
                        warn!(error = %err, "formatted edit rejected, falling back to plain text");
                        bot.edit_message_text(chat_id, message_id, &rendered.text)
                            .await?;
                    }
                }
                Err(err) => {
                    warn!(user_id, number, error = %err, "refresh lookup failed");
                    bot.edit_message_text(
                        chat_id,
                        message_id,
                        "\u{274C} API Error while refreshing. Try again later.",
                    )
                    .await?;
                }
            }
        }

        ui::ACTION_SAVE => match state.service.lookup(&user_id, number).await {
            Ok(_) => {
                bot.answer_callback_query(&query.id)
                    .text("Saved to your history \u{2705}")
                    .await?;
            }
            Err(err) => {
                warn!(user_id, number, error = %err, "save lookup failed");
                bot.answer_callback_query(&query.id)
                    .text("\u{274C} Cannot reach API to save.")
                    .show_alert(true)
                    .await?;
            }
        },

        ui::ACTION_CLEAR => {
            bot.answer_callback_query(&query.id).await?;
            let Some((chat_id, message_id)) = target else {
                return Ok(());
            };
            if bot.delete_message(chat_id, message_id).await.is_err() {
                // Bots without delete rights edit the report away instead.
                let _ = bot
                    .edit_message_text(chat_id, message_id, "\u{1F5D1} Cleared by user.")
                    .await;
            }
        }

        other => {
            debug!(action = other, "unknown callback action ignored");
            bot.answer_callback_query(&query.id)
                .text("Unknown action")
                .await?;
        }
    }

    Ok(())
}
