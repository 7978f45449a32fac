//! Telegram slash command handlers.
//!
//! Each function handles a specific command and returns an HTML-formatted
//! response string. All output uses HTML parse mode per project convention.

use crate::history::HistoryStore;
use crate::telegram::ui::format_history;

/// Welcome text for `/start` and `/help`.
pub fn handle_welcome() -> String {
    [
        "\u{1F44B} <b>Welcome!</b> I am your Number Lookup Bot.",
        "",
        "Send any mobile number (or just paste text containing a number) and I'll fetch details.",
        "",
        "Type /menu to see available commands.",
    ]
    .join("\n")
}

/// Command overview for `/menu`.
pub fn handle_menu() -> String {
    [
        "\u{1F4D8} <b>Bot Menu</b>",
        "\u{2022} Send a number or paste text containing a number to lookup",
        "\u{2022} /history — show your last lookups",
        "\u{2022} /about — about this bot",
        "",
        "Auto-Reply: If you paste a number in a group, I will reply automatically.",
    ]
    .join("\n")
}

/// Bot description for `/about`.
pub fn handle_about(owner_label: &str) -> String {
    format!(
        "\u{1F539} <b>About this Bot</b>\n\
         Owner: <b>{}</b>\n\
         This bot looks up mobile number information from a connected API.\n\
         It filters out promotions and contact channels from results.\n\n\
         Commands: /menu /history /about",
        crate::telegram::ui::escape_html(owner_label),
    )
}

/// Show the user's recent lookups for `/history`.
///
/// Reads at most the display limit even though more records are retained.
pub async fn handle_history(history: &HistoryStore, user_id: &str) -> String {
    let records = history.list(user_id).await;
    format_history(&records)
}
