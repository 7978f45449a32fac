//! HTML formatting and inline keyboard helpers for Telegram messages.
//!
//! All output uses HTML parse mode (never MarkdownV2) per project convention.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::history::LookupRecord;

pub use crate::report::escape_html;

/// Callback action that re-runs a lookup and replaces the displayed report.
pub const ACTION_REFRESH: &str = "refresh";
/// Callback action that re-runs a lookup and appends history only.
pub const ACTION_SAVE: &str = "save";
/// Callback action that removes the displayed report.
pub const ACTION_CLEAR: &str = "clear";

/// Build the three-action control row attached to every report.
///
/// Callback data is `<action>|<number>` so the handler can re-run the
/// lookup without any per-message state.
pub fn report_keyboard(number: &str) -> InlineKeyboardMarkup {
    let refresh = InlineKeyboardButton::callback(
        "\u{1F504} Refresh".to_owned(),
        format!("{ACTION_REFRESH}|{number}"),
    );
    let save = InlineKeyboardButton::callback(
        "\u{1F4BE} Save Report".to_owned(),
        format!("{ACTION_SAVE}|{number}"),
    );
    let clear = InlineKeyboardButton::callback(
        "\u{1F5D1} Clear".to_owned(),
        format!("{ACTION_CLEAR}|{number}"),
    );
    InlineKeyboardMarkup::new(vec![vec![refresh, save, clear]])
}

/// Format a user's lookup history as an HTML list, newest first.
pub fn format_history(records: &[LookupRecord]) -> String {
    if records.is_empty() {
        return "\u{1F4DA} You have no lookup history yet.".to_owned();
    }

    let mut lines = vec!["\u{1F4DA} <b>Your Lookup History</b>".to_owned()];
    for (index, record) in records.iter().enumerate() {
        let when = record.time.format("%Y-%m-%d %H:%M:%S");
        lines.push(format!(
            "{}. <code>{}</code> \u{2014} {} ({when} UTC)",
            index.saturating_add(1),
            escape_html(&record.number),
            escape_html(&record.summary),
        ));
    }
    lines.join("\n")
}
