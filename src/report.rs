//! Lookup payload redaction and report rendering.
//!
//! The lookup API returns loosely-typed JSON whose schema is not ours to
//! fix. [`cleanup`] strips a fixed set of promotional/contact keys and
//! [`ReportFormatter::render`] turns whatever survives into an HTML-mode
//! Telegram message. Rendering never fails: unknown scalar shapes are
//! stringified and nested structures become compact JSON.

use serde_json::{Map, Value};

/// Payload keys always removed before display, matched case-insensitively.
///
/// These carry either advertising or a claimed owner identity; the report's
/// Owner line is always the configured label instead.
pub const REDACTED_KEYS: [&str; 11] = [
    "owner",
    "telegram",
    "tg",
    "channel",
    "owner_channel",
    "owner_telegram",
    "ads",
    "ad",
    "promo",
    "promote",
    "website",
];

/// Escape special HTML characters in user-provided text.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Drop every key whose lowercased form is in [`REDACTED_KEYS`].
///
/// Surviving keys keep their original order and values. Idempotent:
/// cleaning an already-clean payload is a no-op.
pub fn cleanup(payload: &Map<String, Value>) -> Map<String, Value> {
    payload
        .iter()
        .filter(|(key, _)| !REDACTED_KEYS.contains(&key.to_lowercase().as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Convert a `snake_case` or `space separated` key to Title Case for display.
fn title_case(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let rest: String = chars.flat_map(char::to_lowercase).collect();
                    format!("{}{rest}", first.to_uppercase())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display text for a field value.
///
/// Strings pass through, nested mappings and sequences are serialized to
/// compact JSON, and any other scalar falls back to its JSON notation.
/// Returns `None` for values the report omits (null, blank strings).
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(_) | Value::Array(_) => {
            Some(serde_json::to_string(value).unwrap_or_else(|_| value.to_string()))
        }
        other => Some(other.to_string()),
    }
}

/// Renders lookup reports with a forced owner label.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    owner_label: String,
}

impl ReportFormatter {
    /// Create a formatter that stamps `owner_label` on every report.
    pub fn new(owner_label: impl Into<String>) -> Self {
        Self {
            owner_label: owner_label.into(),
        }
    }

    /// Build the HTML report for `number` from an already-cleaned payload.
    ///
    /// The Owner line always shows the configured label; payload values
    /// never reach it even when an owner-ish key survives [`cleanup`]
    /// under a spelling outside the redaction set. Field order follows
    /// the payload's key order. Never fails.
    pub fn render(&self, number: &str, fields: &Map<String, Value>) -> String {
        let mut lines = Vec::with_capacity(fields.len().saturating_add(6));
        lines.push("\u{1F4F1} <b>Number Lookup Report</b>".to_owned());
        lines.push(SEPARATOR.to_owned());
        lines.push(format!(
            "\u{1F464} <b>Owner:</b> {}",
            escape_html(&self.owner_label)
        ));
        lines.push(format!(
            "\u{1F4DE} <b>Number:</b> <code>{}</code>",
            escape_html(number)
        ));

        for (key, value) in fields {
            let Some(text) = value_text(value) else {
                continue;
            };
            lines.push(format!(
                "\u{2022} <b>{}:</b> {}",
                escape_html(&title_case(key)),
                escape_html(&text)
            ));
        }

        lines.push(SEPARATOR.to_owned());
        lines.push("\u{1F50E} Lookup Completed".to_owned());
        lines.join("\n")
    }
}

const SEPARATOR: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";
