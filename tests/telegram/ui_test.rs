//! Telegram UI formatting tests.

use chrono::{TimeZone, Utc};

use numlens::history::LookupRecord;
use numlens::telegram::ui::{escape_html, format_history, report_keyboard};

#[test]
fn escape_html_escapes_special_chars() {
    assert_eq!(escape_html("<b>test</b>"), "&lt;b&gt;test&lt;/b&gt;");
    assert_eq!(escape_html("a & b"), "a &amp; b");
}

#[test]
fn escape_html_passes_normal_text() {
    let text = "just a normal message";
    assert_eq!(escape_html(text), text);
}

#[test]
fn report_keyboard_has_three_buttons_with_number_in_callbacks() {
    let kb = report_keyboard("9876543210");
    let rows = &kb.inline_keyboard;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 3);

    let expected = [
        ("Refresh", "refresh|9876543210"),
        ("Save Report", "save|9876543210"),
        ("Clear", "clear|9876543210"),
    ];
    for (button, (label, callback)) in rows[0].iter().zip(expected) {
        assert!(button.text.contains(label), "button should be labelled {label}");
        match &button.kind {
            teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                assert_eq!(data, callback);
            }
            _ => panic!("expected CallbackData"),
        }
    }
}

#[test]
fn empty_history_renders_a_friendly_notice() {
    let text = format_history(&[]);
    assert!(text.contains("no lookup history"));
}

#[test]
fn history_lines_are_numbered_newest_first() {
    let records = vec![
        LookupRecord {
            number: "9876543210".to_owned(),
            summary: "active".to_owned(),
            time: Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 0).single().expect("valid date"),
        },
        LookupRecord {
            number: "9123456780".to_owned(),
            summary: "inactive".to_owned(),
            time: Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).single().expect("valid date"),
        },
    ];

    let text = format_history(&records);
    assert!(text.contains("<b>Your Lookup History</b>"));
    assert!(text.contains("1. <code>9876543210</code>"));
    assert!(text.contains("2. <code>9123456780</code>"));
    assert!(text.contains("2026-08-07 12:30:00 UTC"));
}

#[test]
fn history_summaries_are_html_escaped() {
    let records = vec![LookupRecord {
        number: "9876543210".to_owned(),
        summary: "<b>bold</b>".to_owned(),
        time: Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 0).single().expect("valid date"),
    }];

    let text = format_history(&records);
    assert!(!text.contains("<b>bold</b>"));
    assert!(text.contains("&lt;b&gt;bold&lt;/b&gt;"));
}
