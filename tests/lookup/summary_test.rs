//! History summary derivation — the status → sim → first-value precedence
//! is a pinned contract.

use serde_json::Map;

use numlens::lookup::derive_summary;
use numlens::report::cleanup;

fn fields(value: serde_json::Value) -> Map<String, serde_json::Value> {
    value
        .as_object()
        .expect("test payload should be an object")
        .clone()
}

#[test]
fn status_wins_over_sim() {
    let cleaned = cleanup(&fields(serde_json::json!({
        "status": "active",
        "telegram": "t.me/x",
        "sim": "Jio",
    })));
    assert!(!cleaned.contains_key("telegram"));
    assert_eq!(derive_summary(&cleaned), "active");
}

#[test]
fn sim_is_the_fallback_for_missing_status() {
    let summary = derive_summary(&fields(serde_json::json!({"sim": "Jio", "circle": "Delhi"})));
    assert_eq!(summary, "Jio");
}

#[test]
fn blank_status_falls_through_to_sim() {
    let summary = derive_summary(&fields(serde_json::json!({"status": "", "sim": "Jio"})));
    assert_eq!(summary, "Jio");
}

#[test]
fn null_status_falls_through_to_sim() {
    let summary = derive_summary(&fields(serde_json::json!({"status": null, "sim": "Jio"})));
    assert_eq!(summary, "Jio");
}

#[test]
fn first_remaining_value_is_the_last_resort() {
    let summary = derive_summary(&fields(serde_json::json!({"circle": "Delhi", "op": "Jio"})));
    assert_eq!(summary, "Delhi");
}

#[test]
fn empty_payload_yields_the_no_summary_literal() {
    assert_eq!(derive_summary(&Map::new()), "No summary");
}

#[test]
fn nested_value_serializes_to_json() {
    let summary = derive_summary(&fields(serde_json::json!({"raw": ["a", "b"]})));
    assert_eq!(summary, r#"["a","b"]"#);
}

#[test]
fn long_summaries_are_capped_at_one_hundred_chars() {
    let long: Vec<String> = (0..60).map(|i| format!("item-{i}")).collect();
    let summary = derive_summary(&fields(serde_json::json!({"raw": long})));
    assert_eq!(summary.chars().count(), 100);
}

#[test]
fn numeric_summary_is_stringified() {
    let summary = derive_summary(&fields(serde_json::json!({"count": 3})));
    assert_eq!(summary, "3");
}
