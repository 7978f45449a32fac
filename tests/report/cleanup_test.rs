//! Redaction tests — the fixed key set never survives cleanup.

use serde_json::{Map, Value};

use numlens::report::{cleanup, REDACTED_KEYS};

fn as_map(value: Value) -> Map<String, Value> {
    value
        .as_object()
        .expect("test payload should be an object")
        .clone()
}

#[test]
fn removes_every_redacted_key_case_insensitively() {
    let mut payload = Map::new();
    for key in REDACTED_KEYS {
        payload.insert(key.to_uppercase(), Value::String("x".to_owned()));
    }
    payload.insert("circle".to_owned(), Value::String("Delhi".to_owned()));

    let cleaned = cleanup(&payload);

    assert_eq!(cleaned.len(), 1, "only the non-redacted key should survive");
    assert!(cleaned.contains_key("circle"));
    for key in REDACTED_KEYS {
        assert!(!cleaned.keys().any(|k| k.eq_ignore_ascii_case(key)));
    }
}

#[test]
fn cleanup_is_idempotent() {
    let payload = as_map(serde_json::json!({
        "status": "active",
        "telegram": "t.me/x",
        "sim": "Jio",
        "ads": "buy now",
    }));

    let once = cleanup(&payload);
    let twice = cleanup(&once);
    assert_eq!(once, twice);
}

#[test]
fn preserves_surviving_key_order() {
    let payload = as_map(serde_json::json!({
        "status": "active",
        "telegram": "t.me/x",
        "sim": "Jio",
        "circle": "Delhi",
    }));

    let cleaned = cleanup(&payload);
    let keys: Vec<&str> = cleaned.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["status", "sim", "circle"]);
}

#[test]
fn preserves_nested_values_unmodified() {
    let payload = as_map(serde_json::json!({
        "operator": {"name": "Jio", "mnc": "857"},
        "promo": "spam",
    }));

    let cleaned = cleanup(&payload);
    assert_eq!(
        cleaned.get("operator"),
        Some(&serde_json::json!({"name": "Jio", "mnc": "857"}))
    );
    assert!(!cleaned.contains_key("promo"));
}

#[test]
fn owner_spellings_outside_the_set_survive() {
    // Only exact (case-insensitive) members of the set are dropped.
    let payload = as_map(serde_json::json!({
        "owner": "someone",
        "owner_name": "someone else",
    }));

    let cleaned = cleanup(&payload);
    assert!(!cleaned.contains_key("owner"));
    assert!(cleaned.contains_key("owner_name"));
}
