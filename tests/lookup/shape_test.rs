//! Payload shape normalization — downstream code always sees a mapping.

use numlens::lookup::normalize_shape;
use numlens::report::cleanup;

#[test]
fn mapping_passes_through() {
    let map = normalize_shape(serde_json::json!({"status": "active"}));
    assert_eq!(map.get("status"), Some(&serde_json::json!("active")));
}

#[test]
fn bare_list_is_wrapped_under_raw() {
    let map = normalize_shape(serde_json::json!(["a", "b"]));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("raw"), Some(&serde_json::json!(["a", "b"])));
}

#[test]
fn bare_scalar_is_wrapped_under_raw() {
    let map = normalize_shape(serde_json::json!("not found"));
    assert_eq!(map.get("raw"), Some(&serde_json::json!("not found")));
}

#[test]
fn wrapped_list_survives_cleanup_and_renders_as_one_field() {
    let map = normalize_shape(serde_json::json!(["a", "b"]));
    let cleaned = cleanup(&map);
    assert_eq!(cleaned.len(), 1, "raw is not a redacted key");

    let formatter = numlens::report::ReportFormatter::new("Front Desk");
    let text = formatter.render("9876543210", &cleaned);
    assert!(text.contains(r#"<b>Raw:</b> ["a","b"]"#));
}
