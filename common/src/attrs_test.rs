use serde_json::{Value, json};

use super::*;

fn map(pairs: &[(&str, Value)]) -> AttrMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn empty_detection_covers_null_blank_and_containers() {
    assert!(is_empty_attr_value(&Value::Null));
    assert!(is_empty_attr_value(&json!("")));
    assert!(is_empty_attr_value(&json!("   ")));
    assert!(is_empty_attr_value(&json!([])));
    assert!(is_empty_attr_value(&json!({})));
    assert!(!is_empty_attr_value(&json!(0)));
    assert!(!is_empty_attr_value(&json!(false)));
    assert!(!is_empty_attr_value(&json!("x")));
}

#[test]
fn merge_keeps_existing_non_empty_values() {
    let base = map(&[("cpu_score", json!(7200)), ("ram_gb", json!(16))]);
    let incoming = map(&[("cpu_score", json!(7100)), ("storage_gb", json!(512))]);

    let merged = merge_attributes(&base, &incoming);
    assert_eq!(merged.get("cpu_score"), Some(&json!(7200)));
    assert_eq!(merged.get("storage_gb"), Some(&json!(512)));
    assert_eq!(merged.get("ram_gb"), Some(&json!(16)));
}

#[test]
fn merge_fills_empty_slots() {
    let base = map(&[("color", json!("")), ("size", Value::Null)]);
    let incoming = map(&[("color", json!("black")), ("size", json!("15in"))]);

    let merged = merge_attributes(&base, &incoming);
    assert_eq!(merged.get("color"), Some(&json!("black")));
    assert_eq!(merged.get("size"), Some(&json!("15in")));
}

#[test]
fn merge_never_writes_empty_incoming_values() {
    let base = map(&[("brand", json!("Acer"))]);
    let incoming = map(&[("brand", json!("")), ("notes", json!([]))]);

    let merged = merge_attributes(&base, &incoming);
    assert_eq!(merged.get("brand"), Some(&json!("Acer")));
    assert!(!merged.contains_key("notes"));
}

#[test]
fn prune_drops_empty_values() {
    let mut attributes = map(&[
        ("keep", json!("value")),
        ("blank", json!("")),
        ("none", Value::Null),
        ("list", json!([])),
    ]);
    prune_empty_attributes(&mut attributes);
    assert_eq!(attributes.len(), 1);
    assert!(attributes.contains_key("keep"));
}
