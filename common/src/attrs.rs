use serde_json::{Map, Value};

/// Semi-structured attribute map harvested from product pages. Values are
/// tagged scalars, lists or nested maps and are stored as JSON.
pub type AttrMap = Map<String, Value>;

/// Empty means absent: null, blank string, or an empty container.
pub fn is_empty_attr_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// First-write-wins merge: `incoming` only fills keys that are missing or
/// empty in `base`. Empty incoming values are never written.
pub fn merge_attributes(base: &AttrMap, incoming: &AttrMap) -> AttrMap {
    let mut merged = base.clone();
    for (key, value) in incoming {
        if is_empty_attr_value(value) {
            continue;
        }
        let occupied = merged
            .get(key)
            .is_some_and(|existing| !is_empty_attr_value(existing));
        if !occupied {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Drops every empty value from the map in place.
pub fn prune_empty_attributes(attributes: &mut AttrMap) {
    attributes.retain(|_, value| !is_empty_attr_value(value));
}

/// Inserts only when the key is currently missing or empty.
pub fn set_attr_default(attributes: &mut AttrMap, key: &str, value: Value) {
    if is_empty_attr_value(&value) {
        return;
    }
    let occupied = attributes
        .get(key)
        .is_some_and(|existing| !is_empty_attr_value(existing));
    if !occupied {
        attributes.insert(key.to_string(), value);
    }
}

/// Renders a scalar attribute value the way it would appear in page text,
/// for case-insensitive comparisons and token harvesting.
pub fn attr_value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "attrs_test.rs"]
mod tests;
