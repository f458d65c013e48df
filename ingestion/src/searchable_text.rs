use common::attrs::AttrMap;
use common::normalize::normalize_text;
use common::records::NormalizedListing;
use serde_json::Value;

/// Hard cap on tokens kept per canonical product.
const MAX_TOKENS: usize = 220;
/// List values contribute at most this many entries.
const MAX_LIST_ITEMS: usize = 8;

/// Rebuilds a canonical's searchable text from everything known about it:
/// existing text first (so established tokens keep their rank), then the
/// listing's names, identifiers and attribute keys/values. Tokens are
/// deduplicated in first-seen order and capped.
pub fn build_searchable_text(
    normalized: &NormalizedListing,
    product_attributes: &AttrMap,
    raw_attributes: &AttrMap,
    existing_text: &str,
) -> String {
    let mut chunks: Vec<String> = vec![
        existing_text.to_string(),
        normalized.canonical_name.clone(),
        normalized.title.clone(),
        normalized.brand.clone(),
        normalized.category.clone(),
        normalized.model_number.clone().unwrap_or_default(),
        normalized.gtin.clone().unwrap_or_default(),
        normalized.mpn.clone().unwrap_or_default(),
    ];
    chunks.extend(attribute_chunks(product_attributes));
    chunks.extend(attribute_chunks(raw_attributes));

    let mut tokens: Vec<String> = Vec::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    for chunk in chunks {
        let folded = normalize_text(&chunk);
        if folded.is_empty() {
            continue;
        }
        for token in folded.split_whitespace() {
            if seen.insert(token.to_string()) {
                tokens.push(token.to_string());
                if tokens.len() >= MAX_TOKENS {
                    return tokens.join(" ");
                }
            }
        }
    }
    tokens.join(" ")
}

fn attribute_chunks(attributes: &AttrMap) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    for (key, value) in attributes {
        chunks.push(key.clone());
        match value {
            Value::Object(map) => {
                for (child_key, child_value) in map {
                    chunks.push(child_key.clone());
                    chunks.push(scalar_text(child_value));
                }
            }
            Value::Array(items) => {
                for item in items.iter().take(MAX_LIST_ITEMS) {
                    chunks.push(scalar_text(item));
                }
            }
            Value::String(text) => {
                let compact = text.trim();
                if !compact.is_empty() {
                    chunks.push(compact.to_string());
                    // "16GB"-style values also index without spaces so
                    // substring search hits both spellings
                    if has_mixed_alnum(compact) {
                        chunks.push(compact.replace(' ', ""));
                    }
                }
            }
            other => chunks.push(scalar_text(other)),
        }
    }
    chunks
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn has_mixed_alnum(text: &str) -> bool {
    text.as_bytes().windows(2).any(|pair| {
        (pair[0].is_ascii_alphabetic() && pair[1].is_ascii_digit())
            || (pair[0].is_ascii_digit() && pair[1].is_ascii_alphabetic())
    })
}

#[cfg(test)]
#[path = "searchable_text_test.rs"]
mod tests;
