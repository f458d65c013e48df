use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Value, json};

use common::attrs::{AttrMap, prune_empty_attributes, set_attr_default};
use common::vertical::Vertical;

use crate::extract::enrich::{enrich_beauty_attributes, enrich_home_appliance_attributes};
use crate::extract::json_ld::as_text;
use crate::extract::meta::meta_content;

const MAX_ATTRIBUTES: usize = 60;
const MAX_TABLE_ROWS: usize = 220;
const MAX_DEFINITION_TERMS: usize = 80;
const MAX_VALUE_CHARS: usize = 260;
const MAX_KEYWORDS: usize = 16;
const SKIPPED_KEYS: &[&str] = &["", "price", "quantity", "qty"];

/// JSON-LD fields lifted directly into the attribute map when present.
const DIRECT_FIELDS: &[&str] = &[
    "model",
    "sku",
    "description",
    "color",
    "size",
    "material",
    "pattern",
    "scent",
    "gender",
];

static SCRIPT_MODEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""model"\s*:\s*"([^"]+)""#).unwrap());
static SCRIPT_INGREDIENTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:ingredients|activeIngredients)"\s*:\s*"([^"]{2,400})""#).unwrap()
});

/// Harvests the attribute map for one product page. Earlier sources claim
/// keys first; later sources only fill what is still empty.
pub(crate) fn harvest_attributes(
    product: &Value,
    doc: &Html,
    title: &str,
    raw_category: &str,
    vertical: Vertical,
) -> AttrMap {
    let mut attributes = AttrMap::new();

    collect_additional_properties(&mut attributes, product);
    collect_direct_fields(&mut attributes, product);
    collect_keywords(&mut attributes, product, doc);
    collect_ingredients(&mut attributes, product, doc);
    collect_specification_tables(&mut attributes, doc);
    collect_definition_lists(&mut attributes, doc);

    if attributes.is_empty() {
        // last-ditch: some storefronts only expose the model in inline JSON
        let script_text = all_script_text(doc);
        if let Some(captures) = SCRIPT_MODEL_RE.captures(&script_text) {
            attributes.insert("model".to_string(), json!(captures[1].trim()));
        }
    }

    match vertical {
        Vertical::Beauty => enrich_beauty_attributes(&mut attributes, title, raw_category),
        Vertical::HomeAppliances => enrich_home_appliance_attributes(&mut attributes, title),
        _ => {}
    }

    prune_empty_attributes(&mut attributes);
    while attributes.len() > MAX_ATTRIBUTES {
        let Some(last_key) = attributes.keys().last().cloned() else {
            break;
        };
        attributes.remove(&last_key);
    }

    attributes
}

fn collect_additional_properties(attributes: &mut AttrMap, product: &Value) {
    match product.get("additionalProperty") {
        Some(Value::Array(entries)) => {
            for entry in entries {
                let Some(entry) = entry.as_object() else {
                    continue;
                };
                let Some(name) = entry.get("name").and_then(as_text) else {
                    continue;
                };
                let Some(value) = entry.get("value") else {
                    continue;
                };
                let key = normalize_attr_key(&name);
                if !skipped(&key) {
                    attributes.insert(key, coerce_value(value));
                }
            }
        }
        // property-map form: {"Screen Size": "16 in", ...}
        Some(Value::Object(map)) => {
            for (name, value) in map {
                let key = normalize_attr_key(name);
                if !skipped(&key) {
                    attributes.insert(key, coerce_value(value));
                }
            }
        }
        _ => {}
    }
}

fn collect_direct_fields(attributes: &mut AttrMap, product: &Value) {
    for field in DIRECT_FIELDS.iter().copied() {
        if let Some(text) = product.get(field).and_then(as_text) {
            set_attr_default(attributes, field, json!(text));
        }
    }
}

fn collect_keywords(attributes: &mut AttrMap, product: &Value, doc: &Html) {
    let raw = match product.get("keywords") {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(as_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(other) => as_text(other),
        None => meta_content(doc, "name", "keywords"),
    };
    let Some(raw) = raw else {
        return;
    };

    let keywords: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .take(MAX_KEYWORDS)
        .map(|keyword| keyword.to_string())
        .collect();
    if !keywords.is_empty() {
        set_attr_default(attributes, "keywords", json!(keywords));
    }
}

fn collect_ingredients(attributes: &mut AttrMap, product: &Value, doc: &Html) {
    let from_ld = ["ingredients", "activeIngredients"]
        .iter()
        .find_map(|key| match product.get(*key) {
            Some(Value::Array(items)) => {
                let joined = items.iter().filter_map(as_text).collect::<Vec<_>>().join(", ");
                if joined.is_empty() { None } else { Some(joined) }
            }
            Some(other) => as_text(other),
            None => None,
        });

    let ingredients = from_ld.or_else(|| {
        let script_text = all_script_text(doc);
        SCRIPT_INGREDIENTS_RE
            .captures(&script_text)
            .map(|captures| captures[1].trim().to_string())
    });

    if let Some(ingredients) = ingredients {
        set_attr_default(attributes, "ingredients", json!(ingredients));
    }
}

fn collect_specification_tables(attributes: &mut AttrMap, doc: &Html) {
    let row_selector = Selector::parse("table tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    for row in doc.select(&row_selector).take(MAX_TABLE_ROWS) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 2 {
            continue;
        }
        insert_harvested(attributes, &cells[0], &cells[1]);
    }
}

fn collect_definition_lists(attributes: &mut AttrMap, doc: &Html) {
    let dl_selector = Selector::parse("dl").unwrap();
    let dt_selector = Selector::parse("dt").unwrap();
    let dd_selector = Selector::parse("dd").unwrap();

    for list in doc.select(&dl_selector) {
        let terms: Vec<String> = list
            .select(&dt_selector)
            .take(MAX_DEFINITION_TERMS)
            .map(|term| term.text().collect::<String>().trim().to_string())
            .collect();
        let definitions: Vec<String> = list
            .select(&dd_selector)
            .take(MAX_DEFINITION_TERMS)
            .map(|definition| definition.text().collect::<String>().trim().to_string())
            .collect();
        for (term, definition) in terms.iter().zip(definitions.iter()) {
            insert_harvested(attributes, term, definition);
        }
    }
}

fn insert_harvested(attributes: &mut AttrMap, raw_key: &str, raw_value: &str) {
    if attributes.len() >= MAX_ATTRIBUTES {
        return;
    }
    let key = normalize_attr_key(raw_key);
    if skipped(&key) || raw_value.len() > MAX_VALUE_CHARS {
        return;
    }
    set_attr_default(attributes, &key, coerce_text(raw_value));
}

fn skipped(key: &str) -> bool {
    SKIPPED_KEYS.contains(&key)
}

/// Lower-snake attribute keys: non-alphanumerics become underscores,
/// runs collapse, edges trim.
pub(crate) fn normalize_attr_key(raw_key: &str) -> String {
    let lowered = raw_key.trim().to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    let mut collapsed = String::with_capacity(replaced.len());
    let mut previous_underscore = false;
    for ch in replaced.chars() {
        if ch == '_' {
            if !previous_underscore {
                collapsed.push('_');
            }
            previous_underscore = true;
        } else {
            collapsed.push(ch);
            previous_underscore = false;
        }
    }
    collapsed.trim_matches('_').to_string()
}

/// Scalars keep their JSON type; numeric-looking strings become numbers.
fn coerce_value(value: &Value) -> Value {
    match value {
        Value::Number(_) | Value::Bool(_) => value.clone(),
        other => match as_text(other) {
            Some(text) => coerce_text(&text),
            None => value.clone(),
        },
    }
}

fn coerce_text(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.chars().any(|ch| ch.is_ascii_digit())
        && let Ok(parsed) = trimmed.parse::<f64>()
    {
        if parsed.fract() == 0.0 && parsed.abs() < 9e15 {
            return json!(parsed as i64);
        }
        return json!(parsed);
    }
    json!(trimmed)
}

fn all_script_text(doc: &Html) -> String {
    let selector = Selector::parse("script").unwrap();
    doc.select(&selector)
        .map(|script| script.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "attributes_test.rs"]
mod tests;
