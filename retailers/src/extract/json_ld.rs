use scraper::{Html, Selector};
use serde_json::Value;

/// Every JSON-LD payload embedded in the page, in document order. Broken
/// JSON blocks are skipped, not fatal.
pub(crate) fn json_ld_payloads(doc: &Html) -> Vec<Value> {
    let selector = Selector::parse("script").unwrap();
    doc.select(&selector)
        .filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|kind| kind.to_lowercase().contains("ld+json"))
        })
        .filter_map(|script| {
            let text: String = script.text().collect();
            serde_json::from_str::<Value>(text.trim()).ok()
        })
        .collect()
}

/// First JSON-LD object typed `Product`, searched through lists, `@graph`
/// wrappers and nested values.
pub(crate) fn extract_json_ld_product(doc: &Html) -> Value {
    for payload in json_ld_payloads(doc) {
        if let Some(product) = find_product_object(&payload) {
            return product.clone();
        }
    }
    Value::Null
}

fn find_product_object(payload: &Value) -> Option<&Value> {
    match payload {
        Value::Array(items) => items.iter().find_map(find_product_object),
        Value::Object(map) => {
            if let Some(graph) = map.get("@graph") {
                return find_product_object(graph);
            }
            if type_names(map.get("@type")).contains(&"product".to_string()) {
                return Some(payload);
            }
            map.values().find_map(find_product_object)
        }
        _ => None,
    }
}

/// Last element of the first `BreadcrumbList` found in any JSON-LD block.
pub(crate) fn extract_breadcrumb_category(doc: &Html) -> Option<String> {
    for payload in json_ld_payloads(doc) {
        if let Some(category) = find_breadcrumb(&payload) {
            return Some(category);
        }
    }
    None
}

fn find_breadcrumb(payload: &Value) -> Option<String> {
    match payload {
        Value::Array(items) => items.iter().find_map(find_breadcrumb),
        Value::Object(map) => {
            if let Some(graph) = map.get("@graph") {
                return find_breadcrumb(graph);
            }
            if type_names(map.get("@type")).contains(&"breadcrumblist".to_string()) {
                let elements = map.get("itemListElement").and_then(Value::as_array)?;
                let names: Vec<String> = elements
                    .iter()
                    .filter_map(|element| {
                        let element = element.as_object()?;
                        match element.get("item") {
                            Some(Value::Object(item)) => item.get("name").and_then(as_text),
                            _ => element.get("name").and_then(as_text),
                        }
                    })
                    .collect();
                return names.last().cloned();
            }
            map.values().find_map(find_breadcrumb)
        }
        _ => None,
    }
}

fn type_names(kind: Option<&Value>) -> Vec<String> {
    match kind {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|item| item.to_lowercase())
            .collect(),
        Some(Value::String(kind)) => vec![kind.to_lowercase()],
        _ => Vec::new(),
    }
}

/// Brand may be a plain string, an object with a name, or a list thereof.
pub(crate) fn extract_brand(product: &Value) -> Option<String> {
    match product.get("brand") {
        Some(Value::Object(brand)) => brand.get("name").and_then(as_text),
        Some(Value::Array(brands)) => match brands.first() {
            Some(Value::Object(brand)) => brand.get("name").and_then(as_text),
            Some(other) => as_text(other),
            None => None,
        },
        Some(other) => as_text(other),
        None => None,
    }
}

/// First offer object, whether `offers` is a list or a single object.
pub(crate) fn first_offer(product: &Value) -> Option<&Value> {
    match product.get("offers") {
        Some(Value::Array(offers)) => offers.first().filter(|offer| offer.is_object()),
        Some(offer @ Value::Object(_)) => Some(offer),
        _ => None,
    }
}

/// Schema.org availability URLs collapse to short snake tokens.
pub(crate) fn extract_availability(product: &Value) -> Option<String> {
    let offer = first_offer(product)?;
    let availability = offer.get("availability").and_then(as_text)?;
    let token = availability
        .rsplit('/')
        .next()
        .unwrap_or(&availability)
        .trim()
        .to_lowercase();
    let mapped = match token.as_str() {
        "instock" | "in_stock" => "in_stock",
        "outofstock" | "out_of_stock" => "out_of_stock",
        "preorder" | "pre_order" => "preorder",
        other => other,
    };
    if mapped.is_empty() {
        None
    } else {
        Some(mapped.to_string())
    }
}

/// Scalar JSON value rendered as trimmed text; empty becomes None.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}
