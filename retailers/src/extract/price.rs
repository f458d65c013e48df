use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use common::price::{parse_price_value, round2};
use common::vertical::Vertical;

use crate::extract::json_ld::first_offer;
use crate::extract::meta::{meta_content, meta_contents};

/// Upper bound on any believable price; candidates at or above are junk
/// (order ids, grams, view counts).
const PRICE_CEILING: f64 = 100_000.0;
const MAX_TEXT_CANDIDATES: usize = 12;

static SCRIPT_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""(?:price|salePrice|currentPrice|finalPrice|regularPrice|amount|priceValue)"\s*:\s*"?(\d{1,7}(?:\.\d{1,2})?)"?"#,
    )
    .unwrap()
});
static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d{1,5}(?:[.,]\d{1,2})?)").unwrap());
static CONTEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:was|now|price|sale|special|from|only)\b\s*:?\s*\$?\s*(\d{1,5}(?:[.,]\d{1,2})?)")
        .unwrap()
});

/// Titles that mark premium tech hardware: claimed promos on these need to
/// clear the strictest plausibility floor.
const PREMIUM_TECH_TOKENS: &[&str] = &[
    "macbook",
    "iphone",
    "galaxy",
    "surface",
    "playstation",
    "xbox",
    "ultrabook",
];

/// Extracts (regular, promo) prices from a product page. Three candidate
/// pools are built; the most trustworthy non-empty pool decides:
/// structured JSON-LD/meta > inline-script keys > visible text.
pub(crate) fn extract_prices(
    product: &Value,
    doc: &Html,
    title: &str,
    vertical: Vertical,
) -> (f64, Option<f64>) {
    let structured = clean_pool(structured_candidates(product, doc));
    let script = clean_pool(script_candidates(doc));
    let text = clean_pool(text_candidates(doc));

    let primary = if !structured.is_empty() {
        structured
    } else if !script.is_empty() {
        script
    } else {
        text
    };

    let Some(&regular) = primary.last() else {
        return (0.0, None);
    };
    if primary.len() == 1 {
        return (regular, None);
    }

    let floor = plausibility_floor(vertical, regular, title);
    let promo = primary
        .iter()
        .rev()
        .skip(1)
        .find(|&&candidate| candidate < regular && candidate / regular >= floor)
        .copied();

    (regular, promo)
}

/// Minimum promo/regular ratio for a promo to be believed. Rejects the
/// "$4.00 promo on a $1969 MacBook" bait that script pools love to emit.
pub(crate) fn plausibility_floor(vertical: Vertical, regular: f64, title: &str) -> f64 {
    if vertical != Vertical::Tech || regular < 800.0 {
        return 0.20;
    }
    let lowered = title.to_lowercase();
    if PREMIUM_TECH_TOKENS.iter().any(|token| lowered.contains(token)) {
        0.55
    } else {
        0.35
    }
}

fn structured_candidates(product: &Value, doc: &Html) -> Vec<f64> {
    let mut candidates = Vec::new();

    if let Some(offer) = first_offer(product) {
        for key in ["price", "lowPrice", "highPrice"] {
            push_candidate(&mut candidates, offer.get(key));
        }
        match offer.get("priceSpecification") {
            Some(Value::Array(specs)) => {
                for spec in specs {
                    push_candidate(&mut candidates, spec.get("price"));
                }
            }
            Some(spec @ Value::Object(_)) => push_candidate(&mut candidates, spec.get("price")),
            _ => {}
        }
    }

    for content in meta_contents(doc, "property", "product:price:amount") {
        push_text_candidate(&mut candidates, &content);
    }
    for content in meta_contents(doc, "property", "og:price:amount") {
        push_text_candidate(&mut candidates, &content);
    }
    if let Some(content) = meta_content(doc, "name", "price") {
        push_text_candidate(&mut candidates, &content);
    }

    candidates
}

fn script_candidates(doc: &Html) -> Vec<f64> {
    let selector = Selector::parse("script").unwrap();
    let mut candidates = Vec::new();
    for script in doc.select(&selector) {
        let text: String = script.text().collect();
        for captures in SCRIPT_PRICE_RE.captures_iter(&text) {
            push_text_candidate(&mut candidates, &captures[1]);
        }
    }
    candidates
}

fn text_candidates(doc: &Html) -> Vec<f64> {
    let body: String = doc.root_element().text().collect::<Vec<_>>().join(" ");
    let mut candidates = Vec::new();
    for captures in CURRENCY_RE.captures_iter(&body) {
        if candidates.len() >= MAX_TEXT_CANDIDATES {
            break;
        }
        push_text_candidate(&mut candidates, &captures[1]);
    }
    for captures in CONTEXT_RE.captures_iter(&body) {
        if candidates.len() >= MAX_TEXT_CANDIDATES {
            break;
        }
        push_text_candidate(&mut candidates, &captures[1]);
    }
    candidates
}

fn push_candidate(bucket: &mut Vec<f64>, value: Option<&Value>) {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => parse_price_value(text),
        _ => None,
    };
    if let Some(parsed) = parsed {
        bucket.push(parsed);
    }
}

fn push_text_candidate(bucket: &mut Vec<f64>, raw: &str) {
    if let Some(parsed) = parse_price_value(raw) {
        bucket.push(parsed);
    }
}

/// Applies cents correction, drops junk, dedupes at 2-decimal precision
/// and returns the pool sorted ascending.
fn clean_pool(candidates: Vec<f64>) -> Vec<f64> {
    let mut cents: Vec<i64> = candidates
        .into_iter()
        .map(cents_correction)
        .filter(|&value| value > 0.0 && value < PRICE_CEILING)
        .map(|value| (round2(value) * 100.0).round() as i64)
        .collect();
    cents.sort_unstable();
    cents.dedup();
    cents.into_iter().map(|value| value as f64 / 100.0).collect()
}

/// Sites that emit prices in cents ("249900" for $2,499.00) get divided
/// back down when the shape is unmistakable.
fn cents_correction(value: f64) -> f64 {
    if value > 10_000.0
        && value.fract() == 0.0
        && (value as i64) % 100 == 0
        && value / 100.0 > 0.0
        && value / 100.0 < PRICE_CEILING
    {
        value / 100.0
    } else {
        value
    }
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
