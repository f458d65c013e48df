use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

use common::attrs::{AttrMap, set_attr_default};

static STRENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(mg|mcg|ml|g)\b").unwrap());
static PACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:pack|tablets|tablet|capsules|capsule|caplets|softgels|sachets)")
        .unwrap()
});
static SIZE_ML_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*ml\b").unwrap());
static SIZE_L_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*l\b").unwrap());
static SIZE_G_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*g\b").unwrap());
static SIZE_KG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*kg\b").unwrap());
static SIZE_OZ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*oz\b").unwrap());
static SPF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"spf\s*(\d+)").unwrap());
static BEAUTY_PACK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*(?:pack|pk)\b").unwrap());
static SHADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"shade:?\s+([a-z][a-z0-9' -]{1,24})$").unwrap());
static ENERGY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*star").unwrap());

/// Beauty product taxonomy used for `product_type`; the longest matching
/// phrase wins so "lip gloss" beats "lip".
const BEAUTY_PRODUCT_TYPES: &[(&str, &str)] = &[
    ("lip gloss", "lip_gloss"),
    ("lip luminizer", "lip_gloss"),
    ("lip balm", "lip_balm"),
    ("lipstick", "lipstick"),
    ("mascara", "mascara"),
    ("foundation", "foundation"),
    ("concealer", "concealer"),
    ("eyeshadow", "eyeshadow"),
    ("blush", "blush"),
    ("face mask", "mask"),
    ("hair mask", "hair_mask"),
    ("serum", "serum"),
    ("moisturiser", "moisturiser"),
    ("moisturizer", "moisturiser"),
    ("cleanser", "cleanser"),
    ("toner", "toner"),
    ("sunscreen", "sunscreen"),
    ("shampoo", "shampoo"),
    ("conditioner", "conditioner"),
    ("perfume", "fragrance"),
    ("fragrance", "fragrance"),
];

const FINISHES: &[&str] = &["matte", "shimmer", "glossy", "satin", "dewy", "metallic"];
const SKIN_TYPES: &[&str] = &["dry", "oily", "combination", "normal", "sensitive", "mature"];
const SKIN_CONCERNS: &[(&str, &str)] = &[
    ("hydrating", "hydration"),
    ("hydration", "hydration"),
    ("acne", "acne"),
    ("blemish", "acne"),
    ("breakout", "acne"),
    ("anti-aging", "aging"),
    ("anti aging", "aging"),
    ("wrinkle", "aging"),
    ("firming", "aging"),
    ("brightening", "brightening"),
    ("dark spot", "brightening"),
    ("glow", "brightening"),
    ("soothing", "sensitivity"),
    ("calming", "sensitivity"),
];

/// Strength, pack size and dose form derived from a pharmacy title. Only
/// fills keys the page itself did not provide.
pub(crate) fn derive_pharma_attributes(title: &str) -> AttrMap {
    let lowered = title.to_lowercase();
    let mut attributes = AttrMap::new();

    if let Some(captures) = STRENGTH_RE.captures(&lowered) {
        attributes.insert(
            "strength".to_string(),
            json!(format!("{}{}", &captures[1], &captures[2])),
        );
    }
    if let Some(captures) = PACK_RE.captures(&lowered)
        && let Ok(count) = captures[1].parse::<i64>()
    {
        attributes.insert("pack_size".to_string(), json!(count));
    }

    let (form, dosage_unit) = if lowered.contains("tablet") {
        (Some("tablet"), Some("tablet"))
    } else if lowered.contains("caplet") {
        (Some("caplet"), Some("caplet"))
    } else if lowered.contains("capsule") {
        (Some("capsule"), Some("capsule"))
    } else if lowered.contains("liquid") || lowered.contains("syrup") {
        (Some("liquid"), Some("ml"))
    } else {
        (None, None)
    };
    if let Some(form) = form {
        attributes.insert("form".to_string(), json!(form));
    }
    if let Some(dosage_unit) = dosage_unit {
        attributes.insert("dosage_unit".to_string(), json!(dosage_unit));
    }

    attributes
}

/// Beauty search attributes derived from title, category and description
/// text, filling only missing keys.
pub(crate) fn enrich_beauty_attributes(attributes: &mut AttrMap, title: &str, raw_category: &str) {
    let description = attributes
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let text = format!("{title} {raw_category} {description}").to_lowercase();

    if let Some((_, product_type)) = BEAUTY_PRODUCT_TYPES
        .iter()
        .filter(|(phrase, _)| text.contains(phrase))
        .max_by_key(|(phrase, _)| phrase.len())
    {
        set_attr_default(attributes, "product_type", json!(product_type));
    }

    if let Some(captures) = SIZE_ML_RE.captures(&text) {
        set_attr_default(attributes, "size_ml", number_value(&captures[1], 1.0));
    } else if let Some(captures) = SIZE_L_RE.captures(&text) {
        set_attr_default(attributes, "size_ml", number_value(&captures[1], 1000.0));
    }
    if let Some(captures) = SIZE_KG_RE.captures(&text) {
        set_attr_default(attributes, "size_g", number_value(&captures[1], 1000.0));
    } else if let Some(captures) = SIZE_G_RE.captures(&text) {
        set_attr_default(attributes, "size_g", number_value(&captures[1], 1.0));
    }
    if let Some(captures) = SIZE_OZ_RE.captures(&text) {
        set_attr_default(attributes, "size_oz", number_value(&captures[1], 1.0));
    }
    if let Some(captures) = SPF_RE.captures(&text)
        && let Ok(spf) = captures[1].parse::<i64>()
    {
        set_attr_default(attributes, "spf", json!(spf));
    }
    if let Some(captures) = BEAUTY_PACK_RE.captures(&text)
        && let Ok(count) = captures[1].parse::<i64>()
    {
        set_attr_default(attributes, "pack_size", json!(count));
    }
    if let Some(captures) = SHADE_RE.captures(&text) {
        set_attr_default(attributes, "shade", json!(captures[1].trim()));
    }

    if let Some(finish) = FINISHES.iter().find(|finish| text.contains(*finish)) {
        set_attr_default(attributes, "finish", json!(finish));
    }

    let skin_types: Vec<&str> = SKIN_TYPES
        .iter()
        .filter(|skin_type| text.contains(&format!("{skin_type} skin")))
        .copied()
        .collect();
    if !skin_types.is_empty() {
        set_attr_default(attributes, "skin_type", json!(skin_types));
    }

    let mut concerns: Vec<&str> = Vec::new();
    for (keyword, concern) in SKIN_CONCERNS.iter().copied() {
        if text.contains(keyword) && !concerns.contains(&concern) {
            concerns.push(concern);
        }
    }
    if !concerns.is_empty() {
        set_attr_default(attributes, "skin_concern", json!(concerns));
    }
}

/// Capacity and energy-rating attributes for whiteware, from the title.
pub(crate) fn enrich_home_appliance_attributes(attributes: &mut AttrMap, title: &str) {
    let lowered = title.to_lowercase();

    if let Some(captures) = SIZE_KG_RE.captures(&lowered) {
        set_attr_default(attributes, "capacity_kg", number_value(&captures[1], 1.0));
    }
    if let Some(captures) = SIZE_L_RE.captures(&lowered) {
        set_attr_default(attributes, "capacity_l", number_value(&captures[1], 1.0));
    }
    if let Some(captures) = ENERGY_RE.captures(&lowered) {
        set_attr_default(attributes, "energy_rating", number_value(&captures[1], 1.0));
    }
}

fn number_value(raw: &str, scale: f64) -> Value {
    let Ok(parsed) = raw.parse::<f64>() else {
        return Value::Null;
    };
    let scaled = parsed * scale;
    if scaled.fract() == 0.0 && scaled.abs() < 9e15 {
        json!(scaled as i64)
    } else {
        json!(scaled)
    }
}

#[cfg(test)]
#[path = "enrich_test.rs"]
mod tests;
