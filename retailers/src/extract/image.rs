use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use common::normalize::normalize_text;

use crate::extract::json_ld::as_text;
use crate::extract::meta::meta_contents;

/// URL or attribute tokens that mark chrome, not product imagery.
const NEGATIVE_TOKENS: &[&str] = &[
    "logo",
    "icon",
    "sprite",
    "placeholder",
    "noimage",
    "no-image",
    "no_image",
    "spacer",
    "banner",
    "avatar",
];
const POSITIVE_URL_TOKENS: &[&str] = &[
    "product", "hero", "main", "media", "large", "zoom", "gallery", "/pi/", "upload",
];
const POSITIVE_ATTR_TOKENS: &[&str] = &["product", "hero", "main", "primary", "gallery"];
const NEGATIVE_ATTR_TOKENS: &[&str] = &["logo", "icon", "placeholder", "banner", "sprite", "thumb"];

static SCRIPT_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^"'\s)]+?\.(?:jpe?g|png|webp)"#).unwrap());

/// Product image cascade: JSON-LD image, then meta candidates, then a
/// scored scan over every `<img>`, then absolute URLs buried in scripts.
pub(crate) fn extract_image_url(
    product: &Value,
    doc: &Html,
    title: &str,
    base_url: &str,
) -> Option<String> {
    if let Some(image) = json_ld_image(product) {
        return Some(resolve(base_url, &image));
    }

    let mut meta_candidates: Vec<String> = Vec::new();
    meta_candidates.extend(meta_contents(doc, "property", "og:image"));
    meta_candidates.extend(meta_contents(doc, "name", "twitter:image"));
    meta_candidates.extend(meta_contents(doc, "name", "twitter:image:src"));
    meta_candidates.extend(meta_contents(doc, "itemprop", "image"));
    if let Some(candidate) = meta_candidates.iter().find(|candidate| {
        let lowered = candidate.to_lowercase();
        !NEGATIVE_TOKENS.iter().any(|token| lowered.contains(token))
    }) {
        return Some(resolve(base_url, candidate));
    }

    if let Some(scored) = best_scored_img(doc, title) {
        return Some(resolve(base_url, &scored));
    }

    script_image(doc)
}

fn json_ld_image(product: &Value) -> Option<String> {
    let image = product.get("image")?;
    match image {
        Value::Array(items) => match items.first()? {
            Value::Object(item) => item.get("url").and_then(as_text),
            other => as_text(other),
        },
        Value::Object(item) => item.get("url").and_then(as_text),
        other => as_text(other),
    }
}

fn best_scored_img(doc: &Html, title: &str) -> Option<String> {
    let selector = Selector::parse("img").unwrap();
    let title_tokens: Vec<String> = normalize_text(title)
        .split_whitespace()
        .map(|token| token.to_string())
        .collect();

    let mut best: Option<(i32, String)> = None;
    for img in doc.select(&selector) {
        let source = img
            .value()
            .attr("data-src")
            .or_else(|| img.value().attr("src"))
            .unwrap_or("")
            .trim();
        if source.is_empty() {
            continue;
        }

        let mut score = 0i32;
        let url_lower = source.to_lowercase();
        let path = url_lower.split(['?', '#']).next().unwrap_or(&url_lower);

        if NEGATIVE_TOKENS.iter().any(|token| url_lower.contains(token)) {
            score -= 4;
        }
        if POSITIVE_URL_TOKENS.iter().any(|token| url_lower.contains(token)) {
            score += 2;
        }
        if path.ends_with(".svg") || path.ends_with(".gif") {
            score -= 3;
        }
        if [".jpg", ".jpeg", ".png", ".webp"]
            .iter()
            .any(|suffix| path.ends_with(suffix))
        {
            score += 1;
        }

        let attr_text = format!(
            "{} {}",
            img.value().attr("class").unwrap_or(""),
            img.value().attr("id").unwrap_or("")
        )
        .to_lowercase();
        if POSITIVE_ATTR_TOKENS.iter().any(|token| attr_text.contains(token)) {
            score += 2;
        }
        if NEGATIVE_ATTR_TOKENS.iter().any(|token| attr_text.contains(token)) {
            score -= 3;
        }

        let alt_tokens = normalize_text(img.value().attr("alt").unwrap_or(""));
        let overlap = title_tokens
            .iter()
            .filter(|token| alt_tokens.split_whitespace().any(|alt| alt == token.as_str()))
            .count();
        score += overlap.min(4) as i32;

        if score > 0 && best.as_ref().is_none_or(|(top, _)| score > *top) {
            best = Some((score, source.to_string()));
        }
    }

    best.map(|(_, source)| source)
}

fn script_image(doc: &Html) -> Option<String> {
    let selector = Selector::parse("script").unwrap();
    for script in doc.select(&selector) {
        let text: String = script.text().collect::<String>().replace("\\/", "/");
        if let Some(found) = SCRIPT_IMAGE_RE.find(&text) {
            let candidate = found.as_str().to_lowercase();
            if NEGATIVE_TOKENS.iter().any(|token| candidate.contains(token)) {
                continue;
            }
            return Some(found.as_str().to_string());
        }
    }
    None
}

fn resolve(base_url: &str, candidate: &str) -> String {
    match Url::parse(base_url).and_then(|base| base.join(candidate)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => candidate.to_string(),
    }
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
