use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

use common::vertical::Vertical;

use crate::adapter::AdapterHooks;
use crate::config::AdapterConfig;
use crate::discovery::default_is_candidate_product_url;

pub(crate) const SLUG: &str = "apple";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.apple.com/nz", Vertical::Tech)
        .seeds(&["/nz/sitemap.xml", "/sitemap.xml"])
        .include(&["/shop/buy-", "/shop/product/"])
        .exclude(&[
            "/support",
            "/newsroom",
            "/legal",
            "/feedback/",
            "/compare/",
            "/iphone/battery",
            "/iphone/cellular",
            "/ipad/cellular",
            "?",
            "#",
        ])
        .fixture("apple.json")
}

/// `/shop/buy-<family>` leaves that are storefront landing pages rather
/// than buyable configurations.
const GENERIC_BUY_LEAVES: &[&str] = &[
    "iphone",
    "ipad",
    "mac",
    "watch",
    "airpods",
    "vision-pro",
    "apple-vision-pro",
];
const NON_PRODUCT_LEAVES: &[&str] = &["compare", "carrier-offers", "switch", "for-business"];
const MODEL_HINT_TOKENS: &[&str] = &[
    "iphone",
    "ipad",
    "macbook",
    "imac",
    "mac-mini",
    "mac-studio",
    "watch",
    "airpods",
    "vision",
    "pro",
    "max",
    "ultra",
    "mini",
];
const GENERIC_PAGE_MARKERS: &[&str] = &[
    "buying iphone",
    "buying ipad",
    "buying mac",
    "compare models",
    "compare all models",
];

static MODEL_LEAF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]{6,}$").unwrap());
static GENERIC_FAMILY_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/shop/buy-(?:iphone|ipad|mac|watch|airpods|vision)/?$").unwrap());
static GENERIC_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:iphone|ipad|mac)\s*[-|]").unwrap());

/// Apple's storefront mixes per-model buy pages with family landing pages
/// under the same URL shapes, so candidacy and non-product detection both
/// need sharper rules than the shared defaults.
pub(crate) struct AppleHooks;

impl AdapterHooks for AppleHooks {
    fn is_candidate_product_url(&self, url: &str, config: &AdapterConfig) -> bool {
        if !default_is_candidate_product_url(url, config) {
            return false;
        }

        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let path = parsed.path().to_lowercase();
        let path = path.trim_end_matches('/');

        if path.contains("/shop/product/") {
            return true;
        }
        if !path.contains("/shop/buy-") {
            return false;
        }

        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
        let Some(buy_index) = segments
            .iter()
            .position(|segment| segment.starts_with("buy-"))
        else {
            return false;
        };
        let Some(model_leaf) = segments.get(buy_index + 1) else {
            return false;
        };

        if GENERIC_BUY_LEAVES.contains(model_leaf) || NON_PRODUCT_LEAVES.contains(model_leaf) {
            return false;
        }
        if MODEL_HINT_TOKENS.iter().any(|token| model_leaf.contains(token)) {
            return true;
        }
        MODEL_LEAF_RE.is_match(model_leaf)
    }

    fn is_non_product_page(
        &self,
        url: &str,
        title: &str,
        body_excerpt: &str,
        _ld_product: &Value,
    ) -> bool {
        let path = Url::parse(url)
            .map(|parsed| parsed.path().to_lowercase())
            .unwrap_or_default();
        let path = path.trim_end_matches('/');

        if GENERIC_FAMILY_PATH_RE.is_match(path) {
            return true;
        }
        if ["/iphone", "/ipad", "/mac"]
            .iter()
            .any(|family| path == *family || path.ends_with(family))
        {
            return true;
        }

        let page_text = format!("{title} {body_excerpt}").to_lowercase();
        if GENERIC_PAGE_MARKERS.iter().any(|marker| page_text.contains(marker)) {
            return true;
        }

        let lowered_title = title.to_lowercase();
        GENERIC_TITLE_RE.is_match(title)
            && !lowered_title.contains("pro")
            && !lowered_title.contains("max")
    }
}

#[cfg(test)]
#[path = "apple_test.rs"]
mod tests;
