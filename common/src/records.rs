use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attrs::AttrMap;
use crate::vertical::{Vertical, VerticalSource};

/// One unit of work produced by `list_pages`: either a live product URL or
/// a fixture document carrying the whole dataset inline.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PageStub {
    Live {
        url: String,
        source_product_id: String,
    },
    Fixture {
        items: Vec<FixtureItem>,
    },
}

/// One entry in a retailer fixture file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FixtureItem {
    pub source_product_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub gtin: Option<String>,
    #[serde(default)]
    pub mpn: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub attributes: AttrMap,
    pub price_nzd: f64,
    #[serde(default)]
    pub promo_price_nzd: Option<f64>,
    #[serde(default)]
    pub promo_text: Option<String>,
    #[serde(default)]
    pub discount_pct: Option<f64>,
}

/// A retailer fixture file: `{ "items": [...] }`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FixtureDocument {
    pub items: Vec<FixtureItem>,
}

/// Listing-level facts extracted from one product page.
#[derive(Clone, Debug)]
pub struct RawListing {
    pub source_product_id: String,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub category: String,
    pub brand: String,
    pub availability: Option<String>,
}

/// Detail-level facts: identifiers, attributes, prices.
#[derive(Clone, Debug)]
pub struct RawDetail {
    pub gtin: Option<String>,
    pub mpn: Option<String>,
    pub model_number: Option<String>,
    pub attributes: AttrMap,
    pub price_nzd: f64,
    pub promo_price_nzd: Option<f64>,
    pub promo_text: Option<String>,
    pub discount_pct: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

/// The record handed to the matching engine and the pipeline: identifiers
/// canonicalized, per-vertical attributes derived, vertical re-inferred.
#[derive(Clone, Debug)]
pub struct NormalizedListing {
    pub vertical: Vertical,
    pub vertical_source: VerticalSource,
    pub vertical_confidence: f64,
    pub source_product_id: String,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub canonical_name: String,
    pub brand: String,
    pub category: String,
    pub model_number: Option<String>,
    pub gtin: Option<String>,
    pub mpn: Option<String>,
    pub attributes: AttrMap,
    pub raw_attributes: AttrMap,
    pub availability: Option<String>,
    pub price_nzd: f64,
    pub promo_price_nzd: Option<f64>,
    pub promo_text: Option<String>,
    pub discount_pct: Option<f64>,
    pub captured_at: DateTime<Utc>,
}
