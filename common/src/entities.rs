use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::attrs::AttrMap;
use crate::utils::{new_id, utc_now};
use crate::vertical::Vertical;

/// A scraped source. Seeded externally; the ingestion core never creates
/// retailers, it only looks them up by slug.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Retailer {
    pub id: i64,
    pub slug: String,
    pub display_name: String,
    pub vertical: Vertical,
    pub active: bool,
}

/// One row per distinct physical product, deduplicated across retailers.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CanonicalProduct {
    pub id: String,
    pub canonical_name: String,
    pub vertical: Vertical,
    pub brand: String,
    pub category: String,
    pub model_number: Option<String>,
    pub gtin: Option<String>,
    pub mpn: Option<String>,
    pub image_url: Option<String>,
    pub attributes: AttrMap,
    pub searchable_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CanonicalProduct {
    pub fn new(
        canonical_name: String,
        vertical: Vertical,
        brand: String,
        category: String,
    ) -> Self {
        let now = utc_now();
        Self {
            id: new_id(),
            canonical_name,
            vertical,
            brand,
            category,
            model_number: None,
            gtin: None,
            mpn: None,
            image_url: None,
            attributes: AttrMap::new(),
            searchable_text: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A retailer's specific offer. Unique per (retailer, source_product_id);
/// may be re-bound to a different canonical across runs.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RetailerListing {
    pub id: String,
    pub retailer_id: i64,
    pub product_id: Option<String>,
    pub source_product_id: String,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub raw_attributes: AttrMap,
    pub availability: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only price history row. Immutable once inserted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PriceObservation {
    pub id: String,
    pub retailer_listing_id: String,
    pub price_nzd: f64,
    pub promo_price_nzd: Option<f64>,
    pub promo_text: Option<String>,
    pub discount_pct: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

/// Projection of the most recent PriceObservation per retailer listing.
/// Derived, not authoritative.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LatestPrice {
    pub retailer_listing_id: String,
    pub price_nzd: f64,
    pub promo_price_nzd: Option<f64>,
    pub promo_text: Option<String>,
    pub discount_pct: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Display)]
pub enum RunStatus {
    #[serde(rename = "running")]
    #[strum(serialize = "running")]
    Running,
    #[serde(rename = "completed")]
    #[strum(serialize = "completed")]
    Completed,
    #[serde(rename = "failed")]
    #[strum(serialize = "failed")]
    Failed,
}

/// One row per pipeline execution.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IngestionRun {
    pub id: String,
    pub retailer_id: i64,
    pub status: RunStatus,
    pub items_total: u64,
    pub items_new: u64,
    pub items_updated: u64,
    pub items_failed: u64,
    pub error_summary: Option<String>,
    pub used_fixture_fallback: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl IngestionRun {
    pub fn start(retailer_id: i64) -> Self {
        Self {
            id: new_id(),
            retailer_id,
            status: RunStatus::Running,
            items_total: 0,
            items_new: 0,
            items_updated: 0,
            items_failed: 0,
            error_summary: None,
            used_fixture_fallback: false,
            started_at: utc_now(),
            finished_at: None,
        }
    }
}

/// Manual listing→canonical mapping that outranks matcher output when the
/// hard-identifier tiers miss.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProductOverride {
    pub id: String,
    pub retailer_listing_id: String,
    pub product_id: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
