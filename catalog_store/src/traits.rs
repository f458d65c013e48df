use async_trait::async_trait;

use common::entities::{
    CanonicalProduct, IngestionRun, LatestPrice, PriceObservation, ProductOverride, Retailer,
    RetailerListing,
};
use common::vertical::Vertical;

use crate::errors::StoreError;

/// Storage seam between the ingestion core and its backend. The matching
/// engine and pipeline only ever see this trait; the memory implementation
/// backs the test-suites and the MongoDB implementation backs production.
///
/// Writes within one run are sequential, and the matcher reads through the
/// same store instance, so it observes in-run writes.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // retailers (seeded externally; the core only reads them)
    async fn insert_retailer(&self, retailer: &Retailer) -> Result<(), StoreError>;
    async fn retailer_by_slug(&self, slug: &str) -> Result<Option<Retailer>, StoreError>;

    // canonical products
    async fn canonical_by_id(&self, id: &str) -> Result<Option<CanonicalProduct>, StoreError>;
    async fn canonical_by_gtin(
        &self,
        vertical: Vertical,
        gtin: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError>;
    /// Brand is compared case-insensitively; `identifier` matches either the
    /// canonical's MPN or its model number.
    async fn canonical_by_model(
        &self,
        vertical: Vertical,
        brand: &str,
        identifier: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError>;
    /// Up to `limit` canonicals sharing (vertical, brand, category), brand
    /// and category compared case-insensitively, in insertion order.
    async fn canonicals_by_shelf(
        &self,
        vertical: Vertical,
        brand: &str,
        category: &str,
        limit: usize,
    ) -> Result<Vec<CanonicalProduct>, StoreError>;
    async fn all_canonicals(&self) -> Result<Vec<CanonicalProduct>, StoreError>;
    async fn insert_canonical(&self, product: &CanonicalProduct) -> Result<(), StoreError>;
    async fn update_canonical(&self, product: &CanonicalProduct) -> Result<(), StoreError>;

    // manual overrides (written by admin tooling; the matcher reads them)
    async fn insert_override(&self, mapping: &ProductOverride) -> Result<(), StoreError>;
    async fn override_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<ProductOverride>, StoreError>;

    // retailer listings, unique per (retailer_id, source_product_id)
    async fn listing_by_source(
        &self,
        retailer_id: i64,
        source_product_id: &str,
    ) -> Result<Option<RetailerListing>, StoreError>;
    async fn listings_for_canonical(
        &self,
        product_id: &str,
    ) -> Result<Vec<RetailerListing>, StoreError>;
    async fn insert_listing(&self, listing: &RetailerListing) -> Result<(), StoreError>;
    async fn update_listing(&self, listing: &RetailerListing) -> Result<(), StoreError>;
    /// Removes the listing together with its price observations and latest
    /// price (cascade).
    async fn delete_listing(&self, id: &str) -> Result<(), StoreError>;

    // price history
    async fn insert_price_observation(
        &self,
        observation: &PriceObservation,
    ) -> Result<(), StoreError>;
    async fn prices_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Vec<PriceObservation>, StoreError>;
    async fn upsert_latest_price(&self, latest: &LatestPrice) -> Result<(), StoreError>;
    async fn latest_price(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<LatestPrice>, StoreError>;

    // ingestion runs
    async fn insert_run(&self, run: &IngestionRun) -> Result<(), StoreError>;
    async fn update_run(&self, run: &IngestionRun) -> Result<(), StoreError>;
}
