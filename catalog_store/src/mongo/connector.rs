use async_trait::async_trait;
use mongodb::Client;
use tracing::info;

use common::entities::{
    CanonicalProduct, IngestionRun, LatestPrice, PriceObservation, ProductOverride, Retailer,
    RetailerListing,
};
use common::vertical::Vertical;

use crate::errors::StoreError;
use crate::mongo::collections::canonical_products::CanonicalProducts;
use crate::mongo::collections::ingestion_runs::IngestionRuns;
use crate::mongo::collections::latest_prices::LatestPrices;
use crate::mongo::collections::price_observations::PriceObservations;
use crate::mongo::collections::product_overrides::ProductOverrides;
use crate::mongo::collections::retailer_listings::RetailerListings;
use crate::mongo::collections::retailers::Retailers;
use crate::traits::CatalogStore;

pub const DEFAULT_CONNECTION_URI: &str = "mongodb://localhost:27017";
pub const DATABASE_NAME: &str = "pricelens";

/// MongoDB-backed catalog store. Collections and indexes are created up
/// front so the matcher's lookups stay indexed from the first run.
pub struct MongoStore {
    retailers: Retailers,
    canonical_products: CanonicalProducts,
    retailer_listings: RetailerListings,
    price_observations: PriceObservations,
    latest_prices: LatestPrices,
    ingestion_runs: IngestionRuns,
    product_overrides: ProductOverrides,
}

impl MongoStore {
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(DATABASE_NAME);

        info!(database = DATABASE_NAME, "connecting catalog store");

        Ok(Self {
            retailers: Retailers::new(&db).await?,
            canonical_products: CanonicalProducts::new(&db).await?,
            retailer_listings: RetailerListings::new(&db).await?,
            price_observations: PriceObservations::new(&db).await?,
            latest_prices: LatestPrices::new(&db).await?,
            ingestion_runs: IngestionRuns::new(&db).await?,
            product_overrides: ProductOverrides::new(&db).await?,
        })
    }
}

#[async_trait]
impl CatalogStore for MongoStore {
    async fn insert_retailer(&self, retailer: &Retailer) -> Result<(), StoreError> {
        self.retailers.insert(retailer).await
    }

    async fn retailer_by_slug(&self, slug: &str) -> Result<Option<Retailer>, StoreError> {
        self.retailers.by_slug(slug).await
    }

    async fn canonical_by_id(&self, id: &str) -> Result<Option<CanonicalProduct>, StoreError> {
        self.canonical_products.by_id(id).await
    }

    async fn canonical_by_gtin(
        &self,
        vertical: Vertical,
        gtin: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError> {
        self.canonical_products.by_gtin(vertical, gtin).await
    }

    async fn canonical_by_model(
        &self,
        vertical: Vertical,
        brand: &str,
        identifier: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError> {
        self.canonical_products
            .by_model(vertical, brand, identifier)
            .await
    }

    async fn canonicals_by_shelf(
        &self,
        vertical: Vertical,
        brand: &str,
        category: &str,
        limit: usize,
    ) -> Result<Vec<CanonicalProduct>, StoreError> {
        self.canonical_products
            .by_shelf(vertical, brand, category, limit)
            .await
    }

    async fn all_canonicals(&self) -> Result<Vec<CanonicalProduct>, StoreError> {
        self.canonical_products.all().await
    }

    async fn insert_canonical(&self, product: &CanonicalProduct) -> Result<(), StoreError> {
        self.canonical_products.insert(product).await
    }

    async fn update_canonical(&self, product: &CanonicalProduct) -> Result<(), StoreError> {
        self.canonical_products.replace(product).await
    }

    async fn insert_override(&self, mapping: &ProductOverride) -> Result<(), StoreError> {
        self.product_overrides.insert(mapping).await
    }

    async fn override_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<ProductOverride>, StoreError> {
        self.product_overrides.for_listing(retailer_listing_id).await
    }

    async fn listing_by_source(
        &self,
        retailer_id: i64,
        source_product_id: &str,
    ) -> Result<Option<RetailerListing>, StoreError> {
        self.retailer_listings
            .by_source(retailer_id, source_product_id)
            .await
    }

    async fn listings_for_canonical(
        &self,
        product_id: &str,
    ) -> Result<Vec<RetailerListing>, StoreError> {
        self.retailer_listings.for_canonical(product_id).await
    }

    async fn insert_listing(&self, listing: &RetailerListing) -> Result<(), StoreError> {
        self.retailer_listings.insert(listing).await
    }

    async fn update_listing(&self, listing: &RetailerListing) -> Result<(), StoreError> {
        self.retailer_listings.replace(listing).await
    }

    async fn delete_listing(&self, id: &str) -> Result<(), StoreError> {
        // cascade: the listing owns its price history and projection
        self.price_observations.delete_for_listing(id).await?;
        self.latest_prices.delete_for_listing(id).await?;
        self.retailer_listings.delete(id).await
    }

    async fn insert_price_observation(
        &self,
        observation: &PriceObservation,
    ) -> Result<(), StoreError> {
        self.price_observations.insert(observation).await
    }

    async fn prices_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Vec<PriceObservation>, StoreError> {
        self.price_observations.for_listing(retailer_listing_id).await
    }

    async fn upsert_latest_price(&self, latest: &LatestPrice) -> Result<(), StoreError> {
        self.latest_prices.upsert(latest).await
    }

    async fn latest_price(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<LatestPrice>, StoreError> {
        self.latest_prices.for_listing(retailer_listing_id).await
    }

    async fn insert_run(&self, run: &IngestionRun) -> Result<(), StoreError> {
        self.ingestion_runs.insert(run).await
    }

    async fn update_run(&self, run: &IngestionRun) -> Result<(), StoreError> {
        self.ingestion_runs.replace(run).await
    }
}
