use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use common::entities::{
    CanonicalProduct, IngestionRun, LatestPrice, PriceObservation, ProductOverride, Retailer,
    RetailerListing,
};
use common::vertical::Vertical;

use crate::errors::StoreError;
use crate::traits::CatalogStore;

#[derive(Default)]
struct Inner {
    retailers: Vec<Retailer>,
    canonicals: Vec<CanonicalProduct>,
    listings: Vec<RetailerListing>,
    overrides: Vec<ProductOverride>,
    prices: Vec<PriceObservation>,
    latest: HashMap<String, LatestPrice>,
    runs: Vec<IngestionRun>,
}

/// In-memory catalog store. Backs the test-suites and local dry-runs with
/// the same semantics the MongoDB store provides, insertion-ordered.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_retailer(&self, retailer: &Retailer) -> Result<(), StoreError> {
        self.inner.lock().unwrap().retailers.push(retailer.clone());
        Ok(())
    }

    async fn retailer_by_slug(&self, slug: &str) -> Result<Option<Retailer>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.retailers.iter().find(|r| r.slug == slug).cloned())
    }

    async fn canonical_by_id(&self, id: &str) -> Result<Option<CanonicalProduct>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.canonicals.iter().find(|p| p.id == id).cloned())
    }

    async fn canonical_by_gtin(
        &self,
        vertical: Vertical,
        gtin: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .canonicals
            .iter()
            .find(|p| p.vertical == vertical && p.gtin.as_deref() == Some(gtin))
            .cloned())
    }

    async fn canonical_by_model(
        &self,
        vertical: Vertical,
        brand: &str,
        identifier: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError> {
        let brand_lower = brand.to_lowercase();
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .canonicals
            .iter()
            .find(|p| {
                p.vertical == vertical
                    && p.brand.to_lowercase() == brand_lower
                    && (p.mpn.as_deref() == Some(identifier)
                        || p.model_number.as_deref() == Some(identifier))
            })
            .cloned())
    }

    async fn canonicals_by_shelf(
        &self,
        vertical: Vertical,
        brand: &str,
        category: &str,
        limit: usize,
    ) -> Result<Vec<CanonicalProduct>, StoreError> {
        let brand_lower = brand.to_lowercase();
        let category_lower = category.to_lowercase();
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .canonicals
            .iter()
            .filter(|p| {
                p.vertical == vertical
                    && p.brand.to_lowercase() == brand_lower
                    && p.category.to_lowercase() == category_lower
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn all_canonicals(&self) -> Result<Vec<CanonicalProduct>, StoreError> {
        Ok(self.inner.lock().unwrap().canonicals.clone())
    }

    async fn insert_canonical(&self, product: &CanonicalProduct) -> Result<(), StoreError> {
        self.inner.lock().unwrap().canonicals.push(product.clone());
        Ok(())
    }

    async fn update_canonical(&self, product: &CanonicalProduct) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(slot) = inner.canonicals.iter_mut().find(|p| p.id == product.id) else {
            return Err(StoreError::UnknownId {
                entity: "canonical product",
                id: product.id.clone(),
            });
        };
        *slot = product.clone();
        Ok(())
    }

    async fn insert_override(&self, mapping: &ProductOverride) -> Result<(), StoreError> {
        self.inner.lock().unwrap().overrides.push(mapping.clone());
        Ok(())
    }

    async fn override_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<ProductOverride>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .overrides
            .iter()
            .find(|o| o.retailer_listing_id == retailer_listing_id)
            .cloned())
    }

    async fn listing_by_source(
        &self,
        retailer_id: i64,
        source_product_id: &str,
    ) -> Result<Option<RetailerListing>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .listings
            .iter()
            .find(|l| l.retailer_id == retailer_id && l.source_product_id == source_product_id)
            .cloned())
    }

    async fn listings_for_canonical(
        &self,
        product_id: &str,
    ) -> Result<Vec<RetailerListing>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .listings
            .iter()
            .filter(|l| l.product_id.as_deref() == Some(product_id))
            .cloned()
            .collect())
    }

    async fn insert_listing(&self, listing: &RetailerListing) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let duplicate = inner.listings.iter().any(|l| {
            l.retailer_id == listing.retailer_id
                && l.source_product_id == listing.source_product_id
        });
        if duplicate {
            return Err(StoreError::DuplicateListing {
                retailer_id: listing.retailer_id,
                source_product_id: listing.source_product_id.clone(),
            });
        }
        inner.listings.push(listing.clone());
        Ok(())
    }

    async fn update_listing(&self, listing: &RetailerListing) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(slot) = inner.listings.iter_mut().find(|l| l.id == listing.id) else {
            return Err(StoreError::UnknownId {
                entity: "retailer listing",
                id: listing.id.clone(),
            });
        };
        *slot = listing.clone();
        Ok(())
    }

    async fn delete_listing(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.listings.retain(|l| l.id != id);
        inner.prices.retain(|p| p.retailer_listing_id != id);
        inner.latest.remove(id);
        Ok(())
    }

    async fn insert_price_observation(
        &self,
        observation: &PriceObservation,
    ) -> Result<(), StoreError> {
        self.inner.lock().unwrap().prices.push(observation.clone());
        Ok(())
    }

    async fn prices_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Vec<PriceObservation>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .prices
            .iter()
            .filter(|p| p.retailer_listing_id == retailer_listing_id)
            .cloned()
            .collect())
    }

    async fn upsert_latest_price(&self, latest: &LatestPrice) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .latest
            .insert(latest.retailer_listing_id.clone(), latest.clone());
        Ok(())
    }

    async fn latest_price(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<LatestPrice>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.latest.get(retailer_listing_id).cloned())
    }

    async fn insert_run(&self, run: &IngestionRun) -> Result<(), StoreError> {
        self.inner.lock().unwrap().runs.push(run.clone());
        Ok(())
    }

    async fn update_run(&self, run: &IngestionRun) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(slot) = inner.runs.iter_mut().find(|r| r.id == run.id) else {
            return Err(StoreError::UnknownId {
                entity: "ingestion run",
                id: run.id.clone(),
            });
        };
        *slot = run.clone();
        Ok(())
    }
}
