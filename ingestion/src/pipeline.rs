use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use catalog_store::errors::StoreError;
use catalog_store::traits::CatalogStore;
use common::attrs::merge_attributes;
use common::entities::{
    CanonicalProduct, IngestionRun, LatestPrice, PriceObservation, RetailerListing, RunStatus,
};
use common::records::{NormalizedListing, RawListing};
use common::utils::{new_id, utc_now};
use matching::MatchingEngine;
use retailers::adapter::SourceAdapter;
use retailers::errors::AdapterError;

use crate::searchable_text::build_searchable_text;

/// Brand/category values treated as "nothing useful recorded yet".
const PLACEHOLDER_VALUES: &[&str] = &["unknown", "generic", "other"];
const ERROR_SUMMARY_LIMIT: usize = 500;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("retailer {slug} not found")]
    UnknownRetailer { slug: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
enum ItemError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives one ingestion run for one retailer: discover pages, parse,
/// normalize, match, upsert. Per-item failures increment a counter and
/// never terminate the run; adapter-level failures fail the whole run but
/// the IngestionRun row is always finalized.
pub struct IngestionPipeline<'a> {
    store: &'a dyn CatalogStore,
    adapter: Box<dyn SourceAdapter>,
    cancel: Arc<AtomicBool>,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(store: &'a dyn CatalogStore, adapter: Box<dyn SourceAdapter>) -> Self {
        Self {
            store,
            adapter,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cooperative cancellation, honored at page and listing boundaries.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub async fn run(&mut self) -> Result<IngestionRun, PipelineError> {
        let slug = self.adapter.retailer_slug().to_string();
        let Some(retailer) = self.store.retailer_by_slug(&slug).await? else {
            return Err(PipelineError::UnknownRetailer { slug });
        };

        let mut run = IngestionRun::start(retailer.id);
        self.store.insert_run(&run).await?;
        info!(slug = %slug, run_id = %run.id, "ingestion run started");

        match self.execute(retailer.id, &mut run).await {
            Ok(()) if self.cancel.load(Ordering::Relaxed) => {
                run.status = RunStatus::Failed;
                run.error_summary = Some("run cancelled before completion".to_string());
            }
            Ok(()) => run.status = RunStatus::Completed,
            Err(error) => {
                run.status = RunStatus::Failed;
                run.error_summary = Some(truncate(&error.to_string()));
            }
        }

        run.used_fixture_fallback = self.adapter.used_fixture_fallback();
        run.finished_at = Some(utc_now());
        self.store.update_run(&run).await?;

        info!(
            slug = %slug,
            run_id = %run.id,
            status = %run.status,
            total = run.items_total,
            new = run.items_new,
            updated = run.items_updated,
            failed = run.items_failed,
            "ingestion run finished"
        );
        Ok(run)
    }

    async fn execute(
        &mut self,
        retailer_id: i64,
        run: &mut IngestionRun,
    ) -> Result<(), ItemError> {
        let pages = self.adapter.list_pages().await?;

        for page in &pages {
            if self.cancel.load(Ordering::Relaxed) {
                return Ok(());
            }

            let listings = match self.adapter.parse_listing(page).await {
                Ok(listings) => listings,
                Err(error) => {
                    warn!(error = %error, "page failed to parse");
                    run.items_failed += 1;
                    continue;
                }
            };

            for listing in listings {
                if self.cancel.load(Ordering::Relaxed) {
                    return Ok(());
                }

                run.items_total += 1;
                match self.ingest_item(retailer_id, &listing).await {
                    Ok(true) => run.items_new += 1,
                    Ok(false) => run.items_updated += 1,
                    Err(error) => {
                        warn!(
                            source_product_id = %listing.source_product_id,
                            error = %error,
                            "listing failed to ingest"
                        );
                        run.items_failed += 1;
                    }
                }
            }
        }

        Ok(())
    }

    /// One item end-to-end. Returns true when a new retailer listing was
    /// created, false when an existing one was updated.
    async fn ingest_item(
        &mut self,
        retailer_id: i64,
        listing: &RawListing,
    ) -> Result<bool, ItemError> {
        let detail = self.adapter.fetch_detail(listing).await?;
        let normalized = self.adapter.normalize(listing, &detail)?;

        let existing_listing = self
            .store
            .listing_by_source(retailer_id, &normalized.source_product_id)
            .await?;

        let matcher = MatchingEngine::new(self.store);
        let outcome = matcher
            .match_listing(&normalized, existing_listing.as_ref().map(|row| row.id.as_str()))
            .await?;
        debug!(
            source_product_id = %normalized.source_product_id,
            tier = %outcome.tier,
            score = outcome.score,
            "match decision"
        );

        let product_id = match &outcome.product_id {
            Some(id) => match self.store.canonical_by_id(id).await? {
                Some(existing) => {
                    let merged = merge_canonical(existing, &normalized);
                    self.store.update_canonical(&merged).await?;
                    merged.id
                }
                None => self.create_canonical(&normalized).await?,
            },
            None => self.create_canonical(&normalized).await?,
        };

        let (listing_id, is_new) = match existing_listing {
            Some(mut row) => {
                row.product_id = Some(product_id.clone());
                row.title = normalized.title.clone();
                row.url = normalized.url.clone();
                row.image_url = normalized.image_url.clone();
                row.raw_attributes = normalized.raw_attributes.clone();
                row.availability = normalized.availability.clone();
                row.updated_at = utc_now();
                self.store.update_listing(&row).await?;
                (row.id, false)
            }
            None => {
                let now = utc_now();
                let row = RetailerListing {
                    id: new_id(),
                    retailer_id,
                    product_id: Some(product_id.clone()),
                    source_product_id: normalized.source_product_id.clone(),
                    title: normalized.title.clone(),
                    url: normalized.url.clone(),
                    image_url: normalized.image_url.clone(),
                    raw_attributes: normalized.raw_attributes.clone(),
                    availability: normalized.availability.clone(),
                    created_at: now,
                    updated_at: now,
                };
                self.store.insert_listing(&row).await?;
                (row.id, true)
            }
        };

        self.store
            .insert_price_observation(&PriceObservation {
                id: new_id(),
                retailer_listing_id: listing_id.clone(),
                price_nzd: normalized.price_nzd,
                promo_price_nzd: normalized.promo_price_nzd,
                promo_text: normalized.promo_text.clone(),
                discount_pct: normalized.discount_pct,
                captured_at: normalized.captured_at,
            })
            .await?;

        self.store
            .upsert_latest_price(&LatestPrice {
                retailer_listing_id: listing_id,
                price_nzd: normalized.price_nzd,
                promo_price_nzd: normalized.promo_price_nzd,
                promo_text: normalized.promo_text.clone(),
                discount_pct: normalized.discount_pct,
                captured_at: normalized.captured_at,
            })
            .await?;

        Ok(is_new)
    }

    async fn create_canonical(
        &self,
        normalized: &NormalizedListing,
    ) -> Result<String, StoreError> {
        let merged_attributes =
            merge_attributes(&normalized.attributes, &normalized.raw_attributes);

        let mut product = CanonicalProduct::new(
            normalized.canonical_name.clone(),
            normalized.vertical,
            normalized.brand.clone(),
            normalized.category.clone(),
        );
        product.model_number = normalized.model_number.clone();
        product.gtin = normalized.gtin.clone();
        product.mpn = normalized.mpn.clone();
        product.image_url = normalized.image_url.clone();
        product.searchable_text = build_searchable_text(
            normalized,
            &merged_attributes,
            &normalized.raw_attributes,
            "",
        );
        product.attributes = merged_attributes;

        self.store.insert_canonical(&product).await?;
        Ok(product.id)
    }
}

/// Folds a listing into an existing canonical: identifiers fill
/// monotonically, placeholder brand/category get replaced, attributes
/// merge first-write-wins, and the vertical only moves through the
/// confidence gate.
fn merge_canonical(
    mut product: CanonicalProduct,
    normalized: &NormalizedListing,
) -> CanonicalProduct {
    if product.image_url.as_deref().unwrap_or("").is_empty() {
        product.image_url = normalized.image_url.clone();
    }
    if product.model_number.as_deref().unwrap_or("").is_empty() {
        product.model_number = normalized.model_number.clone();
    }
    if product.gtin.as_deref().unwrap_or("").is_empty() {
        product.gtin = normalized.gtin.clone();
    }
    if product.mpn.as_deref().unwrap_or("").is_empty() {
        product.mpn = normalized.mpn.clone();
    }

    if !normalized.brand.is_empty() && is_placeholder(&product.brand) {
        product.brand = normalized.brand.clone();
    }
    if !normalized.category.is_empty() && is_placeholder(&product.category) {
        product.category = normalized.category.clone();
    }

    if product.vertical != normalized.vertical && should_transition_vertical(normalized) {
        product.vertical = normalized.vertical;
    }

    let merged = merge_attributes(&product.attributes, &normalized.attributes);
    product.attributes = merge_attributes(&merged, &normalized.raw_attributes);
    product.searchable_text = build_searchable_text(
        normalized,
        &product.attributes,
        &normalized.raw_attributes,
        &product.searchable_text,
    );
    product.updated_at = utc_now();
    product
}

fn is_placeholder(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    lowered.is_empty() || PLACEHOLDER_VALUES.contains(&lowered.as_str())
}

/// Low-confidence vertical flapping is worse than a stale vertical, so a
/// canonical only moves when the evidence is strong.
fn should_transition_vertical(normalized: &NormalizedListing) -> bool {
    if normalized.vertical_confidence >= 0.93 {
        return true;
    }
    normalized.vertical_source.is_structured() && normalized.vertical_confidence >= 0.88
}

fn truncate(text: &str) -> String {
    if text.len() <= ERROR_SUMMARY_LIMIT {
        return text.to_string();
    }
    let mut cut = ERROR_SUMMARY_LIMIT;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text[..cut].to_string()
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
