use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use common::attrs::{AttrMap, set_attr_default};
use common::normalize::normalize_identifier;
use common::records::{
    FixtureDocument, FixtureItem, NormalizedListing, PageStub, RawDetail, RawListing,
};
use common::vertical::{Vertical, VerticalSource};

use crate::adapter::SourceAdapter;
use crate::errors::AdapterError;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"))
}

/// Offline adapter reading a bundled JSON dataset. Used directly in
/// fixture mode and as the fallback when live discovery comes up empty.
pub struct FixtureAdapter {
    slug: String,
    vertical: Vertical,
    fixture_path: PathBuf,
}

impl FixtureAdapter {
    pub fn new(slug: &str, vertical: Vertical, fixture_name: &str) -> Self {
        Self {
            slug: slug.to_string(),
            vertical,
            fixture_path: fixtures_dir().join(fixture_name),
        }
    }

    pub fn load(&self) -> Result<FixtureDocument, AdapterError> {
        let path = self.fixture_path.display().to_string();
        let raw = std::fs::read_to_string(&self.fixture_path).map_err(|err| {
            AdapterError::Fixture {
                path: path.clone(),
                reason: err.to_string(),
            }
        })?;
        serde_json::from_str(&raw).map_err(|err| AdapterError::Fixture {
            path,
            reason: err.to_string(),
        })
    }

    pub fn item_for(&self, source_product_id: &str) -> Result<FixtureItem, AdapterError> {
        self.load()?
            .items
            .into_iter()
            .find(|item| item.source_product_id == source_product_id)
            .ok_or_else(|| AdapterError::FixtureItemMissing {
                source_product_id: source_product_id.to_string(),
            })
    }

    pub(crate) fn listing_from_item(item: &FixtureItem) -> RawListing {
        RawListing {
            source_product_id: item.source_product_id.clone(),
            title: item.title.clone(),
            url: item.url.clone(),
            image_url: item.image_url.clone(),
            category: item.category.clone(),
            brand: item.brand.clone(),
            availability: item.availability.clone(),
        }
    }

    pub(crate) fn detail_from_item(item: &FixtureItem) -> RawDetail {
        RawDetail {
            gtin: item.gtin.clone(),
            mpn: item.mpn.clone(),
            model_number: item.model_number.clone(),
            attributes: item.attributes.clone(),
            price_nzd: item.price_nzd,
            promo_price_nzd: item.promo_price_nzd,
            promo_text: item.promo_text.clone(),
            discount_pct: item.discount_pct,
            captured_at: Utc::now(),
        }
    }
}

#[async_trait]
impl SourceAdapter for FixtureAdapter {
    fn retailer_slug(&self) -> &str {
        &self.slug
    }

    fn vertical(&self) -> Vertical {
        self.vertical
    }

    async fn list_pages(&mut self) -> Result<Vec<PageStub>, AdapterError> {
        let document = self.load()?;
        Ok(vec![PageStub::Fixture {
            items: document.items,
        }])
    }

    async fn parse_listing(&mut self, page: &PageStub) -> Result<Vec<RawListing>, AdapterError> {
        match page {
            PageStub::Fixture { items } => {
                Ok(items.iter().map(Self::listing_from_item).collect())
            }
            PageStub::Live { url, .. } => Err(AdapterError::NonProduct { url: url.clone() }),
        }
    }

    async fn fetch_detail(&mut self, listing: &RawListing) -> Result<RawDetail, AdapterError> {
        let item = self.item_for(&listing.source_product_id)?;
        Ok(Self::detail_from_item(&item))
    }

    fn normalize(
        &self,
        listing: &RawListing,
        detail: &RawDetail,
    ) -> Result<NormalizedListing, AdapterError> {
        let model_number = normalize_identifier(detail.model_number.as_deref());
        let gtin = normalize_identifier(detail.gtin.as_deref());
        let mpn = normalize_identifier(detail.mpn.as_deref());

        let mut merged_attributes: AttrMap = detail.attributes.clone();
        if let Some(model_number) = &model_number {
            set_attr_default(
                &mut merged_attributes,
                "model_number",
                serde_json::Value::String(model_number.clone()),
            );
        }

        Ok(NormalizedListing {
            vertical: self.vertical,
            vertical_source: VerticalSource::AdapterDefault,
            vertical_confidence: 0.55,
            source_product_id: listing.source_product_id.clone(),
            title: listing.title.trim().to_string(),
            url: listing.url.clone(),
            image_url: listing.image_url.clone(),
            canonical_name: listing.title.trim().to_string(),
            brand: listing.brand.trim().to_string(),
            category: listing.category.trim().to_lowercase(),
            model_number,
            gtin,
            mpn,
            attributes: merged_attributes,
            raw_attributes: detail.attributes.clone(),
            availability: listing.availability.clone(),
            price_nzd: detail.price_nzd,
            promo_price_nzd: detail.promo_price_nzd,
            promo_text: detail.promo_text.clone(),
            discount_pct: detail.discount_pct,
            captured_at: detail.captured_at,
        })
    }
}
