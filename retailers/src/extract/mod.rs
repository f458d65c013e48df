pub(crate) mod attributes;
pub(crate) mod category;
pub(crate) mod enrich;
pub(crate) mod image;
pub(crate) mod json_ld;
pub(crate) mod meta;
pub(crate) mod price;

use scraper::Html;

use common::attrs::AttrMap;
use common::price::discount_pct;
use common::vertical::CategorySource;

use crate::adapter::AdapterHooks;
use crate::config::AdapterConfig;
use crate::errors::AdapterError;
use crate::extract::attributes::harvest_attributes;
use crate::extract::category::{contains_rx_exclusion, normalize_category};
use crate::extract::image::extract_image_url;
use crate::extract::json_ld::{
    as_text, extract_availability, extract_brand, extract_breadcrumb_category,
    extract_json_ld_product,
};
use crate::extract::meta::meta_content;
use crate::extract::price::extract_prices;
use common::vertical::Vertical;

/// Everything extracted from one product page, before normalization.
#[derive(Clone, Debug)]
pub struct ParsedProductPage {
    pub source_product_id: String,
    pub url: String,
    pub title: String,
    pub image_url: Option<String>,
    pub brand: String,
    pub raw_category: String,
    pub category: String,
    pub category_source: CategorySource,
    pub availability: Option<String>,
    pub gtin: Option<String>,
    pub mpn: Option<String>,
    pub model_number: Option<String>,
    pub attributes: AttrMap,
    pub price_nzd: f64,
    pub promo_price_nzd: Option<f64>,
    pub promo_text: Option<String>,
    pub discount_pct: Option<f64>,
}

/// Parses one product page into a normalized record, or signals that the
/// page is not a product. Pure CPU work; callers fetch the HTML first.
pub fn parse_product_page(
    html: &str,
    url: &str,
    source_product_id: &str,
    config: &AdapterConfig,
    hooks: &dyn AdapterHooks,
) -> Result<ParsedProductPage, AdapterError> {
    let doc = Html::parse_document(html);
    let ld_product = extract_json_ld_product(&doc);

    let title = ld_product
        .get("name")
        .and_then(as_text)
        .or_else(|| meta_content(&doc, "property", "og:title"))
        .or_else(|| {
            let selector = scraper::Selector::parse("title").unwrap();
            doc.select(&selector)
                .next()
                .map(|node| node.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| source_product_id.to_string());

    let body_excerpt: String = doc
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(400)
        .collect();
    if hooks.is_non_product_page(url, &title, &body_excerpt, &ld_product) {
        return Err(AdapterError::NonProduct {
            url: url.to_string(),
        });
    }

    let brand = extract_brand(&ld_product)
        .or_else(|| meta_content(&doc, "name", "brand"))
        .unwrap_or_else(|| {
            // last resort; mis-identifies multi-word brands like "The Ordinary"
            title.split_whitespace().next().unwrap_or("").to_string()
        });

    let (raw_category, category_source) = match ld_product.get("category").and_then(as_text) {
        Some(category) => (category, CategorySource::JsonLd),
        None => match extract_breadcrumb_category(&doc) {
            Some(category) => (category, CategorySource::Breadcrumb),
            None => (
                fallback_raw_category(config.vertical).to_string(),
                CategorySource::Fallback,
            ),
        },
    };

    if config.vertical == Vertical::Pharma
        && contains_rx_exclusion(&format!("{raw_category} {title}"))
    {
        return Err(AdapterError::RxExcluded {
            slug: config.slug.clone(),
            url: url.to_string(),
        });
    }

    let category = normalize_category(config.vertical, &raw_category, &title);
    let availability = extract_availability(&ld_product);

    let (price_nzd, promo_price_nzd) = extract_prices(&ld_product, &doc, &title, config.vertical);
    if price_nzd <= 0.0 {
        return Err(AdapterError::MissingPrice {
            slug: config.slug.clone(),
            url: url.to_string(),
        });
    }
    let discount = discount_pct(price_nzd, promo_price_nzd);
    let promo_text = promo_price_nzd.map(|_| "Promo".to_string());

    let attributes = harvest_attributes(&ld_product, &doc, &title, &raw_category, config.vertical);

    let gtin = ["gtin13", "gtin14", "gtin"]
        .iter()
        .find_map(|key| ld_product.get(*key).and_then(as_text))
        .or_else(|| meta_content(&doc, "name", "gtin"));
    let mpn = ld_product
        .get("mpn")
        .and_then(as_text)
        .or_else(|| ld_product.get("sku").and_then(as_text));
    let model_number = ld_product.get("model").and_then(as_text).or_else(|| {
        ["model", "model_number"]
            .iter()
            .find_map(|key| attributes.get(*key).and_then(as_text))
    });

    let image_url = extract_image_url(&ld_product, &doc, &title, &config.base_url);

    Ok(ParsedProductPage {
        source_product_id: source_product_id.to_string(),
        url: url.to_string(),
        title: title.trim().to_string(),
        image_url,
        brand: brand.trim().to_string(),
        raw_category,
        category,
        category_source,
        availability,
        gtin,
        mpn,
        model_number,
        attributes,
        price_nzd,
        promo_price_nzd,
        promo_text,
        discount_pct: discount,
    })
}

/// Price-only parse used by the live probe: cheap check that a page would
/// yield a positive price today.
pub fn extract_price_only(html: &str, vertical: Vertical) -> f64 {
    let doc = Html::parse_document(html);
    let ld_product = extract_json_ld_product(&doc);
    let title = ld_product.get("name").and_then(as_text).unwrap_or_default();
    extract_prices(&ld_product, &doc, &title, vertical).0
}

fn fallback_raw_category(vertical: Vertical) -> &'static str {
    match vertical {
        Vertical::Tech => "electronics",
        Vertical::Pharma => "pharmacy",
        Vertical::Beauty => "beauty",
        Vertical::HomeAppliances => "appliances",
        Vertical::Supplements => "supplements",
        Vertical::PetGoods => "pet-supplies",
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
