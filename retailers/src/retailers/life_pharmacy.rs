use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "life-pharmacy";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.lifepharmacy.co.nz", Vertical::Pharma)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/product/"])
        .exclude(&["/help", "/stores", "/blog", "?", "#"])
        .fixture("life_pharmacy.json")
}
