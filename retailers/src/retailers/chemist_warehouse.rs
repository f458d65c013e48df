use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "chemist-warehouse";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.chemistwarehouse.co.nz", Vertical::Pharma)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/buy/"])
        .exclude(&["/stores", "/about", "/help", "?", "#"])
        .fixture("chemist_warehouse.json")
        .with_browser_fallback()
}

pub(crate) fn supplements_config() -> AdapterConfig {
    let mut config = self::config();
    config.vertical = Vertical::Supplements;
    config
        .include(&[
            "/buy/vitamins-and-supplements/",
            "/buy/weight-management/",
            "/buy/sport-nutrition/",
        ])
        .fixture("chemist_warehouse_supplements.json")
}
