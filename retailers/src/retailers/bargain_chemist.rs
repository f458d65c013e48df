use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "bargain-chemist";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.bargainchemist.co.nz", Vertical::Pharma)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/products/"])
        .exclude(&["/pages/", "/policies/", "/collections/", "?", "#"])
        .fixture("bargain_chemist.json")
}

pub(crate) fn supplements_config() -> AdapterConfig {
    let mut config = self::config();
    config.vertical = Vertical::Supplements;
    config.fixture("bargain_chemist_supplements.json")
}
