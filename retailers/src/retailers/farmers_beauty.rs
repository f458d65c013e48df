use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "farmers-beauty";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.farmers.co.nz", Vertical::Beauty)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/beauty/", "/product/"])
        .exclude(&["/stores", "/blog", "/help", "?", "#"])
        .fixture("farmers_beauty.json")
}
