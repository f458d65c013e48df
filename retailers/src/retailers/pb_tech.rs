use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "pb-tech";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.pbtech.co.nz", Vertical::Tech)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/product/"])
        .exclude(&["/blog", "/support", "/help", "?", "#"])
        .fixture("pb_tech.json")
}
