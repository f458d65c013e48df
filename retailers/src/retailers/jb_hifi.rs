use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "jb-hi-fi";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.jbhifi.co.nz", Vertical::Tech)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/products/"])
        .exclude(&["/collections/", "/search", "/help", "/gift-card", "?", "#"])
        .fixture("jb_hifi.json")
}
