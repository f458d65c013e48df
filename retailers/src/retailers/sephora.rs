use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "sephora";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.sephora.nz", Vertical::Beauty)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/products/"])
        .exclude(&["/stores", "/blog", "/help", "?", "#"])
        .fixture("sephora.json")
}
