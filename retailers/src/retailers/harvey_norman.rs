use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "harvey-norman";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.harveynorman.co.nz", Vertical::Tech)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&[
            "/computers/",
            "/phone-and-gps/",
            "/tv-and-audio/",
            "/cameras/",
            "/gaming/",
        ])
        .exclude(&["/gift-card", "/services", "/stores", "?", "#"])
        .suffix(".html")
        .fixture("harvey_norman.json")
}
