use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "mecca";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.meccabeauty.co.nz", Vertical::Beauty)
        .seeds(&[
            "/sitemap.xml",
            "/sitemap_index.xml",
            "/sitemap_products_1.xml",
            "/sitemap_products.xml",
        ])
        .include(&["/product/"])
        .exclude(&["/stores", "/blog", "/help", "?", "#"])
        .fixture("mecca.json")
}
