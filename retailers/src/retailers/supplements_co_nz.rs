use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "supplements-co-nz";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.supplements.co.nz", Vertical::Supplements)
        .seeds(&["/sitemap.xml", "/sitemaps/products.xml"])
        .include(&["/products/"])
        .exclude(&["/pages/", "/blogs/", "/apps/", "?", "#"])
        .fixture("supplements_co_nz.json")
}
