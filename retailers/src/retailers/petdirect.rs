use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "petdirect";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://petdirect.co.nz", Vertical::PetGoods)
        .seeds(&["/sitemap.xml", "/sitemap_index.xml", "/sitemaps/products.xml"])
        .include(&["/products/"])
        .exclude(&["/blogs/", "/pages/", "/help", "?", "#"])
        .fixture("petdirect.json")
}
