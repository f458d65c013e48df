use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "animates";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.animates.co.nz", Vertical::PetGoods)
        .seeds(&["/sitemap.xml", "/sitemap_index.xml", "/sitemap_products.xml"])
        .include(&["/products/"])
        .exclude(&["/blog", "/stores", "/help", "?", "#"])
        .fixture("animates.json")
}
