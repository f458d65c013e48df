use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "pet-co-nz";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://pet.co.nz", Vertical::PetGoods)
        .seeds(&["/sitemap.xml", "/sitemap_index.xml", "/sitemaps/products.xml"])
        .include(&["/products/"])
        .exclude(&["/blogs/", "/pages/", "/help", "?", "#"])
        .fixture("pet_co_nz.json")
}
