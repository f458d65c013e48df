use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "mighty-ape";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.mightyape.co.nz", Vertical::Tech)
        .seeds(&[
            "/sitemap-index.xml",
            "/sitemaps/products.xml",
            "/sitemaps/products-1.xml",
        ])
        .include(&["/product/", "/computers/", "/gaming/", "/electronics/"])
        .exclude(&["/marketplace/", "/author/", "/help/", "?", "#"])
        .fixture("mighty_ape.json")
}

pub(crate) fn home_config() -> AdapterConfig {
    let mut config = self::config();
    config.vertical = Vertical::HomeAppliances;
    config
        .include(&[
            "/product/",
            "/home-living/kitchen-appliances/",
            "/home-living/household-appliances/",
        ])
        .fixture("mighty_ape_home.json")
}
