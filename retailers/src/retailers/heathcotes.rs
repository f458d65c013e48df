use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "heathcotes";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.heathcotes.co.nz", Vertical::Tech)
        .seeds(&["/sitemap.xml", "/sitemaps/products.xml"])
        .include(&["/computers/", "/tv-and-audio/", "/phones-and-smart-home/"])
        .exclude(&["/gift-cards", "/services", "/contact-us", "?", "#"])
        .fixture("heathcotes.json")
}

pub(crate) fn home_config() -> AdapterConfig {
    let mut config = self::config();
    config.vertical = Vertical::HomeAppliances;
    config
        .include(&["/whiteware/", "/kitchen-appliances/", "/small-appliances/"])
        .fixture("heathcotes_home.json")
}
