use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "noel-leeming";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.noelleeming.co.nz", Vertical::Tech)
        .seeds(&[
            "/sitemap_index.xml",
            "/sitemap_0.xml",
            "/sitemap_1-folder.xml",
            "/sitemap_2.xml",
        ])
        .include(&["/p/"])
        .exclude(&["/stores", "/services", "/help", "?", "#"])
        .suffix(".html")
        .fixture("noel_leeming.json")
}

/// Whiteware and kitchen/household appliance aisles of the same store.
pub(crate) fn home_config() -> AdapterConfig {
    let mut config = self::config();
    config.vertical = Vertical::HomeAppliances;
    config
        .include(&["/c/whiteware", "/c/kitchen-appliances", "/c/household-appliances"])
        .fixture("noel_leeming_home.json")
}
