use common::vertical::Vertical;

use crate::config::AdapterConfig;

pub(crate) const SLUG: &str = "the-warehouse";

pub(crate) fn config() -> AdapterConfig {
    AdapterConfig::new(SLUG, "https://www.thewarehouse.co.nz", Vertical::Tech)
        .seeds(&["/sitemap_index.xml", "/sitemap_products_1.xml"])
        .include(&["/c/electronics-gaming/", "/electronics-gaming/"])
        .exclude(&["/stores", "/services", "/help", "?", "#"])
        .fixture("the_warehouse.json")
}

pub(crate) fn home_config() -> AdapterConfig {
    let mut config = self::config();
    config.vertical = Vertical::HomeAppliances;
    config
        .include(&[
            "/c/home-garden/whiteware-appliances/",
            "/home-garden/whiteware-appliances/",
        ])
        .fixture("the_warehouse_home.json")
}
