use serde_json::json;

use crate::adapter::AdapterHooks;

use super::*;

#[test]
fn generic_buy_leaves_are_rejected() {
    let hooks = AppleHooks;
    let config = config();

    assert!(!hooks.is_candidate_product_url("https://www.apple.com/nz/shop/buy-iphone", &config));
    assert!(!hooks.is_candidate_product_url(
        "https://www.apple.com/nz/shop/buy-iphone/compare",
        &config
    ));
    assert!(hooks.is_candidate_product_url(
        "https://www.apple.com/nz/shop/buy-iphone/iphone-16-pro",
        &config
    ));
    assert!(hooks.is_candidate_product_url(
        "https://www.apple.com/nz/shop/product/MYWX3ZPA/iphone-16-pro-case",
        &config
    ));
}

#[test]
fn family_landing_pages_are_non_products() {
    let hooks = AppleHooks;

    assert!(hooks.is_non_product_page(
        "https://www.apple.com/nz/shop/buy-mac/",
        "Buy Mac",
        "compare all models and find the best mac",
        &json!({}),
    ));
    assert!(hooks.is_non_product_page(
        "https://www.apple.com/nz/iphone",
        "iPhone - Apple",
        "",
        &json!({}),
    ));
    assert!(!hooks.is_non_product_page(
        "https://www.apple.com/nz/shop/buy-mac/macbook-air-13-m4",
        "MacBook Air 13-inch M4",
        "16GB unified memory",
        &json!({}),
    ));
}
