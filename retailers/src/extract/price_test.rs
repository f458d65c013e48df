use scraper::Html;
use serde_json::json;

use super::*;

#[test]
fn script_pool_parses_known_price_keys() {
    let doc = Html::parse_document(
        r#"<html><script>window.product={"price":"397.00","salePrice":"349.00"}</script></html>"#,
    );
    let (price, promo) = extract_prices(&json!({}), &doc, "Garmin Watch", Vertical::Tech);
    assert_eq!(price, 397.0);
    assert_eq!(promo, Some(349.0));
}

#[test]
fn structured_pool_beats_script_outliers() {
    let doc = Html::parse_document(
        r#"<html>
          <head><meta property="og:price:amount" content="19.99"/></head>
          <body><script>window.product={"price":"2999","salePrice":"1000"}</script></body>
        </html>"#,
    );
    let (price, promo) = extract_prices(&json!({}), &doc, "CD Album", Vertical::Tech);
    assert_eq!(price, 19.99);
    assert_eq!(promo, None);
}

#[test]
fn premium_tech_floor_rejects_micro_promo() {
    let doc = Html::parse_document("<html></html>");
    let offers = json!({ "offers": { "price": "1969", "lowPrice": "4" } });
    let (price, promo) = extract_prices(&offers, &doc, "Apple MacBook Air", Vertical::Tech);
    assert_eq!(price, 1969.0);
    assert_eq!(promo, None);
}

#[test]
fn plausible_promo_survives_the_floor() {
    let doc = Html::parse_document("<html></html>");
    let offers = json!({ "offers": { "price": "1999", "lowPrice": "1799" } });
    let (price, promo) = extract_prices(&offers, &doc, "Acer Nitro 16", Vertical::Tech);
    assert_eq!(price, 1999.0);
    assert_eq!(promo, Some(1799.0));
}

#[test]
fn cents_encoded_prices_are_corrected() {
    let doc = Html::parse_document("<html></html>");
    let offers = json!({ "offers": { "price": 249900 } });
    let (price, promo) = extract_prices(&offers, &doc, "Samsung Fridge", Vertical::HomeAppliances);
    assert_eq!(price, 2499.0);
    assert_eq!(promo, None);
}

#[test]
fn junk_candidates_are_rejected() {
    let doc = Html::parse_document("<html></html>");
    let offers = json!({ "offers": { "price": 250001.0, "lowPrice": 0.0 } });
    let (price, promo) = extract_prices(&offers, &doc, "Bulk order", Vertical::Tech);
    assert_eq!(price, 0.0);
    assert_eq!(promo, None);
}

#[test]
fn visible_text_pool_is_last_resort() {
    let doc = Html::parse_document(
        r#"<html><body><p>Was $499.00 now only $399.00</p></body></html>"#,
    );
    let (price, promo) = extract_prices(&json!({}), &doc, "Vacuum", Vertical::HomeAppliances);
    assert_eq!(price, 499.0);
    assert_eq!(promo, Some(399.0));
}

#[test]
fn floor_table_by_vertical_and_title() {
    assert_eq!(plausibility_floor(Vertical::Beauty, 1200.0, "Serum"), 0.20);
    assert_eq!(plausibility_floor(Vertical::Tech, 500.0, "Mouse"), 0.20);
    assert_eq!(plausibility_floor(Vertical::Tech, 900.0, "Generic Laptop"), 0.35);
    assert_eq!(
        plausibility_floor(Vertical::Tech, 2000.0, "Sony PlayStation 5 Pro"),
        0.55
    );
}
