use scraper::Html;
use serde_json::json;

use common::vertical::Vertical;

use super::*;

#[test]
fn additional_properties_and_direct_fields() {
    let doc = Html::parse_document("<html></html>");
    let product = json!({
        "additionalProperty": [
            { "name": "Screen Size", "value": "16 in" },
            { "name": "RAM", "value": 16 }
        ],
        "model": "AN16-51",
        "sku": "NBKACR16051",
        "color": "black"
    });

    let attrs = harvest_attributes(&product, &doc, "Acer Nitro 16", "laptops", Vertical::Tech);
    assert_eq!(attrs.get("screen_size"), Some(&json!("16 in")));
    assert_eq!(attrs.get("ram"), Some(&json!(16)));
    assert_eq!(attrs.get("model"), Some(&json!("AN16-51")));
    assert_eq!(attrs.get("sku"), Some(&json!("NBKACR16051")));
    assert_eq!(attrs.get("color"), Some(&json!("black")));
}

#[test]
fn property_map_form_is_accepted() {
    let doc = Html::parse_document("<html></html>");
    let product = json!({
        "additionalProperty": { "Screen Size": "27 in", "Refresh Rate": "180 Hz" }
    });
    let attrs = harvest_attributes(&product, &doc, "Monitor", "monitors", Vertical::Tech);
    assert_eq!(attrs.get("screen_size"), Some(&json!("27 in")));
    assert_eq!(attrs.get("refresh_rate"), Some(&json!("180 Hz")));
}

#[test]
fn keywords_split_and_capped() {
    let doc = Html::parse_document(
        r#"<html><head><meta name="keywords" content="lip gloss, shimmer, hydrating"/></head></html>"#,
    );
    let attrs = harvest_attributes(&json!({}), &doc, "Gloss", "makeup", Vertical::Beauty);
    assert_eq!(
        attrs.get("keywords"),
        Some(&json!(["lip gloss", "shimmer", "hydrating"]))
    );
}

#[test]
fn ingredients_joined_from_json_ld_list() {
    let doc = Html::parse_document("<html></html>");
    let product = json!({ "ingredients": ["Jojoba Oil", "Vitamin E"] });
    let attrs = harvest_attributes(&product, &doc, "Gloss", "makeup", Vertical::Beauty);
    assert_eq!(attrs.get("ingredients"), Some(&json!("Jojoba Oil, Vitamin E")));
}

#[test]
fn specification_tables_and_definition_lists() {
    let doc = Html::parse_document(
        r#"<html><body>
          <table>
            <tr><th>Processor</th><td>Intel Core i7-13620H</td></tr>
            <tr><th>Price</th><td>$1999</td></tr>
            <tr><th>Weight</th><td>2.7</td></tr>
          </table>
          <dl>
            <dt>Warranty</dt><dd>24 months</dd>
          </dl>
        </body></html>"#,
    );
    let attrs = harvest_attributes(&json!({}), &doc, "Laptop", "laptops", Vertical::Tech);
    assert_eq!(attrs.get("processor"), Some(&json!("Intel Core i7-13620H")));
    assert_eq!(attrs.get("weight"), Some(&json!(2.7)));
    assert_eq!(attrs.get("warranty"), Some(&json!("24 months")));
    // "price" is a reserved key and never harvested
    assert!(!attrs.contains_key("price"));
}

#[test]
fn empty_values_are_pruned() {
    let doc = Html::parse_document("<html></html>");
    let product = json!({
        "additionalProperty": [
            { "name": "Color", "value": "" },
            { "name": "Material", "value": "aluminium" }
        ]
    });
    let attrs = harvest_attributes(&product, &doc, "Laptop", "laptops", Vertical::Tech);
    assert!(!attrs.contains_key("color"));
    assert_eq!(attrs.get("material"), Some(&json!("aluminium")));
}

#[test]
fn attribute_count_is_capped() {
    let rows: String = (0..100)
        .map(|index| format!("<tr><th>Spec {index}</th><td>value {index}</td></tr>"))
        .collect();
    let doc = Html::parse_document(&format!("<html><body><table>{rows}</table></body></html>"));
    let attrs = harvest_attributes(&json!({}), &doc, "Laptop", "laptops", Vertical::Tech);
    assert!(attrs.len() <= 60, "got {} attributes", attrs.len());
}

#[test]
fn key_normalization_is_lower_snake() {
    assert_eq!(normalize_attr_key("Screen Size"), "screen_size");
    assert_eq!(normalize_attr_key("  Wi-Fi / Bluetooth  "), "wi_fi_bluetooth");
    assert_eq!(normalize_attr_key("RAM (GB)"), "ram_gb");
}
