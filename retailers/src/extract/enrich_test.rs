use serde_json::json;

use super::*;

#[test]
fn pharma_attributes_from_title() {
    let attrs = derive_pharma_attributes("Panadol Caplets 500mg 24 Pack");
    assert_eq!(attrs.get("strength"), Some(&json!("500mg")));
    assert_eq!(attrs.get("pack_size"), Some(&json!(24)));
    assert_eq!(attrs.get("form"), Some(&json!("caplet")));
    assert_eq!(attrs.get("dosage_unit"), Some(&json!("caplet")));
}

#[test]
fn pharma_liquid_form_uses_ml_dosage_unit() {
    let attrs = derive_pharma_attributes("Kids Cough Syrup 200ml");
    assert_eq!(attrs.get("form"), Some(&json!("liquid")));
    assert_eq!(attrs.get("dosage_unit"), Some(&json!("ml")));
    assert_eq!(attrs.get("strength"), Some(&json!("200ml")));
}

#[test]
fn beauty_enrichment_from_title_and_description() {
    let mut attrs = AttrMap::new();
    attrs.insert(
        "description".to_string(),
        json!("Hydrating lip gloss with shimmer finish."),
    );
    enrich_beauty_attributes(
        &mut attrs,
        "Fenty Beauty Gloss Bomb Universal Lip Luminizer 9ml SPF 15",
        "makeup",
    );

    assert_eq!(attrs.get("product_type"), Some(&json!("lip_gloss")));
    assert_eq!(attrs.get("size_ml"), Some(&json!(9)));
    assert_eq!(attrs.get("spf"), Some(&json!(15)));
    assert_eq!(attrs.get("finish"), Some(&json!("shimmer")));
}

#[test]
fn beauty_skin_type_and_concern_buckets() {
    let mut attrs = AttrMap::new();
    attrs.insert(
        "description".to_string(),
        json!("Hydrating serum for dry skin"),
    );
    enrich_beauty_attributes(&mut attrs, "Hydrating Face Serum 30ml SPF 50", "skincare");

    assert_eq!(attrs.get("product_type"), Some(&json!("serum")));
    assert_eq!(attrs.get("size_ml"), Some(&json!(30)));
    assert_eq!(attrs.get("spf"), Some(&json!(50)));
    let skin_type = attrs.get("skin_type").and_then(|value| value.as_array());
    assert!(
        skin_type.is_some_and(|types| types.contains(&json!("dry"))),
        "skin_type missing dry: {attrs:?}"
    );
    let concerns = attrs.get("skin_concern").and_then(|value| value.as_array());
    assert!(concerns.is_some_and(|concerns| concerns.contains(&json!("hydration"))));
}

#[test]
fn beauty_litre_sizes_convert_to_ml() {
    let mut attrs = AttrMap::new();
    enrich_beauty_attributes(&mut attrs, "Salon Shampoo 1l Pump", "haircare");
    assert_eq!(attrs.get("size_ml"), Some(&json!(1000)));
}

#[test]
fn beauty_enrichment_never_overwrites_harvested_values() {
    let mut attrs = AttrMap::new();
    attrs.insert("product_type".to_string(), json!("cleanser"));
    enrich_beauty_attributes(&mut attrs, "Gentle Foaming Serum 150ml", "skincare");
    assert_eq!(attrs.get("product_type"), Some(&json!("cleanser")));
}

#[test]
fn home_appliance_capacities_and_energy_rating() {
    let mut attrs = AttrMap::new();
    enrich_home_appliance_attributes(
        &mut attrs,
        "Fisher & Paykel 8.5kg Front Load Washer 4.5 Star",
    );
    assert_eq!(attrs.get("capacity_kg"), Some(&json!(8.5)));
    assert_eq!(attrs.get("energy_rating"), Some(&json!(4.5)));

    let mut fridge_attrs = AttrMap::new();
    enrich_home_appliance_attributes(&mut fridge_attrs, "Samsung 605l French Door Fridge");
    assert_eq!(fridge_attrs.get("capacity_l"), Some(&json!(605)));
}
