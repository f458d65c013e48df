use common::price::{discount_pct, round2};
use common::vertical::Vertical;
use retailers::registry::build_fixture_adapter;

/// Every (slug, vertical-variant) combination that ships a fixture.
fn all_variants() -> Vec<(&'static str, Option<Vertical>)> {
    vec![
        ("pb-tech", None),
        ("jb-hi-fi", None),
        ("noel-leeming", None),
        ("noel-leeming", Some(Vertical::HomeAppliances)),
        ("harvey-norman", None),
        ("apple", None),
        ("heathcotes", None),
        ("heathcotes", Some(Vertical::HomeAppliances)),
        ("mighty-ape", None),
        ("mighty-ape", Some(Vertical::HomeAppliances)),
        ("the-warehouse", None),
        ("the-warehouse", Some(Vertical::HomeAppliances)),
        ("chemist-warehouse", None),
        ("chemist-warehouse", Some(Vertical::Supplements)),
        ("bargain-chemist", None),
        ("bargain-chemist", Some(Vertical::Supplements)),
        ("life-pharmacy", None),
        ("mecca", None),
        ("sephora", None),
        ("farmers-beauty", None),
        ("farmers", None),
        ("supplements-co-nz", None),
        ("animates", None),
        ("petdirect", None),
        ("pet-co-nz", None),
    ]
}

#[test]
fn every_fixture_loads_and_has_items() {
    for (slug, vertical) in all_variants() {
        let adapter = build_fixture_adapter(slug, vertical)
            .unwrap_or_else(|err| panic!("{slug}: {err}"));
        let document = adapter.load().unwrap_or_else(|err| panic!("{slug}: {err}"));
        assert!(!document.items.is_empty(), "{slug} fixture is empty");
    }
}

#[test]
fn fixture_prices_are_positive_and_promos_plausible() {
    for (slug, vertical) in all_variants() {
        let document = build_fixture_adapter(slug, vertical).unwrap().load().unwrap();
        for item in &document.items {
            assert!(
                item.price_nzd > 0.0,
                "{slug}/{}: non-positive price",
                item.source_product_id
            );
            if let Some(promo) = item.promo_price_nzd {
                assert!(
                    promo < item.price_nzd,
                    "{slug}/{}: promo >= regular",
                    item.source_product_id
                );
                assert!(
                    promo / item.price_nzd >= 0.20,
                    "{slug}/{}: promo below plausibility floor",
                    item.source_product_id
                );
            }
        }
    }
}

#[test]
fn fixture_discount_pct_is_consistent_with_prices() {
    for (slug, vertical) in all_variants() {
        let document = build_fixture_adapter(slug, vertical).unwrap().load().unwrap();
        for item in &document.items {
            let expected = discount_pct(item.price_nzd, item.promo_price_nzd);
            match (item.discount_pct, expected) {
                (Some(stored), Some(computed)) => {
                    assert!(
                        (round2(stored) - computed).abs() < 0.15,
                        "{slug}/{}: stored {stored} vs computed {computed}",
                        item.source_product_id
                    );
                }
                (None, None) => {}
                (stored, computed) => panic!(
                    "{slug}/{}: discount mismatch {stored:?} vs {computed:?}",
                    item.source_product_id
                ),
            }
        }
    }
}

#[test]
fn fixture_brands_and_gtins_are_well_formed() {
    for (slug, vertical) in all_variants() {
        let document = build_fixture_adapter(slug, vertical).unwrap().load().unwrap();
        for item in &document.items {
            let brand = item.brand.trim().to_lowercase();
            assert!(
                !brand.is_empty() && brand != "unknown" && brand != "generic",
                "{slug}/{}: empty or generic brand",
                item.source_product_id
            );
            if let Some(gtin) = &item.gtin {
                assert!(
                    !gtin.trim().is_empty(),
                    "{slug}/{}: gtin present but empty",
                    item.source_product_id
                );
            }
        }
    }
}
