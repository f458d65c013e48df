use common::vertical::Vertical;

use super::*;

#[test]
fn tech_titles_bucket_into_taxonomy() {
    assert_eq!(
        normalize_category(Vertical::Tech, "Computers", "Acer Nitro 16 Gaming Laptop"),
        "laptops"
    );
    assert_eq!(
        normalize_category(Vertical::Tech, "Computers", "Dell XPS 15 Notebook"),
        "laptops"
    );
    assert_eq!(
        normalize_category(Vertical::Tech, "Mobile", "Samsung Galaxy S25 256GB"),
        "phones"
    );
    assert_eq!(
        normalize_category(Vertical::Tech, "Mobile", "Apple iPhone 16 Pro"),
        "phones"
    );
    assert_eq!(
        normalize_category(Vertical::Tech, "", "Soundbar with subwoofer"),
        "electronics"
    );
}

#[test]
fn beauty_taxonomy() {
    assert_eq!(
        normalize_category(Vertical::Beauty, "Face", "Hydrating Serum"),
        "skincare"
    );
    assert_eq!(
        normalize_category(Vertical::Beauty, "Lip", "Matte Lipstick"),
        "makeup"
    );
    assert_eq!(
        normalize_category(Vertical::Beauty, "Hair", "Repair Shampoo"),
        "haircare"
    );
    assert_eq!(
        normalize_category(Vertical::Beauty, "", "Unknown beauty item"),
        "beauty"
    );
}

#[test]
fn pharma_taxonomy_and_rx_exclusion() {
    assert_eq!(
        normalize_category(Vertical::Pharma, "otc", "Panadol Tablets 500mg 20 Pack"),
        "otc"
    );
    assert_eq!(
        normalize_category(Vertical::Pharma, "supplements", "GO Vitamin C 1000mg 60 Tablets"),
        "supplements"
    );
    assert_eq!(
        normalize_category(Vertical::Pharma, "pain relief", "Prescription strength relief"),
        "excluded-rx"
    );
}

#[test]
fn dishwasher_is_not_a_washing_machine() {
    // "dishwasher" contains the substring "washer"; the longest matching
    // rule must win.
    assert_eq!(
        normalize_category(
            Vertical::HomeAppliances,
            "whiteware",
            "Bosch 13 Place Dishwasher"
        ),
        "dishwashers"
    );
    assert_eq!(
        normalize_category(
            Vertical::HomeAppliances,
            "whiteware",
            "Fisher & Paykel 8.5kg Front Load Washing Machine"
        ),
        "washing-machines"
    );
    assert_eq!(
        normalize_category(
            Vertical::HomeAppliances,
            "whiteware",
            "Samsung 605L French Door Fridge"
        ),
        "fridges"
    );
}

#[test]
fn rx_tokens_match_as_substrings() {
    assert!(contains_rx_exclusion("Pharmacist Only Medicine"));
    assert!(contains_rx_exclusion("requires a prescription"));
    assert!(!contains_rx_exclusion("soothing throat lozenge"));
}
