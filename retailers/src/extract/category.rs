use common::vertical::Vertical;

/// Tokens that mark a pharmacy listing as prescription-gated. Matched as
/// substrings against category + title, lowercased.
pub(crate) const RX_EXCLUSION_TOKENS: &[&str] = &[
    "prescription",
    "pharmacist only",
    "pharmacy only medicine",
    "schedule 4",
    "s4",
    "rx",
];

/// Categories a pharma listing must land in to survive `parse_listing`.
pub(crate) const PHARMA_ALLOWED_CATEGORIES: &[&str] = &["otc", "supplements"];

pub(crate) fn contains_rx_exclusion(text: &str) -> bool {
    let lowered = text.to_lowercase();
    RX_EXCLUSION_TOKENS.iter().any(|token| lowered.contains(token))
}

/// Closed per-vertical taxonomy rules. The longest matching token wins, so
/// "dishwasher" can never be claimed by the shorter "washer" rule.
fn rules_for(vertical: Vertical) -> &'static [(&'static str, &'static str)] {
    match vertical {
        Vertical::Tech => &[
            ("laptop", "laptops"),
            ("notebook", "laptops"),
            ("macbook", "laptops"),
            ("ultrabook", "laptops"),
            ("phone", "phones"),
            ("smartphone", "phones"),
            ("iphone", "phones"),
            ("galaxy", "phones"),
            ("pixel", "phones"),
            ("monitor", "monitors"),
            ("display", "monitors"),
            ("oled", "monitors"),
            ("refresh", "monitors"),
        ],
        Vertical::Pharma => &[
            ("vitamin", "supplements"),
            ("supplement", "supplements"),
            ("omega", "supplements"),
            ("probiotic", "supplements"),
            ("collagen", "supplements"),
            ("magnesium", "supplements"),
            ("pain", "otc"),
            ("cold", "otc"),
            ("flu", "otc"),
            ("tablet", "otc"),
            ("capsule", "otc"),
            ("medicine", "otc"),
            ("paracetamol", "otc"),
            ("ibuprofen", "otc"),
        ],
        Vertical::Beauty => &[
            ("serum", "skincare"),
            ("moisturiser", "skincare"),
            ("moisturizer", "skincare"),
            ("cleanser", "skincare"),
            ("toner", "skincare"),
            ("sunscreen", "skincare"),
            ("skincare", "skincare"),
            ("face", "skincare"),
            ("spf", "skincare"),
            ("lipstick", "makeup"),
            ("lip", "makeup"),
            ("mascara", "makeup"),
            ("foundation", "makeup"),
            ("concealer", "makeup"),
            ("eyeshadow", "makeup"),
            ("blush", "makeup"),
            ("makeup", "makeup"),
            ("shampoo", "haircare"),
            ("conditioner", "haircare"),
            ("hair", "haircare"),
            ("fragrance", "fragrance"),
            ("perfume", "fragrance"),
            ("cologne", "fragrance"),
        ],
        Vertical::HomeAppliances => &[
            ("dishwasher", "dishwashers"),
            ("washing machine", "washing-machines"),
            ("washer", "washing-machines"),
            ("fridge", "fridges"),
            ("refrigerator", "fridges"),
            ("freezer", "freezers"),
            ("dryer", "dryers"),
            ("oven", "cooking"),
            ("cooktop", "cooking"),
            ("rangehood", "cooking"),
            ("microwave", "microwaves"),
            ("vacuum", "vacuums"),
            ("heat pump", "heating"),
            ("kettle", "small-appliances"),
            ("toaster", "small-appliances"),
            ("blender", "small-appliances"),
        ],
        Vertical::Supplements => &[
            ("protein", "protein"),
            ("whey", "protein"),
            ("casein", "protein"),
            ("mass gainer", "protein"),
            ("multivitamin", "vitamins"),
            ("vitamin", "vitamins"),
            ("creatine", "performance"),
            ("bcaa", "performance"),
            ("pre workout", "performance"),
            ("preworkout", "performance"),
            ("omega", "wellness"),
            ("fish oil", "wellness"),
            ("probiotic", "wellness"),
            ("collagen", "wellness"),
            ("magnesium", "wellness"),
        ],
        Vertical::PetGoods => &[
            ("dog food", "pet-food"),
            ("cat food", "pet-food"),
            ("kibble", "pet-food"),
            ("treats", "pet-food"),
            ("litter", "litter"),
            ("shampoo", "grooming"),
            ("grooming", "grooming"),
            ("brush", "grooming"),
            ("flea", "healthcare"),
            ("worming", "healthcare"),
            ("leash", "accessories"),
            ("collar", "accessories"),
            ("harness", "accessories"),
            ("toy", "toys"),
        ],
    }
}

fn fallback_category(vertical: Vertical) -> &'static str {
    match vertical {
        Vertical::Tech => "electronics",
        Vertical::Pharma => "other-pharma",
        Vertical::Beauty => "beauty",
        Vertical::HomeAppliances => "appliances",
        Vertical::Supplements => "supplements",
        Vertical::PetGoods => "pet-supplies",
    }
}

/// Maps raw category + title into the vertical's closed taxonomy, longest
/// matching rule first.
pub(crate) fn normalize_category(vertical: Vertical, raw_category: &str, title: &str) -> String {
    let text = format!("{raw_category} {title}").to_lowercase();

    if vertical == Vertical::Pharma && contains_rx_exclusion(&text) {
        return "excluded-rx".to_string();
    }

    rules_for(vertical)
        .iter()
        .filter(|(token, _)| text.contains(token))
        .max_by_key(|(token, _)| token.len())
        .map(|(_, category)| category.to_string())
        .unwrap_or_else(|| fallback_category(vertical).to_string())
}

#[cfg(test)]
#[path = "category_test.rs"]
mod tests;
