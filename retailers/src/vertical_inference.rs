use common::attrs::{AttrMap, attr_value_text};
use common::vertical::{CategorySource, Vertical, VerticalSource};

/// Signal vocabularies, scored by counting tokens that appear in the
/// input text. The pet-goods set carries bare "dog"/"cat" and the shampoo
/// compounds so "dog shampoo" outranks beauty's "shampoo".
const VERTICAL_SIGNAL_TOKENS: &[(Vertical, &[&str])] = &[
    (
        Vertical::HomeAppliances,
        &[
            "fridge",
            "refrigerator",
            "freezer",
            "washing machine",
            "dishwasher",
            "dryer",
            "oven",
            "microwave",
            "cooktop",
            "rangehood",
            "vacuum",
            "heat pump",
            "kettle",
            "toaster",
            "blender",
            "washer",
        ],
    ),
    (
        Vertical::Beauty,
        &[
            "serum",
            "moisturiser",
            "moisturizer",
            "cleanser",
            "toner",
            "lipstick",
            "mascara",
            "foundation",
            "concealer",
            "shampoo",
            "haircare",
            "fragrance",
            "perfume",
            "makeup",
            "skincare",
            "spf",
        ],
    ),
    (
        Vertical::PetGoods,
        &[
            "pet",
            "dog",
            "cat",
            "pet shampoo",
            "dog shampoo",
            "cat shampoo",
            "puppy",
            "kitten",
            "dog food",
            "cat food",
            "litter",
            "kibble",
            "leash",
            "collar",
            "flea",
            "aquarium",
            "bird",
        ],
    ),
    (
        Vertical::Pharma,
        &[
            "paracetamol",
            "ibuprofen",
            "pain relief",
            "cold and flu",
            "antihistamine",
            "allergy",
            "capsule",
            "caplet",
            "lozenge",
            "nasal spray",
            "pharmacy",
            "medicine",
            "dosage",
            "antiseptic",
            "decongestant",
        ],
    ),
    (
        Vertical::Supplements,
        &[
            "protein",
            "whey",
            "creatine",
            "multivitamin",
            "vitamin",
            "omega",
            "probiotic",
            "collagen",
            "magnesium",
            "zinc",
            "bcaa",
            "supplement",
            "fish oil",
            "pre workout",
            "preworkout",
        ],
    ),
    (
        Vertical::Tech,
        &[
            "laptop",
            "notebook",
            "smartphone",
            "phone",
            "tablet",
            "monitor",
            "gpu",
            "cpu",
            "ssd",
            "gaming",
            "console",
            "headphones",
            "keyboard",
            "router",
            "webcam",
        ],
    ),
];

/// The `VERTICAL_SIGNAL_TOKENS` order above doubles as the tie-break
/// priority: home-appliances > beauty > pet-goods > pharma > supplements >
/// tech.
pub fn infer_vertical_from_text(text: &str) -> Option<Vertical> {
    let lowered = text.to_lowercase();
    let mut best: Option<(Vertical, usize)> = None;

    for (vertical, tokens) in VERTICAL_SIGNAL_TOKENS {
        let score = tokens.iter().filter(|token| lowered.contains(*token)).count();
        if score == 0 {
            continue;
        }
        // strictly greater keeps the earlier (higher-priority) vertical on ties
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((*vertical, score));
        }
    }

    best.map(|(vertical, _)| vertical)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalDecision {
    pub vertical: Vertical,
    pub source: VerticalSource,
    pub confidence: f64,
}

/// Re-derives a listing's vertical from its strongest available signal:
/// structured category, then URL path, then title + attribute text, then
/// the adapter's configured default.
pub fn infer_vertical(
    default_vertical: Vertical,
    raw_category: &str,
    category_source: CategorySource,
    url: &str,
    title: &str,
    attributes: &AttrMap,
) -> VerticalDecision {
    if let Some(vertical) = infer_vertical_from_text(raw_category) {
        let (source, confidence) = match category_source {
            CategorySource::JsonLd => (VerticalSource::JsonLd, 0.96),
            CategorySource::Breadcrumb => (VerticalSource::Breadcrumb, 0.96),
            CategorySource::Fallback => (VerticalSource::StructuredCategory, 0.86),
        };
        return VerticalDecision {
            vertical,
            source,
            confidence,
        };
    }

    let path_text = url::Url::parse(url)
        .map(|parsed| parsed.path().replace(['-', '/'], " "))
        .unwrap_or_default();
    if let Some(vertical) = infer_vertical_from_text(&path_text) {
        return VerticalDecision {
            vertical,
            source: VerticalSource::UrlPath,
            confidence: 0.88,
        };
    }

    let mut haystack = title.to_string();
    for value in attributes.values() {
        haystack.push(' ');
        haystack.push_str(&attr_value_text(value));
    }
    if let Some(vertical) = infer_vertical_from_text(&haystack) {
        return VerticalDecision {
            vertical,
            source: VerticalSource::TitleAttributes,
            confidence: 0.80,
        };
    }

    VerticalDecision {
        vertical: default_vertical,
        source: VerticalSource::AdapterDefault,
        confidence: 0.55,
    }
}

#[cfg(test)]
#[path = "vertical_inference_test.rs"]
mod tests;
