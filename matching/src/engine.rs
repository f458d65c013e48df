use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

use catalog_store::errors::StoreError;
use catalog_store::traits::CatalogStore;
use common::attrs::{AttrMap, attr_value_text};
use common::entities::CanonicalProduct;
use common::normalize::{normalize_identifier, normalize_text};
use common::records::NormalizedListing;
use common::vertical::Vertical;

use crate::similarity::{token_jaccard, token_set_ratio};

/// Fuzzy candidates are drawn from one (vertical, brand, category) shelf.
const FUZZY_CANDIDATE_LIMIT: usize = 200;
/// Minimum count of identically-valued attributes before a fuzzy candidate
/// is even scored.
const FUZZY_MIN_ATTRIBUTE_OVERLAP: usize = 2;
const FUZZY_SCORE_THRESHOLD: f64 = 0.82;

/// Which strategy produced a decision.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Display)]
pub enum MatchTier {
    #[serde(rename = "gtin")]
    #[strum(serialize = "gtin")]
    Gtin,
    #[serde(rename = "model")]
    #[strum(serialize = "model")]
    Model,
    #[serde(rename = "manual_override")]
    #[strum(serialize = "manual_override")]
    ManualOverride,
    #[serde(rename = "fuzzy")]
    #[strum(serialize = "fuzzy")]
    Fuzzy,
    #[serde(rename = "new")]
    #[strum(serialize = "new")]
    New,
}

#[derive(Clone, Debug)]
pub struct MatchOutcome {
    pub product_id: Option<String>,
    pub tier: MatchTier,
    pub score: f64,
}

/// Resolves a normalized listing to the canonical product it belongs to,
/// or to none when a new canonical should be created. Tiers are tried in
/// order and the first hit wins; every tier rejects pharma variant
/// mismatches so shared GTINs cannot collapse distinct pack sizes.
pub struct MatchingEngine<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// `retailer_listing_id` is the existing listing row for this
    /// (retailer, source product) pair when one exists; manual overrides
    /// attach to it. The override tier sits after the hard-identifier tiers
    /// on purpose: overrides are for listings whose identifiers are missing
    /// or wrong.
    pub async fn match_listing(
        &self,
        item: &NormalizedListing,
        retailer_listing_id: Option<&str>,
    ) -> Result<MatchOutcome, StoreError> {
        if let Some(gtin) = normalize_identifier(item.gtin.as_deref())
            && let Some(candidate) = self.store.canonical_by_gtin(item.vertical, &gtin).await?
            && pharma_variant_compatible(item, &candidate)
        {
            return Ok(MatchOutcome {
                product_id: Some(candidate.id),
                tier: MatchTier::Gtin,
                score: 1.0,
            });
        }

        let model_identifier = normalize_identifier(item.mpn.as_deref())
            .or_else(|| normalize_identifier(item.model_number.as_deref()));
        if let Some(identifier) = model_identifier
            && let Some(candidate) = self
                .store
                .canonical_by_model(item.vertical, &item.brand, &identifier)
                .await?
            && pharma_variant_compatible(item, &candidate)
        {
            return Ok(MatchOutcome {
                product_id: Some(candidate.id),
                tier: MatchTier::Model,
                score: 0.98,
            });
        }

        if let Some(listing_id) = retailer_listing_id
            && let Some(mapping) = self.store.override_for_listing(listing_id).await?
        {
            return Ok(MatchOutcome {
                product_id: Some(mapping.product_id),
                tier: MatchTier::ManualOverride,
                score: 1.0,
            });
        }

        self.fuzzy_match(item).await
    }

    async fn fuzzy_match(&self, item: &NormalizedListing) -> Result<MatchOutcome, StoreError> {
        let candidates = self
            .store
            .canonicals_by_shelf(
                item.vertical,
                &item.brand,
                &item.category,
                FUZZY_CANDIDATE_LIMIT,
            )
            .await?;

        let item_name = normalize_text(&item.canonical_name);
        let mut best_id: Option<String> = None;
        let mut best_score = 0.0_f64;

        for candidate in candidates {
            if !pharma_variant_compatible(item, &candidate) {
                continue;
            }
            let attr_matches = attribute_overlap(&item.attributes, &candidate.attributes);
            if attr_matches < FUZZY_MIN_ATTRIBUTE_OVERLAP {
                continue;
            }

            let candidate_name = normalize_text(&candidate.canonical_name);
            let name_similarity = token_set_ratio(&item_name, &candidate_name);
            let jaccard = token_jaccard(&item_name, &candidate_name);
            let overlap_ratio =
                (attr_matches as f64 / item.attributes.len().max(1) as f64).min(1.0);
            let score = 0.55 * name_similarity + 0.30 * overlap_ratio + 0.15 * jaccard;

            debug!(
                candidate_id = %candidate.id,
                name_similarity,
                overlap_ratio,
                jaccard,
                score,
                "scored fuzzy candidate"
            );

            if score > best_score {
                best_id = Some(candidate.id);
                best_score = score;
            }
        }

        if let Some(id) = best_id
            && best_score >= FUZZY_SCORE_THRESHOLD
        {
            return Ok(MatchOutcome {
                product_id: Some(id),
                tier: MatchTier::Fuzzy,
                score: best_score,
            });
        }

        Ok(MatchOutcome {
            product_id: None,
            tier: MatchTier::New,
            score: best_score,
        })
    }
}

/// Two pharma records are incompatible when any of strength, form or
/// pack_size is present on both sides and differs after normalization.
/// "500mg 20-pack tablets" and "500mg 24-pack caplets" stay separate even
/// under an (erroneously) shared GTIN.
fn pharma_variant_compatible(item: &NormalizedListing, candidate: &CanonicalProduct) -> bool {
    if item.vertical != Vertical::Pharma {
        return true;
    }

    for key in ["strength", "form", "pack_size"] {
        let item_value = item.attributes.get(key).and_then(variant_key);
        let candidate_value = candidate.attributes.get(key).and_then(variant_key);
        if let (Some(item_value), Some(candidate_value)) = (item_value, candidate_value)
            && item_value != candidate_value
        {
            return false;
        }
    }
    true
}

fn variant_key(value: &serde_json::Value) -> Option<String> {
    let normalized = normalize_text(&attr_value_text(value)).replace(' ', "");
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Count of attribute keys whose values agree on both sides, compared as
/// case-folded strings.
fn attribute_overlap(a: &AttrMap, b: &AttrMap) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    a.iter()
        .filter(|(key, value)| {
            b.get(key.as_str()).is_some_and(|other| {
                attr_value_text(other).to_lowercase() == attr_value_text(value).to_lowercase()
            })
        })
        .count()
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
