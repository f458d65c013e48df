pub mod canonical_products;
pub mod ingestion_runs;
pub mod latest_prices;
pub mod price_observations;
pub mod product_overrides;
pub mod retailer_listings;
pub mod retailers;

use mongodb::options::{Collation, CollationStrength};

/// Case-insensitive comparison collation shared by the brand/category
/// lookups the matching engine performs.
pub(crate) fn case_insensitive() -> Collation {
    Collation::builder()
        .locale("en")
        .strength(CollationStrength::Secondary)
        .build()
}
