use crawler::errors::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("page is not a product: {url}")]
    NonProduct { url: String },
    #[error("excluded prescription-like listing for {slug}: {url}")]
    RxExcluded { slug: String, url: String },
    #[error("unable to parse positive price for {slug}: {url}")]
    MissingPrice { slug: String, url: String },
    #[error("no product URLs discovered for {slug}: {reason}")]
    DiscoveryFailed { slug: String, reason: String },
    #[error("live probe failed for {slug}: {reason}")]
    ProbeFailed { slug: String, reason: String },
    #[error("fixture {path} could not be loaded: {reason}")]
    Fixture { path: String, reason: String },
    #[error("fixture has no item for {source_product_id}")]
    FixtureItemMissing { source_product_id: String },
    #[error("unknown retailer slug: {slug}")]
    UnknownRetailer { slug: String },
}

impl AdapterError {
    /// Non-product pages produce zero listings instead of a failure.
    pub fn is_non_product(&self) -> bool {
        matches!(self, AdapterError::NonProduct { .. })
    }
}
