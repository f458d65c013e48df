use std::time::Duration;

use common::vertical::Vertical;

/// URL path fragments that never lead to product pages, applied on top of
/// each retailer's own exclusions.
pub const DEFAULT_EXCLUDE_URL_PATTERNS: &[&str] =
    &["/blog", "/news", "/support", "/stores", "?", "#"];

/// Everything the shared engine parameterizes on for one retailer.
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    pub slug: String,
    pub base_url: String,
    pub vertical: Vertical,
    /// Sitemap paths probed in order, resolved against `base_url`.
    pub sitemap_seeds: Vec<String>,
    /// Substrings that qualify a URL as a product page.
    pub include_url_patterns: Vec<String>,
    /// Substrings that disqualify a URL outright.
    pub exclude_url_patterns: Vec<String>,
    /// Required path suffix, e.g. ".html" for retailers whose product pages
    /// all carry one.
    pub require_file_suffix: Option<String>,
    pub max_products: usize,
    pub timeout: Duration,
    pub request_delay: Duration,
    pub max_fetch_retries: u32,
    pub retry_backoff: Duration,
    pub use_fixture_fallback: bool,
    pub proxy_url: Option<String>,
    pub browser_fallback: bool,
    pub browser_timeout: Duration,
    pub browser_proxy_url: Option<String>,
    /// Fixture file (under the crate's fixtures directory) used when live
    /// discovery or the probe cannot produce anything usable.
    pub fallback_fixture: Option<String>,
}

impl AdapterConfig {
    pub fn new(slug: &str, base_url: &str, vertical: Vertical) -> Self {
        Self {
            slug: slug.to_string(),
            base_url: base_url.to_string(),
            vertical,
            sitemap_seeds: Vec::new(),
            include_url_patterns: Vec::new(),
            exclude_url_patterns: DEFAULT_EXCLUDE_URL_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
            require_file_suffix: None,
            max_products: 120,
            timeout: Duration::from_secs(15),
            request_delay: Duration::ZERO,
            max_fetch_retries: 2,
            retry_backoff: Duration::from_millis(600),
            use_fixture_fallback: true,
            proxy_url: None,
            browser_fallback: false,
            browser_timeout: Duration::from_secs(30),
            browser_proxy_url: None,
            fallback_fixture: None,
        }
    }

    pub fn seeds(mut self, seeds: &[&str]) -> Self {
        self.sitemap_seeds = seeds.iter().map(|seed| seed.to_string()).collect();
        self
    }

    pub fn include(mut self, patterns: &[&str]) -> Self {
        self.include_url_patterns = patterns.iter().map(|pattern| pattern.to_string()).collect();
        self
    }

    pub fn exclude(mut self, patterns: &[&str]) -> Self {
        self.exclude_url_patterns = patterns.iter().map(|pattern| pattern.to_string()).collect();
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.require_file_suffix = Some(suffix.to_string());
        self
    }

    pub fn fixture(mut self, fixture_name: &str) -> Self {
        self.fallback_fixture = Some(fixture_name.to_string());
        self
    }

    pub fn with_browser_fallback(mut self) -> Self {
        self.browser_fallback = true;
        self
    }
}
