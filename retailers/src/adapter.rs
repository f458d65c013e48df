use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use url::Url;

use common::attrs::set_attr_default;
use common::normalize::normalize_identifier;
use common::records::{NormalizedListing, PageStub, RawDetail, RawListing};
use common::vertical::{CategorySource, Vertical};
use crawler::browser::{BrowserConfig, BrowserFetcher};
use crawler::fetcher::{FetchConfig, PageFetcher};

use crate::config::AdapterConfig;
use crate::discovery::{default_is_candidate_product_url, discover_product_urls};
use crate::errors::AdapterError;
use crate::extract::category::{PHARMA_ALLOWED_CATEGORIES, normalize_category};
use crate::extract::enrich::derive_pharma_attributes;
use crate::extract::{ParsedProductPage, parse_product_page};
use crate::fixture::FixtureAdapter;
use crate::probe::probe_live_urls;
use crate::vertical_inference::infer_vertical;

/// The four-operation contract the pipeline drives. One adapter instance
/// lives exactly one run.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn retailer_slug(&self) -> &str;
    fn vertical(&self) -> Vertical;

    async fn list_pages(&mut self) -> Result<Vec<PageStub>, AdapterError>;
    /// Zero or one listing per live page; fixture pages expand to many.
    async fn parse_listing(&mut self, page: &PageStub) -> Result<Vec<RawListing>, AdapterError>;
    async fn fetch_detail(&mut self, listing: &RawListing) -> Result<RawDetail, AdapterError>;
    fn normalize(
        &self,
        listing: &RawListing,
        detail: &RawDetail,
    ) -> Result<NormalizedListing, AdapterError>;

    fn used_fixture_fallback(&self) -> bool {
        false
    }
}

/// Strategy hooks a retailer can override without subclassing the engine:
/// URL candidacy, non-product detection, and routing fetches through the
/// browser.
pub trait AdapterHooks: Send + Sync {
    fn is_candidate_product_url(&self, url: &str, config: &AdapterConfig) -> bool {
        default_is_candidate_product_url(url, config)
    }

    fn is_non_product_page(
        &self,
        _url: &str,
        _title: &str,
        _body_excerpt: &str,
        _ld_product: &Value,
    ) -> bool {
        false
    }

    fn force_browser(&self, _url: &str) -> bool {
        false
    }
}

pub struct DefaultHooks;

impl AdapterHooks for DefaultHooks {}

/// Shared live-scraping engine: discovery, probe, per-page extraction and
/// normalization, parameterized entirely by `AdapterConfig` + hooks.
pub struct LiveAdapter {
    config: AdapterConfig,
    hooks: Arc<dyn AdapterHooks>,
    fetcher: PageFetcher,
    browser: Option<Arc<dyn BrowserFetcher>>,
    browser_config: BrowserConfig,
    page_cache: HashMap<String, ParsedProductPage>,
    fixture: Option<FixtureAdapter>,
    used_fixture: bool,
}

impl LiveAdapter {
    pub fn new(config: AdapterConfig) -> Result<Self, AdapterError> {
        Self::with_hooks(config, Arc::new(DefaultHooks))
    }

    pub fn with_hooks(
        config: AdapterConfig,
        hooks: Arc<dyn AdapterHooks>,
    ) -> Result<Self, AdapterError> {
        let fetcher = PageFetcher::new(FetchConfig {
            timeout: config.timeout,
            request_delay: config.request_delay,
            max_retries: config.max_fetch_retries,
            retry_backoff: config.retry_backoff,
            proxy_url: config.proxy_url.clone(),
            ..FetchConfig::default()
        })?;

        let fixture = if config.use_fixture_fallback {
            config
                .fallback_fixture
                .as_ref()
                .map(|name| FixtureAdapter::new(&config.slug, config.vertical, name))
        } else {
            None
        };

        let browser_config = BrowserConfig {
            timeout: config.browser_timeout,
            proxy_url: config.browser_proxy_url.clone(),
        };

        Ok(Self {
            config,
            hooks,
            fetcher,
            browser: None,
            browser_config,
            page_cache: HashMap::new(),
            fixture,
            used_fixture: false,
        })
    }

    /// Wires in the external headless-browser capability.
    pub fn with_browser(mut self, browser: Arc<dyn BrowserFetcher>) -> Self {
        self.browser = Some(browser);
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    async fn fetch_page(&self, url: &str) -> Result<String, AdapterError> {
        let browser = if self.config.browser_fallback {
            self.browser.as_deref()
        } else {
            None
        };

        if let Some(browser) = browser
            && self.hooks.force_browser(url)
        {
            let html = browser
                .fetch_page_html(
                    url,
                    self.browser_config.timeout,
                    Some(&self.fetcher.config().user_agent),
                    self.browser_config.proxy_url.as_deref(),
                )
                .await?;
            if crawler::challenge::looks_like_bot_challenge(&html) {
                return Err(crawler::errors::FetchError::Challenge {
                    url: url.to_string(),
                }
                .into());
            }
            return Ok(html);
        }

        Ok(self
            .fetcher
            .fetch_text_or_render(url, browser, &self.browser_config)
            .await?)
    }

    fn fixture_pages(&mut self) -> Result<Vec<PageStub>, AdapterError> {
        let document = match &self.fixture {
            Some(fixture) => fixture.load()?,
            None => {
                return Err(AdapterError::DiscoveryFailed {
                    slug: self.config.slug.clone(),
                    reason: "no fixture fallback configured".to_string(),
                });
            }
        };
        self.used_fixture = true;
        Ok(vec![PageStub::Fixture {
            items: document.items,
        }])
    }

    fn to_raw_detail(parsed: &ParsedProductPage) -> RawDetail {
        RawDetail {
            gtin: parsed.gtin.clone(),
            mpn: parsed.mpn.clone(),
            model_number: parsed.model_number.clone(),
            attributes: parsed.attributes.clone(),
            price_nzd: parsed.price_nzd,
            promo_price_nzd: parsed.promo_price_nzd,
            promo_text: parsed.promo_text.clone(),
            discount_pct: parsed.discount_pct,
            captured_at: Utc::now(),
        }
    }

    /// Stable retailer-scoped id for a discovered URL.
    fn source_id_from_url(&self, url: &str) -> String {
        let base = Url::parse(url)
            .map(|parsed| {
                format!(
                    "{}{}",
                    parsed.host_str().unwrap_or_default(),
                    parsed.path()
                )
            })
            .unwrap_or_else(|_| url.to_string());
        let digest = Sha256::digest(base.trim_matches('/').as_bytes());
        let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
        format!("{}-{}", self.config.slug, &hex[..16])
    }
}

#[async_trait]
impl SourceAdapter for LiveAdapter {
    fn retailer_slug(&self) -> &str {
        &self.config.slug
    }

    fn vertical(&self) -> Vertical {
        self.config.vertical
    }

    async fn list_pages(&mut self) -> Result<Vec<PageStub>, AdapterError> {
        let discovery =
            discover_product_urls(&self.fetcher, &self.config, self.hooks.as_ref()).await;

        if !discovery.urls.is_empty() {
            let probe =
                probe_live_urls(&self.fetcher, discovery.urls, self.config.vertical).await;
            if probe.ok {
                info!(
                    slug = %self.config.slug,
                    pool = probe.urls.len(),
                    "live probe passed"
                );
                return Ok(probe
                    .urls
                    .into_iter()
                    .take(self.config.max_products)
                    .map(|url| PageStub::Live {
                        source_product_id: self.source_id_from_url(&url),
                        url,
                    })
                    .collect());
            }

            let reason = probe
                .reason
                .unwrap_or_else(|| "live probe could not validate any product pages".to_string());
            if self.fixture.is_some() {
                warn!(slug = %self.config.slug, reason = %reason, "live probe failed, using fixture fallback");
                return self.fixture_pages();
            }
            return Err(AdapterError::ProbeFailed {
                slug: self.config.slug.clone(),
                reason,
            });
        }

        let reason = discovery
            .failure_reason
            .unwrap_or_else(|| "no product URLs discovered".to_string());
        if self.fixture.is_some() {
            warn!(slug = %self.config.slug, reason = %reason, "discovery empty, using fixture fallback");
            return self.fixture_pages();
        }
        Err(AdapterError::DiscoveryFailed {
            slug: self.config.slug.clone(),
            reason,
        })
    }

    async fn parse_listing(&mut self, page: &PageStub) -> Result<Vec<RawListing>, AdapterError> {
        match page {
            PageStub::Fixture { items } => {
                Ok(items.iter().map(FixtureAdapter::listing_from_item).collect())
            }
            PageStub::Live {
                url,
                source_product_id,
            } => {
                let html = self.fetch_page(url).await?;
                let parsed = match parse_product_page(
                    &html,
                    url,
                    source_product_id,
                    &self.config,
                    self.hooks.as_ref(),
                ) {
                    Ok(parsed) => parsed,
                    Err(err) if err.is_non_product() => return Ok(Vec::new()),
                    Err(err) => return Err(err),
                };

                let listing = RawListing {
                    source_product_id: parsed.source_product_id.clone(),
                    title: parsed.title.clone(),
                    url: parsed.url.clone(),
                    image_url: parsed.image_url.clone(),
                    category: parsed.category.clone(),
                    brand: parsed.brand.clone(),
                    availability: parsed.availability.clone(),
                };
                let category = parsed.category.clone();
                self.page_cache
                    .insert(parsed.source_product_id.clone(), parsed);

                if self.config.vertical == Vertical::Pharma
                    && !PHARMA_ALLOWED_CATEGORIES.contains(&category.as_str())
                {
                    return Ok(Vec::new());
                }

                Ok(vec![listing])
            }
        }
    }

    async fn fetch_detail(&mut self, listing: &RawListing) -> Result<RawDetail, AdapterError> {
        if let Some(parsed) = self.page_cache.get(&listing.source_product_id) {
            return Ok(Self::to_raw_detail(parsed));
        }

        if let Some(fixture) = &self.fixture
            && let Ok(item) = fixture.item_for(&listing.source_product_id)
        {
            return Ok(FixtureAdapter::detail_from_item(&item));
        }

        let html = self.fetch_page(&listing.url).await?;
        let parsed = parse_product_page(
            &html,
            &listing.url,
            &listing.source_product_id,
            &self.config,
            self.hooks.as_ref(),
        )?;
        let detail = Self::to_raw_detail(&parsed);
        self.page_cache
            .insert(listing.source_product_id.clone(), parsed);
        Ok(detail)
    }

    fn normalize(
        &self,
        listing: &RawListing,
        detail: &RawDetail,
    ) -> Result<NormalizedListing, AdapterError> {
        let model_number = normalize_identifier(detail.model_number.as_deref());
        let gtin = normalize_identifier(detail.gtin.as_deref());
        let mpn = normalize_identifier(detail.mpn.as_deref());

        let mut merged_attributes = detail.attributes.clone();
        if self.config.vertical == Vertical::Pharma {
            for (key, value) in derive_pharma_attributes(&listing.title) {
                set_attr_default(&mut merged_attributes, &key, value);
            }
        }
        if let Some(model_number) = &model_number {
            set_attr_default(
                &mut merged_attributes,
                "model_number",
                Value::String(model_number.clone()),
            );
        }

        let (raw_category, category_source) = match self.page_cache.get(&listing.source_product_id)
        {
            Some(parsed) => (parsed.raw_category.clone(), parsed.category_source),
            None => (listing.category.clone(), CategorySource::Fallback),
        };
        let decision = infer_vertical(
            self.config.vertical,
            &raw_category,
            category_source,
            &listing.url,
            &listing.title,
            &merged_attributes,
        );

        Ok(NormalizedListing {
            vertical: decision.vertical,
            vertical_source: decision.source,
            vertical_confidence: decision.confidence,
            source_product_id: listing.source_product_id.clone(),
            title: listing.title.trim().to_string(),
            url: listing.url.clone(),
            image_url: listing.image_url.clone(),
            canonical_name: listing.title.trim().to_string(),
            brand: listing.brand.trim().to_string(),
            category: normalize_category(self.config.vertical, &listing.category, &listing.title),
            model_number,
            gtin,
            mpn,
            attributes: merged_attributes,
            raw_attributes: detail.attributes.clone(),
            availability: listing.availability.clone(),
            price_nzd: detail.price_nzd,
            promo_price_nzd: detail.promo_price_nzd,
            promo_text: detail.promo_text.clone(),
            discount_pct: detail.discount_pct,
            captured_at: detail.captured_at,
        })
    }

    fn used_fixture_fallback(&self) -> bool {
        self.used_fixture
    }
}
