use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::records::PageStub;
use common::vertical::Vertical;
use crawler::browser::BrowserFetcher;
use crawler::errors::FetchError;
use retailers::adapter::{LiveAdapter, SourceAdapter};
use retailers::config::AdapterConfig;
use retailers::errors::AdapterError;

const CHALLENGE_HTML: &str =
    "<html><head><title>Just a moment...</title></head><body>challenge-form</body></html>";

const PRODUCT_HTML: &str = r#"<html>
<head>
  <title>Acer Nitro 16</title>
  <script type="application/ld+json">
  {
    "@type": "Product",
    "name": "Acer Nitro 16 Gaming Laptop AN16-51",
    "brand": { "name": "Acer" },
    "category": "Gaming Laptops",
    "gtin13": "1234567890123",
    "mpn": "AN16-51-99",
    "image": "https://cdn.example.com/p/nitro16.jpg",
    "offers": { "price": "1999.00", "availability": "https://schema.org/InStock" }
  }
  </script>
</head>
<body><h1>Acer Nitro 16</h1></body>
</html>"#;

fn adapter_config(base_url: &str) -> AdapterConfig {
    let mut config = AdapterConfig::new("pb-tech", base_url, Vertical::Tech)
        .seeds(&["/sitemap.xml"])
        .include(&["/product/"])
        .fixture("pb_tech.json");
    config.max_fetch_retries = 0;
    config.retry_backoff = Duration::ZERO;
    config
}

#[tokio::test]
async fn live_discovery_probe_and_parse_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<urlset><url><loc>{0}/product/nitro-16</loc></url></urlset>",
            server.uri()
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/product/nitro-16"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_HTML))
        .mount(&server)
        .await;

    let mut adapter = LiveAdapter::new(adapter_config(&server.uri())).expect("adapter builds");
    let pages = adapter.list_pages().await.expect("pages discovered");
    assert_eq!(pages.len(), 1);
    assert!(!adapter.used_fixture_fallback());

    let listings = adapter.parse_listing(&pages[0]).await.expect("parses");
    assert_eq!(listings.len(), 1);
    let listing = &listings[0];
    assert_eq!(listing.title, "Acer Nitro 16 Gaming Laptop AN16-51");
    assert_eq!(listing.brand, "Acer");
    assert_eq!(listing.category, "laptops");

    // detail comes from the parse cache, no extra fetch
    let detail = adapter.fetch_detail(listing).await.expect("detail");
    assert_eq!(detail.price_nzd, 1999.0);
    assert_eq!(detail.gtin.as_deref(), Some("1234567890123"));

    let normalized = adapter.normalize(listing, &detail).expect("normalizes");
    assert_eq!(normalized.vertical, Vertical::Tech);
    assert_eq!(normalized.gtin.as_deref(), Some("1234567890123"));
    assert_eq!(normalized.category, "laptops");
    assert!(normalized.vertical_confidence >= 0.9);
}

#[tokio::test]
async fn blocked_discovery_falls_back_to_fixture() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let mut adapter = LiveAdapter::new(adapter_config(&server.uri())).expect("adapter builds");
    let pages = adapter.list_pages().await.expect("fixture fallback");
    assert!(adapter.used_fixture_fallback());
    assert!(matches!(pages[0], PageStub::Fixture { .. }));

    let listings = adapter.parse_listing(&pages[0]).await.expect("parses");
    assert!(listings.len() >= 2);

    let detail = adapter.fetch_detail(&listings[0]).await.expect("detail");
    assert!(detail.price_nzd > 0.0);
}

#[tokio::test]
async fn blocked_discovery_without_fixture_fails_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let mut config = adapter_config(&server.uri());
    config.use_fixture_fallback = false;
    let mut adapter = LiveAdapter::new(config).expect("adapter builds");

    let error = adapter.list_pages().await.expect_err("no fallback");
    assert!(matches!(error, AdapterError::DiscoveryFailed { .. }));
}

struct StubBrowser;

#[async_trait]
impl BrowserFetcher for StubBrowser {
    async fn fetch_page_html(
        &self,
        _url: &str,
        _timeout: Duration,
        _user_agent: Option<&str>,
        _proxy_url: Option<&str>,
    ) -> Result<String, FetchError> {
        Ok(PRODUCT_HTML.to_string())
    }
}

#[tokio::test]
async fn challenge_page_is_rescued_by_browser_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product/nitro-16"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHALLENGE_HTML))
        .mount(&server)
        .await;

    let mut config = adapter_config(&server.uri());
    config.browser_fallback = true;
    let mut adapter = LiveAdapter::new(config)
        .expect("adapter builds")
        .with_browser(Arc::new(StubBrowser));

    let page = PageStub::Live {
        url: format!("{}/product/nitro-16", server.uri()),
        source_product_id: "pb-tech-test".to_string(),
    };
    let listings = adapter.parse_listing(&page).await.expect("browser rescues");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Acer Nitro 16 Gaming Laptop AN16-51");
}

#[tokio::test]
async fn challenge_without_browser_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product/nitro-16"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHALLENGE_HTML))
        .mount(&server)
        .await;

    let mut adapter = LiveAdapter::new(adapter_config(&server.uri())).expect("adapter builds");
    let page = PageStub::Live {
        url: format!("{}/product/nitro-16", server.uri()),
        source_product_id: "pb-tech-test".to_string(),
    };
    let error = adapter.parse_listing(&page).await.expect_err("challenged");
    assert!(matches!(
        error,
        AdapterError::Fetch(FetchError::Challenge { .. })
    ));
}
