use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::vertical::Vertical;
use crawler::fetcher::{FetchConfig, PageFetcher};

use super::*;

fn fetcher() -> PageFetcher {
    PageFetcher::new(FetchConfig {
        max_retries: 0,
        retry_backoff: std::time::Duration::ZERO,
        ..FetchConfig::default()
    })
    .expect("client builds")
}

const CHALLENGE_HTML: &str =
    "<html><head><title>Just a moment...</title></head><body>challenge-form</body></html>";
const PRICED_HTML: &str = "<html><body><h1>Product</h1><span>$399.00</span></body></html>";

#[tokio::test]
async fn probe_reorders_known_good_urls_first() {
    let server = MockServer::start().await;
    for blocked in ["/product/a", "/product/b", "/product/c"] {
        Mock::given(method("GET"))
            .and(path(blocked))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHALLENGE_HTML))
            .mount(&server)
            .await;
    }
    for good in ["/product/d", "/product/e"] {
        Mock::given(method("GET"))
            .and(path(good))
            .respond_with(ResponseTemplate::new(200).set_body_string(PRICED_HTML))
            .mount(&server)
            .await;
    }

    let urls: Vec<String> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|leaf| format!("{}/product/{leaf}", server.uri()))
        .collect();

    let outcome = probe_live_urls(&fetcher(), urls.clone(), Vertical::Tech).await;
    assert!(outcome.ok);
    assert_eq!(outcome.reason, None);
    assert_eq!(outcome.urls[0], urls[3]);
    assert_eq!(outcome.urls[1], urls[4]);
    assert_eq!(outcome.urls.len(), 5);
}

#[tokio::test]
async fn all_blocked_reports_anti_bot_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHALLENGE_HTML))
        .mount(&server)
        .await;

    let urls = vec![format!("{}/product/a", server.uri())];
    let outcome = probe_live_urls(&fetcher(), urls, Vertical::Tech).await;
    assert!(!outcome.ok);
    assert_eq!(
        outcome.reason.as_deref(),
        Some("live product pages blocked by anti-bot/WAF")
    );
}

#[tokio::test]
async fn reachable_but_priceless_pages_report_price_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>Beauty Product</h1></body></html>"),
        )
        .mount(&server)
        .await;

    let urls = vec![format!("{}/product/a", server.uri())];
    let outcome = probe_live_urls(&fetcher(), urls, Vertical::Beauty).await;
    assert!(!outcome.ok);
    assert_eq!(
        outcome.reason.as_deref(),
        Some("live product pages reachable but price extraction failed")
    );
}

#[tokio::test]
async fn not_found_bodies_count_as_parse_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(
                "<html><body>Page not found. We can't find this page.</body></html>",
            ),
        )
        .mount(&server)
        .await;

    let urls = vec![format!("{}/product/a", server.uri())];
    let outcome = probe_live_urls(&fetcher(), urls, Vertical::Tech).await;
    assert!(!outcome.ok);
    assert_eq!(
        outcome.reason.as_deref(),
        Some("live product pages returned unparseable content")
    );
}
