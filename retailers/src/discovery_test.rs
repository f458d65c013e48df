use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::vertical::Vertical;

use crate::adapter::DefaultHooks;
use crate::config::AdapterConfig;

use super::*;

fn config_for(base_url: &str) -> AdapterConfig {
    AdapterConfig::new("dummy", base_url, Vertical::Pharma)
        .seeds(&["/sitemap.xml"])
        .include(&["/product/"])
        .exclude(&["/blog", "?", "#"])
}

fn fetcher() -> crawler::fetcher::PageFetcher {
    crawler::fetcher::PageFetcher::new(crawler::fetcher::FetchConfig {
        max_retries: 0,
        retry_backoff: std::time::Duration::ZERO,
        ..crawler::fetcher::FetchConfig::default()
    })
    .expect("client builds")
}

#[test]
fn sitemap_index_extracts_child_sitemaps() {
    let xml = r#"
    <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
      <sitemap><loc>https://example.com/a.xml</loc></sitemap>
      <sitemap><loc>https://example.com/b.xml</loc></sitemap>
    </sitemapindex>
    "#;
    let (children, urls) = parse_sitemap(xml);
    assert_eq!(
        children,
        vec!["https://example.com/a.xml", "https://example.com/b.xml"]
    );
    assert!(urls.is_empty());
}

#[test]
fn urlset_extracts_locs() {
    let xml = r#"
    <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
      <url><loc>https://example.com/product/abc</loc></url>
      <url><loc>https://example.com/blog/post</loc></url>
    </urlset>
    "#;
    let (children, urls) = parse_sitemap(xml);
    assert!(children.is_empty());
    assert_eq!(
        urls,
        vec![
            "https://example.com/product/abc",
            "https://example.com/blog/post"
        ]
    );
}

#[test]
fn url_filter_applies_scheme_host_include_exclude_suffix() {
    let mut config = config_for("https://example.com");

    assert!(default_is_candidate_product_url(
        "https://example.com/product/abc",
        &config
    ));
    // wrong host
    assert!(!default_is_candidate_product_url(
        "https://other.com/product/abc",
        &config
    ));
    // excluded path
    assert!(!default_is_candidate_product_url(
        "https://example.com/blog/product/abc",
        &config
    ));
    // no include pattern
    assert!(!default_is_candidate_product_url(
        "https://example.com/stores/auckland",
        &config
    ));
    // non-http scheme
    assert!(!default_is_candidate_product_url(
        "ftp://example.com/product/abc",
        &config
    ));

    config.require_file_suffix = Some(".html".to_string());
    assert!(!default_is_candidate_product_url(
        "https://example.com/product/abc",
        &config
    ));
    assert!(default_is_candidate_product_url(
        "https://example.com/product/abc.html",
        &config
    ));
}

#[test]
fn url_filter_is_idempotent() {
    let config = config_for("https://example.com");
    let pool = vec![
        "https://example.com/product/abc".to_string(),
        "https://example.com/blog/product".to_string(),
        "https://other.com/product/x".to_string(),
        "https://example.com/product/def".to_string(),
    ];

    let once: Vec<String> = pool
        .iter()
        .filter(|url| default_is_candidate_product_url(url, &config))
        .cloned()
        .collect();
    let twice: Vec<String> = once
        .iter()
        .filter(|url| default_is_candidate_product_url(url, &config))
        .cloned()
        .collect();
    assert_eq!(once, twice);
}

#[tokio::test]
async fn discovers_urls_from_robots_and_sitemaps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /cart\nSitemap: {}/products.xml\n",
            server.uri()
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<urlset><url><loc>{0}/product/abc</loc></url><url><loc>{0}/blog/post</loc></url></urlset>",
            server.uri()
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let outcome = discover_product_urls(&fetcher(), &config, &DefaultHooks).await;
    assert_eq!(outcome.urls, vec![format!("{}/product/abc", server.uri())]);
    assert!(outcome.failure_reason.is_none());
}

#[tokio::test]
async fn html_crawl_fallback_when_sitemaps_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
              <a href="/product/abc">A</a>
              <a href="/product/def?x=1">B</a>
              <a href="/category/supplements">Supplements</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/category/supplements"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><a href="/product/ghi">C</a></body></html>"#),
        )
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let outcome = discover_product_urls(&fetcher(), &config, &DefaultHooks).await;
    assert_eq!(
        outcome.urls,
        vec![
            format!("{}/product/abc", server.uri()),
            format!("{}/product/def", server.uri()),
            format!("{}/product/ghi", server.uri()),
        ]
    );
}

#[tokio::test]
async fn rate_limited_discovery_reports_anti_bot_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let outcome = discover_product_urls(&fetcher(), &config, &DefaultHooks).await;
    assert!(outcome.urls.is_empty());
    assert_eq!(
        outcome.failure_reason.as_deref(),
        Some("source returned HTTP 429 anti-bot challenges")
    );
}

#[tokio::test]
async fn missing_sitemaps_report_http_404_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let outcome = discover_product_urls(&fetcher(), &config, &DefaultHooks).await;
    assert!(outcome.urls.is_empty());
    assert_eq!(
        outcome.failure_reason.as_deref(),
        Some("configured sitemap endpoints returned HTTP 404")
    );
}
