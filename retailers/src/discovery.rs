use std::collections::{HashSet, VecDeque};

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use common::vertical::Vertical;
use crawler::fetcher::PageFetcher;

use crate::adapter::AdapterHooks;
use crate::config::AdapterConfig;

/// Cap on pages visited by the last-resort HTML crawl.
const MAX_CRAWL_PAGES: usize = 14;

/// Path tokens that mark internal browse pages worth crawling onward.
const BROWSE_TOKENS: &[&str] = &[
    "shop",
    "category",
    "categories",
    "collection",
    "collections",
    "brand",
    "brands",
    "sale",
];

pub struct DiscoveryOutcome {
    pub urls: Vec<String>,
    /// Human-readable reason when `urls` is empty, so the adapter can pick
    /// between fixture fallback and hard failure.
    pub failure_reason: Option<String>,
}

/// Produces the ordered candidate product-URL pool for one retailer:
/// robots-declared sitemaps and configured seeds, walked breadth-first,
/// falling back to a small HTML crawl when no sitemap yields anything.
pub(crate) async fn discover_product_urls(
    fetcher: &PageFetcher,
    config: &AdapterConfig,
    hooks: &dyn AdapterHooks,
) -> DiscoveryOutcome {
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.extend(robots_sitemaps(fetcher, &config.base_url).await);
    for seed in &config.sitemap_seeds {
        if let Some(resolved) = resolve(&config.base_url, seed) {
            queue.push_back(resolved);
        }
    }

    let mut seen_sitemaps: HashSet<String> = HashSet::new();
    let mut found: Vec<String> = Vec::new();
    let mut challenge_hits = 0usize;
    let mut not_found_hits = 0usize;

    while let Some(sitemap_url) = queue.pop_front() {
        if found.len() >= config.max_products * 4 {
            break;
        }
        if !seen_sitemaps.insert(sitemap_url.clone()) {
            continue;
        }

        let xml = match fetcher.fetch_sitemap(&sitemap_url).await {
            Ok(xml) => xml,
            Err(err) => {
                if err.is_challenge() || err.status() == Some(429) {
                    challenge_hits += 1;
                } else if err.status() == Some(404) {
                    not_found_hits += 1;
                }
                debug!(sitemap_url = %sitemap_url, slug = %config.slug, error = %err, "skipping sitemap");
                continue;
            }
        };

        let (child_sitemaps, urls) = parse_sitemap(&xml);
        for child in child_sitemaps {
            if !seen_sitemaps.contains(&child) {
                queue.push_back(child);
            }
        }
        for url in urls {
            if hooks.is_candidate_product_url(&url, config) {
                found.push(url);
            }
        }
    }

    let mut deduped: Vec<String> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    for url in found {
        if seen_urls.insert(url.clone()) {
            deduped.push(url);
            if deduped.len() >= config.max_products {
                break;
            }
        }
    }

    if !deduped.is_empty() {
        return DiscoveryOutcome {
            urls: deduped,
            failure_reason: None,
        };
    }

    let crawled = discover_from_html(fetcher, config, hooks).await;
    if !crawled.is_empty() {
        return DiscoveryOutcome {
            urls: crawled,
            failure_reason: None,
        };
    }

    let failure_reason = if challenge_hits > 0 {
        "source returned HTTP 429 anti-bot challenges"
    } else if not_found_hits > 0 {
        "configured sitemap endpoints returned HTTP 404"
    } else {
        "no sitemap or homepage product links were discoverable"
    };

    DiscoveryOutcome {
        urls: Vec::new(),
        failure_reason: Some(failure_reason.to_string()),
    }
}

async fn robots_sitemaps(fetcher: &PageFetcher, base_url: &str) -> Vec<String> {
    let Some(robots_url) = resolve(base_url, "/robots.txt") else {
        return Vec::new();
    };
    let Ok(robots_text) = fetcher.fetch_text(&robots_url).await else {
        return Vec::new();
    };

    robots_text
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            if !key.trim().eq_ignore_ascii_case("sitemap") {
                return None;
            }
            let sitemap_url = value.trim();
            if sitemap_url.is_empty() {
                None
            } else {
                Some(sitemap_url.to_string())
            }
        })
        .collect()
}

/// Splits a sitemap document into child sitemaps (index form) and page
/// URLs (urlset form). Unparseable payloads yield nothing.
pub(crate) fn parse_sitemap(xml: &str) -> (Vec<String>, Vec<String>) {
    let doc = Html::parse_document(xml);
    let index_selector = Selector::parse("sitemapindex sitemap > loc").unwrap();
    let urlset_selector = Selector::parse("urlset url > loc").unwrap();

    let child_sitemaps = doc
        .select(&index_selector)
        .map(|loc| loc.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect();
    let urls = doc
        .select(&urlset_selector)
        .map(|loc| loc.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect();

    (child_sitemaps, urls)
}

/// Crawls a handful of internal pages starting at the base URL, keeping
/// product-looking anchors and following browse-looking ones.
async fn discover_from_html(
    fetcher: &PageFetcher,
    config: &AdapterConfig,
    hooks: &dyn AdapterHooks,
) -> Vec<String> {
    let mut queue: VecDeque<String> = VecDeque::from([config.base_url.clone()]);
    let mut visited: HashSet<String> = HashSet::new();
    let mut found: Vec<String> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    let browse_tokens = browse_tokens_for(config.vertical);

    while let Some(page_url) = queue.pop_front() {
        if visited.len() >= MAX_CRAWL_PAGES || found.len() >= config.max_products {
            break;
        }
        if !visited.insert(page_url.clone()) {
            continue;
        }

        let Ok(html) = fetcher.fetch_text(&page_url).await else {
            continue;
        };

        let (products, browse) =
            classify_anchors(&html, &page_url, config, hooks, &browse_tokens);
        for url in products {
            if seen_urls.insert(url.clone()) {
                found.push(url);
                if found.len() >= config.max_products {
                    break;
                }
            }
        }
        for url in browse {
            if !visited.contains(&url) && !queue.contains(&url) {
                queue.push_back(url);
            }
        }
    }

    found
}

fn classify_anchors(
    html: &str,
    page_url: &str,
    config: &AdapterConfig,
    hooks: &dyn AdapterHooks,
    browse_tokens: &[String],
) -> (Vec<String>, Vec<String>) {
    let doc = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();
    let base_host = host_of(&config.base_url);

    let mut products = Vec::new();
    let mut browse = Vec::new();

    for anchor in doc.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve(page_url, href) else {
            continue;
        };
        let Some(normalized) = normalize_page_url(&resolved) else {
            continue;
        };

        if hooks.is_candidate_product_url(&normalized, config) {
            products.push(normalized);
            continue;
        }

        if host_of(&normalized) == base_host {
            let path = path_of(&normalized).to_lowercase();
            if browse_tokens.iter().any(|token| path.contains(token)) {
                browse.push(normalized);
            }
        }
    }

    (products, browse)
}

fn browse_tokens_for(vertical: Vertical) -> Vec<String> {
    let mut tokens: Vec<String> = BROWSE_TOKENS.iter().map(|token| token.to_string()).collect();
    let vertical_tokens: &[&str] = match vertical {
        Vertical::Tech => &["tech", "computers", "electronics"],
        Vertical::Pharma => &["pharmacy", "health", "medicine"],
        Vertical::Beauty => &["beauty", "skincare", "makeup"],
        Vertical::HomeAppliances => &["appliance", "whiteware", "kitchen"],
        Vertical::Supplements => &["supplement", "vitamin", "nutrition"],
        Vertical::PetGoods => &["pet", "dog", "cat"],
    };
    tokens.extend(vertical_tokens.iter().map(|token| token.to_string()));
    tokens
}

/// Default URL candidacy: http(s), same host as the base URL, no exclude
/// substring, at least one include substring, suffix honored. Queries and
/// fragments are dropped before matching.
pub(crate) fn default_is_candidate_product_url(url: &str, config: &AdapterConfig) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    if host_of(&config.base_url) != host.to_lowercase() {
        return false;
    }

    let normalized = format!("{}://{}{}", parsed.scheme(), host, parsed.path()).to_lowercase();
    let path = parsed.path().to_lowercase();

    if config
        .exclude_url_patterns
        .iter()
        .any(|pattern| normalized.contains(&pattern.to_lowercase()))
    {
        return false;
    }
    if let Some(suffix) = &config.require_file_suffix
        && !path.ends_with(&suffix.to_lowercase())
    {
        return false;
    }
    config
        .include_url_patterns
        .iter()
        .any(|pattern| normalized.contains(&pattern.to_lowercase()))
}

/// scheme://host/path with query and fragment dropped.
pub(crate) fn normalize_page_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}://{}{}", parsed.scheme(), host, parsed.path()))
}

fn resolve(base: &str, reference: &str) -> Option<String> {
    Url::parse(base)
        .and_then(|parsed| parsed.join(reference))
        .map(|joined| joined.to_string())
        .ok()
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_lowercase()))
        .unwrap_or_default()
}

fn path_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
