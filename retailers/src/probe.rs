use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use common::vertical::Vertical;
use crawler::fetcher::PageFetcher;

use crate::extract::extract_price_only;

/// How many discovered URLs the probe samples before giving a verdict.
const PROBE_SAMPLE: usize = 15;
const PROBE_SUCCESS_TARGET: usize = 2;

static NOT_FOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)page not found|we can['’]?t find (?:this|that) page|we couldn['’]?t find")
        .unwrap()
});

pub(crate) struct ProbeOutcome {
    pub ok: bool,
    pub reason: Option<String>,
    /// On success, the pool reordered so proven-parseable URLs come first.
    pub urls: Vec<String>,
}

/// Samples a prefix of the discovery pool to verify product pages are
/// actually parseable today, before the run commits to a live pass.
pub(crate) async fn probe_live_urls(
    fetcher: &PageFetcher,
    urls: Vec<String>,
    vertical: Vertical,
) -> ProbeOutcome {
    let mut blocked = 0usize;
    let mut parse_failures = 0usize;
    let mut price_failures = 0usize;
    let mut successes: Vec<String> = Vec::new();

    for url in urls.iter().take(PROBE_SAMPLE) {
        if successes.len() >= PROBE_SUCCESS_TARGET {
            break;
        }

        match fetcher.fetch_text(url).await {
            Err(err) if err.is_challenge() => {
                debug!(url = %url, "probe URL blocked by challenge");
                blocked += 1;
            }
            Err(err) => {
                debug!(url = %url, error = %err, "probe URL unreachable");
                parse_failures += 1;
            }
            Ok(body) => {
                if NOT_FOUND_RE.is_match(&body) {
                    parse_failures += 1;
                } else if extract_price_only(&body, vertical) > 0.0 {
                    successes.push(url.clone());
                } else {
                    price_failures += 1;
                }
            }
        }
    }

    if !successes.is_empty() {
        let mut ordered = successes.clone();
        let remaining: Vec<String> = urls
            .into_iter()
            .filter(|url| !successes.contains(url))
            .collect();
        ordered.extend(remaining);
        return ProbeOutcome {
            ok: true,
            reason: None,
            urls: ordered,
        };
    }

    let reason = if blocked > 0 {
        "live product pages blocked by anti-bot/WAF"
    } else if price_failures > 0 {
        "live product pages reachable but price extraction failed"
    } else if parse_failures > 0 {
        "live product pages returned unparseable content"
    } else {
        "live probe could not validate any product pages"
    };

    ProbeOutcome {
        ok: false,
        reason: Some(reason.to_string()),
        urls,
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
