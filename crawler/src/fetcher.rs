use std::io::Read;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use flate2::read::GzDecoder;
use reqwest::{Client, ClientBuilder, Proxy};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::browser::{BrowserConfig, BrowserFetcher};
use crate::challenge::looks_like_bot_challenge;
use crate::errors::FetchError;

/// Honest bot identity: project, purpose, contact.
pub const BOT_USER_AGENT: &str =
    "PriceLensBot/1.0 (+https://pricelens.nz; research-price-comparison; contact=ops@pricelens.nz)";

/// Statuses worth another attempt. 403 is included because the WAFs in
/// front of several sources serve it for rate pressure, not authorization.
const RETRYABLE_HTTP_STATUSES: [u16; 8] = [403, 408, 425, 429, 500, 502, 503, 504];

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Minimum gap between requests issued by this fetcher.
    pub request_delay: Duration,
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `retry_backoff * 2^attempt`.
    pub retry_backoff: Duration,
    pub proxy_url: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: BOT_USER_AGENT.to_string(),
            request_delay: Duration::ZERO,
            max_retries: 2,
            retry_backoff: Duration::from_millis(600),
            proxy_url: None,
        }
    }
}

struct Payload {
    bytes: Vec<u8>,
    content_type: String,
}

/// Retrieves page text with retries, backoff, pacing and challenge
/// classification. One fetcher per adapter; never shared across runs.
pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
    last_request_at: Mutex<Option<Instant>>,
}

impl PageFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(Proxy::all(proxy_url).map_err(FetchError::ClientBuild)?);
        }

        let client = builder.build().map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            config,
            last_request_at: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let payload = self.fetch_raw(url).await?;
        Ok(String::from_utf8_lossy(&payload.bytes).into_owned())
    }

    /// Like `fetch_text`, but transparently decompresses gzip payloads when
    /// the URL ends in `.gz` or the content type says gzip. Sitemap servers
    /// routinely serve raw gzip bodies without a Content-Encoding header.
    pub async fn fetch_sitemap(&self, url: &str) -> Result<String, FetchError> {
        let payload = self.fetch_raw(url).await?;

        let gzipped =
            url.to_lowercase().ends_with(".gz") || payload.content_type.contains("gzip");
        let bytes = if gzipped {
            let mut decoded = Vec::new();
            let mut decoder = GzDecoder::new(payload.bytes.as_slice());
            match decoder.read_to_end(&mut decoded) {
                Ok(_) => decoded,
                Err(err) => {
                    debug!(url, error = %err, "sitemap looked gzipped but did not decompress, using raw payload");
                    payload.bytes
                }
            }
        } else {
            payload.bytes
        };

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Browser escalation: when the plain fetch fails (including persistent
    /// challenges) and a browser capability is wired in, render the page
    /// instead. A render that still looks like a challenge re-raises the
    /// original fetch error.
    pub async fn fetch_text_or_render(
        &self,
        url: &str,
        browser: Option<&dyn BrowserFetcher>,
        browser_config: &BrowserConfig,
    ) -> Result<String, FetchError> {
        let original = match self.fetch_text(url).await {
            Ok(body) => return Ok(body),
            Err(err) => err,
        };

        let Some(browser) = browser else {
            return Err(original);
        };

        warn!(url, error = %original, "plain fetch failed, escalating to browser render");

        let rendered = match browser
            .fetch_page_html(
                url,
                browser_config.timeout,
                Some(&self.config.user_agent),
                browser_config.proxy_url.as_deref(),
            )
            .await
        {
            Ok(html) => html,
            Err(render_error) => {
                debug!(url, error = %render_error, "browser render failed");
                return Err(original);
            }
        };

        if looks_like_bot_challenge(&rendered) {
            return Err(original);
        }

        Ok(rendered)
    }

    async fn fetch_raw(&self, url: &str) -> Result<Payload, FetchError> {
        let attempts = self.config.max_retries + 1;
        let mut last_error: Option<FetchError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let backoff = self.config.retry_backoff * 2u32.pow(attempt - 1);
                if !backoff.is_zero() {
                    sleep(backoff).await;
                }
                debug!(url, attempt, "retrying fetch");
            }

            self.pace().await;
            let result = self.client.get(url).send().await;
            self.mark_request();

            let error = match result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if RETRYABLE_HTTP_STATUSES.contains(&status) {
                        FetchError::RetryableStatus {
                            status,
                            url: url.to_string(),
                        }
                    } else if !response.status().is_success() {
                        return Err(FetchError::PermanentStatus {
                            status,
                            url: url.to_string(),
                        });
                    } else {
                        let content_type = response
                            .headers()
                            .get(reqwest::header::CONTENT_TYPE)
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or("")
                            .to_lowercase();

                        match response.bytes().await {
                            Ok(bytes) => {
                                let body = String::from_utf8_lossy(&bytes);
                                if looks_like_bot_challenge(&body) {
                                    FetchError::Challenge {
                                        url: url.to_string(),
                                    }
                                } else {
                                    return Ok(Payload {
                                        bytes: bytes.to_vec(),
                                        content_type,
                                    });
                                }
                            }
                            Err(source) => FetchError::Transport {
                                url: url.to_string(),
                                source,
                            },
                        }
                    }
                }
                Err(source) => FetchError::Transport {
                    url: url.to_string(),
                    source,
                },
            };

            debug!(url, error = %error, "fetch attempt failed");
            last_error = Some(error);
        }

        Err(last_error.expect("at least one fetch attempt runs"))
    }

    async fn pace(&self) {
        if self.config.request_delay.is_zero() {
            return;
        }

        let wait = {
            let last = self.last_request_at.lock().unwrap();
            last.map(|at| self.config.request_delay.saturating_sub(at.elapsed()))
        };

        if let Some(wait) = wait
            && !wait.is_zero()
        {
            sleep(wait).await;
        }
    }

    fn mark_request(&self) {
        *self.last_request_at.lock().unwrap() = Some(Instant::now());
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
