use std::time::Duration;

use async_trait::async_trait;

use crate::errors::FetchError;

/// External "render URL, return HTML" capability backed by a headless
/// browser. The driver process supplies the implementation; the core only
/// consumes rendered text.
#[async_trait]
pub trait BrowserFetcher: Send + Sync {
    async fn fetch_page_html(
        &self,
        url: &str,
        timeout: Duration,
        user_agent: Option<&str>,
        proxy_url: Option<&str>,
    ) -> Result<String, FetchError>;
}

/// Per-adapter browser escalation settings. The browser proxy may differ
/// from the plain HTTP proxy.
#[derive(Clone, Debug)]
pub struct BrowserConfig {
    pub timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            proxy_url: None,
        }
    }
}
