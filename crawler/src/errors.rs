use thiserror::Error;

/// Fetch failures come in three caller-visible kinds: transient (worth
/// retrying), anti-bot challenge (worth escalating to the browser), and
/// permanent. Callers branch on the variant, never on message text.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("retryable HTTP status {status} from {url}")]
    RetryableStatus { status: u16, url: String },
    #[error("HTTP status {status} from {url}")]
    PermanentStatus { status: u16, url: String },
    #[error("anti-bot challenge served for {url}")]
    Challenge { url: String },
    #[error("browser render failed for {url}: {reason}")]
    Browser { url: String, reason: String },
    #[error("browser fallback is not configured")]
    BrowserUnavailable,
    #[error("failed to construct HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// Transient errors are retried with backoff before being surfaced.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Transport { .. }
                | FetchError::RetryableStatus { .. }
                | FetchError::Challenge { .. }
        )
    }

    pub fn is_challenge(&self) -> bool {
        matches!(self, FetchError::Challenge { .. })
    }

    /// The HTTP status behind the error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::RetryableStatus { status, .. }
            | FetchError::PermanentStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
