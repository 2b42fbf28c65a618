use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlerError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("crawl timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// The browser session failed after it was started.
    #[error("browser automation failed: {0}")]
    Browser(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize crawl report: {0}")]
    Serialize(#[from] serde_json::Error),
}
