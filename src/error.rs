use thiserror::Error;

/// Errors that abort a crawl before it starts
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The domain could not be used as a crawl root
    #[error("invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built
    #[error("failed to create fetcher: {0}")]
    Client(#[from] FetchError),
}

impl SitemapError {
    pub(crate) fn invalid_domain(domain: &str, reason: impl Into<String>) -> Self {
        SitemapError::InvalidDomain {
            domain: domain.to_string(),
            reason: reason.into(),
        }
    }
}

/// Per-URL retrieval failures. The crawler drops the URL and carries on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {0} timed out")]
    Timeout(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    /// Only produced by fetchers without a network behind them
    #[error("no response available for {0}")]
    NotFound(String),
}

/// Failures loading a [`crate::config::CrawlerConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
