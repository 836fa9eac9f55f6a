use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a sitemap crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of fetches in flight at once (1 = strictly sequential)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-request timeout for the HTTP fetcher
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Redirects followed per request before giving up
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            request_timeout_secs: default_request_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Concurrency actually used by the scheduler; zero means one
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    1
}

/// Default value for request_timeout_secs
fn default_request_timeout_secs() -> u64 {
    30
}

/// Default value for max_redirects
fn default_max_redirects() -> usize {
    10
}

/// Default value for user_agent
fn default_user_agent() -> String {
    format!("site-mapper/{}", env!("CARGO_PKG_VERSION"))
}
