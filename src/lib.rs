#![allow(clippy::too_many_arguments)]

//! Same-domain crawler that maps every page reachable from a site's root:
//! titles, static assets, form actions and links.

pub mod config;
pub mod crawlers;
pub mod error;
pub mod normalize;
pub mod parsers;
pub mod registry;
pub mod results;
pub mod sitemap;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::CrawlerConfig;
pub use crawlers::{FetchResponse, Fetcher, HttpFetcher, MemoryFetcher};
pub use error::{ConfigError, FetchError, SitemapError};
pub use results::{Link, OtherLink, Page};
pub use sitemap::{Domain, Sitemap};

use std::path::Path;
use std::sync::Arc;

/// Builder that configures and runs a crawl
pub struct SitemapBuilder {
    domain: String,
    config: CrawlerConfig,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl SitemapBuilder {
    /// Create a new builder for the given domain root (including `http(s)://`)
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            config: CrawlerConfig::default(),
            fetcher: None,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: CrawlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, SitemapError> {
        let config = CrawlerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self, SitemapError> {
        let config = CrawlerConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Override the max concurrency setting
    pub fn with_max_concurrency(mut self, value: usize) -> Self {
        self.config.max_concurrency = value;
        self
    }

    /// Override the per-request timeout
    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout_secs = seconds;
        self
    }

    /// Use this fetcher instead of an HTTP client built from the configuration
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Validate the domain and crawl it to completion
    pub async fn build(self) -> Result<Sitemap, SitemapError> {
        let domain = Domain::parse(&self.domain)?;

        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&self.config)?),
        };

        Ok(Sitemap::crawl_domain(domain, fetcher, self.config.effective_concurrency()).await)
    }
}
