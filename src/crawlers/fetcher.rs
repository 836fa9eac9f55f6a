use crate::config::CrawlerConfig;
use crate::error::FetchError;
use crate::parsers::ContentKind;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// What the crawler needs to know about one HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// A `200 text/html` response
    pub fn html(body: impl Into<String>) -> Self {
        Self::new(200, "text/html; charset=utf-8", body)
    }
}

/// Retrieves documents by absolute URL.
///
/// Timeouts, redirects and TLS are the implementation's business; anything
/// that goes wrong is reported as a [`FetchError`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// [`Fetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        // Bodies the crawler will never parse are not downloaded
        if status != 200 || !ContentKind::from_content_type(&content_type).should_extract() {
            return Ok(FetchResponse::new(status, content_type, String::new()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchResponse::new(status, content_type, body))
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else if error.is_builder() {
        FetchError::InvalidUrl(url.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

/// In-memory [`Fetcher`] serving canned responses. Every request is recorded,
/// which makes it handy for checking what a crawl actually fetched.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, FetchResponse>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` as a `200 text/html` page at `url`
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.with_response(url, FetchResponse::html(html))
    }

    pub fn with_response(mut self, url: &str, response: FetchResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Every URL requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `url` was requested
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|requested| requested.as_str() == url)
            .count()
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_fetcher_serves_and_records() {
        let fetcher = MemoryFetcher::new()
            .with_page("http://example.com/", "<title>Home</title>")
            .with_response(
                "http://example.com/missing",
                FetchResponse::new(404, "text/html", "gone"),
            );

        let response = fetcher.fetch("http://example.com/").await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.content_type.contains("html"));
        assert_eq!(response.body, "<title>Home</title>");

        let response = fetcher.fetch("http://example.com/missing").await.unwrap();
        assert_eq!(response.status, 404);

        let err = fetcher.fetch("http://example.com/nope").await.unwrap_err();
        assert_eq!(err, FetchError::NotFound("http://example.com/nope".to_string()));

        assert_eq!(fetcher.requests().len(), 3);
        assert_eq!(fetcher.request_count("http://example.com/"), 1);
    }

    #[test]
    fn test_http_fetcher_builds_from_config() {
        assert!(HttpFetcher::new(&CrawlerConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_invalid_url() {
        let fetcher = HttpFetcher::new(&CrawlerConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
