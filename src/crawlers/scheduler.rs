use crate::crawlers::fetcher::{FetchResponse, Fetcher};
use crate::error::FetchError;
use crate::parsers::{self, ContentKind};
use crate::registry::PageRegistry;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Canonical path every crawl starts from
pub const ROOT_PATH: &str = "/";

/// FIFO of discovered paths plus an index of every path ever enqueued.
///
/// A path enters the frontier at most once over the whole crawl, so nothing
/// is fetched twice, whether it is queued, in flight, registered or dropped.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    enqueued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `path` unless it has been enqueued before. Returns whether it
    /// was added.
    pub fn push(&mut self, path: &str) -> bool {
        if self.enqueued.contains(path) {
            return false;
        }
        self.enqueued.insert(path.to_string());
        self.queue.push_back(path.to_string());
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Paths waiting to be fetched
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn was_enqueued(&self, path: &str) -> bool {
        self.enqueued.contains(path)
    }
}

/// Why a fetched URL did not become a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    FetchFailed(FetchError),
    /// Anything other than exactly `200`
    BadStatus(u16),
    UnsupportedContentType(String),
    /// Registered by an earlier response
    Duplicate,
}

/// Counters describing how a crawl went
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Fetch attempts issued
    pub fetched: usize,
    pub registered: usize,
    pub fetch_failed: usize,
    pub bad_status: usize,
    pub unsupported_content: usize,
    pub duplicates: usize,
}

impl CrawlStats {
    fn record_drop(&mut self, reason: &DropReason) {
        match reason {
            DropReason::FetchFailed(_) => self.fetch_failed += 1,
            DropReason::BadStatus(_) => self.bad_status += 1,
            DropReason::UnsupportedContentType(_) => self.unsupported_content += 1,
            DropReason::Duplicate => self.duplicates += 1,
        }
    }
}

/// Breadth-first traversal of one domain.
///
/// The scheduler alone owns the frontier and the registry; fetches may run
/// concurrently, but every registration and enqueue decision happens on the
/// scheduler's own task, one response at a time.
pub struct Scheduler {
    domain: String,
    fetcher: Arc<dyn Fetcher>,
    max_concurrency: usize,
    frontier: Frontier,
    registry: PageRegistry,
    stats: CrawlStats,
}

impl Scheduler {
    /// `domain` must already be normalized (`scheme://host[:port]`, no
    /// trailing slash).
    pub fn new(domain: &str, fetcher: Arc<dyn Fetcher>, max_concurrency: usize) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(ROOT_PATH);

        Self {
            domain: domain.to_string(),
            fetcher,
            max_concurrency: max_concurrency.max(1),
            frontier,
            registry: PageRegistry::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Crawls until no discovered path is left, returning every registered
    /// page and the crawl counters.
    pub async fn run(mut self) -> (PageRegistry, CrawlStats) {
        ::log::info!(
            "Starting crawl of {} with up to {} concurrent fetches",
            self.domain,
            self.max_concurrency
        );

        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < self.max_concurrency {
                let Some(path) = self.frontier.pop() else {
                    break;
                };
                let url = self.absolute_url(&path);
                let fetcher = Arc::clone(&self.fetcher);
                self.stats.fetched += 1;
                ::log::debug!("Fetching {}", url);

                in_flight.push(async move {
                    let result = fetcher.fetch(&url).await;
                    (path, result)
                });
            }

            let Some((path, result)) = in_flight.next().await else {
                break;
            };
            self.handle_response(&path, result);
        }

        ::log::info!(
            "Crawl of {} complete: {} pages from {} fetches",
            self.domain,
            self.registry.len(),
            self.stats.fetched
        );

        (self.registry, self.stats)
    }

    /// `domain` joined with `path`, query and fragment removed
    fn absolute_url(&self, path: &str) -> String {
        let end = path.find(['?', '#']).unwrap_or(path.len());
        format!("{}{}", self.domain, &path[..end])
    }

    fn handle_response(&mut self, path: &str, result: Result<FetchResponse, FetchError>) {
        let body = match qualify(result) {
            Ok(body) => body,
            Err(reason) => {
                self.drop_path(path, reason);
                return;
            }
        };

        let page = parsers::extract(&self.domain, path, &body);
        let discovered: Vec<String> = page
            .internal_links()
            .iter()
            .map(|link| link.url.clone())
            .collect();

        if !self.registry.register(path, page) {
            self.drop_path(path, DropReason::Duplicate);
            return;
        }
        self.stats.registered += 1;
        ::log::info!("Registered page {} ({} registered)", path, self.registry.len());

        for link in discovered {
            if self.registry.contains(&link) {
                continue;
            }
            if self.frontier.push(&link) {
                ::log::debug!("Queued {} (discovered on {})", link, path);
            }
        }
    }

    fn drop_path(&mut self, path: &str, reason: DropReason) {
        match &reason {
            DropReason::FetchFailed(error) => {
                ::log::warn!("Failed to fetch {}{}: {}", self.domain, path, error);
            }
            DropReason::BadStatus(status) => {
                ::log::warn!("Skipping {}: HTTP {}", path, status);
            }
            DropReason::UnsupportedContentType(content_type) => {
                ::log::debug!("Skipping {}: content type '{}'", path, content_type);
            }
            DropReason::Duplicate => {
                ::log::trace!("Skipping {}: already registered", path);
            }
        }
        self.stats.record_drop(&reason);
    }
}

/// Returns the body of a response worth extracting
fn qualify(result: Result<FetchResponse, FetchError>) -> Result<String, DropReason> {
    let response = result.map_err(DropReason::FetchFailed)?;

    if response.status != 200 {
        return Err(DropReason::BadStatus(response.status));
    }

    if !ContentKind::from_content_type(&response.content_type).should_extract() {
        return Err(DropReason::UnsupportedContentType(response.content_type));
    }

    Ok(response.body)
}
