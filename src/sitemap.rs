use crate::crawlers::{CrawlStats, Fetcher, Scheduler};
use crate::error::SitemapError;
use crate::registry::PageRegistry;
use crate::results::{Link, OtherLink, Page};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Root of a crawl: `scheme://host[:port]`, lower-cased, no path and no
/// trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// Normalizes a user-supplied domain. Anything after the authority is
    /// discarded; a missing or non-HTTP scheme is an error.
    pub fn parse(raw: &str) -> Result<Self, SitemapError> {
        let url = Url::parse(raw.trim()).map_err(|e| match e {
            url::ParseError::RelativeUrlWithoutBase => {
                SitemapError::invalid_domain(raw, "domain name must include \"http(s)://\"")
            }
            other => SitemapError::invalid_domain(raw, other.to_string()),
        })?;

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(SitemapError::invalid_domain(
                raw,
                format!("unsupported scheme '{scheme}'"),
            ));
        }

        let host = url
            .host_str()
            .ok_or_else(|| SitemapError::invalid_domain(raw, "missing host"))?;

        let origin = match url.port() {
            Some(port) => format!("{scheme}://{host}:{port}"),
            None => format!("{scheme}://{host}"),
        };

        Ok(Self(origin.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every page reachable from the root of one domain.
///
/// Building a `Sitemap` runs the whole crawl; once returned it is read-only.
#[derive(Debug, Clone)]
pub struct Sitemap {
    domain: Domain,
    registry: PageRegistry,
    stats: CrawlStats,
}

impl Sitemap {
    /// Crawls `domain` to completion.
    ///
    /// Only an unusable domain is an error. Pages that cannot be fetched or
    /// are not HTML are left out of the result.
    pub async fn crawl(
        domain: &str,
        fetcher: Arc<dyn Fetcher>,
        max_concurrency: usize,
    ) -> Result<Self, SitemapError> {
        let domain = Domain::parse(domain)?;
        Ok(Self::crawl_domain(domain, fetcher, max_concurrency).await)
    }

    /// Crawls an already validated domain
    pub async fn crawl_domain(
        domain: Domain,
        fetcher: Arc<dyn Fetcher>,
        max_concurrency: usize,
    ) -> Self {
        let (registry, stats) = Scheduler::new(domain.as_str(), fetcher, max_concurrency)
            .run()
            .await;

        Self {
            domain,
            registry,
            stats,
        }
    }

    pub fn domain(&self) -> &str {
        self.domain.as_str()
    }

    /// Pages in the order they were registered
    pub fn pages(&self) -> &[Page] {
        self.registry.snapshot()
    }

    pub fn get(&self, url: &str) -> Option<&Page> {
        self.registry.get(url)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Diagnostic counters; not part of the serialized sitemap
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Sitemap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Sitemap", 2)?;
        state.serialize_field("domain", self.domain.as_str())?;
        state.serialize_field("pages", self.pages())?;
        state.end()
    }
}

impl fmt::Display for Sitemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sitemap for {}:", self.domain)?;

        for page in self.pages() {
            writeln!(f, "\t-> {} ({})", page.title(), page.url())?;

            write_section(f, "Static assets", page.assets().iter().cloned())?;

            let mut links: Vec<&Link> = page.links().collect();
            links.sort();
            write_section(f, "Links", links.into_iter().map(format_link))?;

            write_section(f, "Actions", page.actions().iter().cloned())?;

            write_section(f, "Other links", page.other_links().iter().map(format_other_link))?;
        }

        Ok(())
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    items: impl Iterator<Item = String>,
) -> fmt::Result {
    writeln!(f, "\t   {heading}:")?;

    let mut empty = true;
    for item in items {
        empty = false;
        writeln!(f, "\t\t{item}")?;
    }
    if empty {
        writeln!(f, "\t\tNone.")?;
    }

    Ok(())
}

fn format_link(link: &Link) -> String {
    if link.text.is_empty() {
        link.url.clone()
    } else {
        format!("{} ({})", link.url, link.text)
    }
}

fn format_other_link(link: &OtherLink) -> String {
    match &link.rel {
        Some(rel) => format!("{} [{}]", link.url, rel),
        None => link.url.clone(),
    }
}
