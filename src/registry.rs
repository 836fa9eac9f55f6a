use crate::results::Page;
use std::collections::HashMap;

/// Write-once store of crawled pages, keyed by canonical URL and kept in
/// registration order.
#[derive(Debug, Default, Clone)]
pub struct PageRegistry {
    index: HashMap<String, usize>,
    pages: Vec<Page>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `page` under `url` if nothing is registered there yet.
    ///
    /// Returns false, leaving the registry untouched, when `url` is already
    /// present.
    pub fn register(&mut self, url: &str, page: Page) -> bool {
        if self.index.contains_key(url) {
            ::log::trace!("Page already registered: {}", url);
            return false;
        }
        debug_assert_eq!(url, page.url(), "registry key must match the page URL");

        self.index.insert(url.to_string(), self.pages.len());
        self.pages.push(page);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&Page> {
        self.index.get(url).map(|&i| &self.pages[i])
    }

    /// All pages in the order they were registered
    pub fn snapshot(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::extract;

    fn page(url: &str, html: &str) -> Page {
        extract("http://example.com", url, html)
    }

    #[test]
    fn test_register_new_urls_in_order() {
        let mut registry = PageRegistry::new();
        assert!(registry.register("/", page("/", "<title>Home</title>")));
        assert!(registry.register("/about", page("/about", "<title>About</title>")));

        let urls: Vec<_> = registry.snapshot().iter().map(Page::url).collect();
        assert_eq!(urls, vec!["/", "/about"]);
        assert!(registry.contains("/about"));
        assert!(!registry.contains("/missing"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = PageRegistry::new();
        assert!(registry.register("/", page("/", "<title>First</title>")));
        assert!(!registry.register("/", page("/", "<title>Second</title>")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("/").map(Page::title), Some("First"));
    }

    #[test]
    fn test_keys_match_page_urls() {
        let mut registry = PageRegistry::new();
        for url in ["/", "/a", "/b"] {
            registry.register(url, page(url, ""));
        }
        for url in ["/", "/a", "/b"] {
            assert_eq!(registry.get(url).map(Page::url), Some(url));
        }
        assert!(!registry.is_empty());
    }
}
