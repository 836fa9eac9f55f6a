//! Canonicalization of `href`/`src`/`action` values found in a page.
//!
//! Every reference is turned into one of three outcomes: a domain-relative
//! path that the crawler may follow, an absolute URL on some other host, or
//! nothing at all.

use regex::Regex;
use std::sync::LazyLock;

/// Generic URI splitter, scheme://netloc/path?query#fragment. Every group is
/// optional, so the pattern matches any input.
static URL_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URL split pattern should be valid")
});

/// Schemes that never lead to a crawlable document
const IGNORED_SCHEMES: [&str; 3] = ["mailto", "tel", "javascript"];

/// The five components of a URI reference, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Splits a URI reference into its components without resolving it
pub fn split_url(raw: &str) -> UrlParts<'_> {
    let Some(caps) = URL_PARTS.captures(raw) else {
        return UrlParts {
            path: raw,
            ..UrlParts::default()
        };
    };
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    UrlParts {
        scheme: group(1),
        netloc: group(2),
        path: group(3),
        query: group(4),
        fragment: group(5),
    }
}

/// Lower-cased `host[:port]` of an absolute URL, used to decide what counts as
/// "the same domain"
pub fn netloc_of(url: &str) -> String {
    split_url(url.trim()).netloc.to_ascii_lowercase()
}

/// Why a reference was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Empty, or only a `#fragment`
    FragmentOnly,
    /// `mailto:`, `tel:` or `javascript:`
    UnsupportedScheme,
    /// Same host but nothing to point at, e.g. `?page=2`
    EmptyPath,
    /// Resolves to the page it appears on
    SelfLink,
}

/// Classification of one reference relative to the crawled domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedLink {
    /// Canonical domain-relative path, always starting with `/`
    Internal(String),
    /// Absolute URL on another host, query and fragment removed
    External(String),
    Ignored(IgnoreReason),
}

impl NormalizedLink {
    /// The resolved URL, if the reference was not ignored
    pub fn resolved(&self) -> Option<&str> {
        match self {
            NormalizedLink::Internal(path) => Some(path),
            NormalizedLink::External(url) => Some(url),
            NormalizedLink::Ignored(_) => None,
        }
    }
}

/// Classifies a raw reference found on `current_page_url`.
///
/// `domain_host` is the crawled domain's `host[:port]`; it is compared
/// case-insensitively. The path of an internal link keeps its case.
pub fn normalize_href(raw_href: &str, domain_host: &str, current_page_url: &str) -> NormalizedLink {
    let href = raw_href.trim();
    if href.is_empty() || href.starts_with('#') {
        return NormalizedLink::Ignored(IgnoreReason::FragmentOnly);
    }

    let parts = split_url(href);

    if !parts.netloc.is_empty() && !parts.netloc.eq_ignore_ascii_case(domain_host) {
        return NormalizedLink::External(rebuild_external(&parts));
    }

    if IGNORED_SCHEMES
        .iter()
        .any(|scheme| parts.scheme.eq_ignore_ascii_case(scheme))
    {
        return NormalizedLink::Ignored(IgnoreReason::UnsupportedScheme);
    }

    if parts.path.is_empty() {
        return NormalizedLink::Ignored(IgnoreReason::EmptyPath);
    }

    // Relative references such as `page2.html` are resolved against the site
    // root, not the directory of the current page. This matches how existing
    // sitemaps were produced; switch to RFC 3986 resolution only if that
    // compatibility can be dropped.
    if !parts.path.starts_with('/') {
        ::log::debug!(
            "Resolving relative href '{}' on {} against the site root",
            href,
            current_page_url
        );
    }

    let path = format!("/{}", parts.path.trim_matches('/'));
    if path == current_page_url {
        return NormalizedLink::Ignored(IgnoreReason::SelfLink);
    }

    NormalizedLink::Internal(path)
}

/// Builds `scheme://netloc/path` for an off-domain reference
fn rebuild_external(parts: &UrlParts<'_>) -> String {
    let mut url = String::with_capacity(
        parts.scheme.len() + parts.netloc.len() + parts.path.len() + 4,
    );
    if !parts.scheme.is_empty() {
        url.push_str(&parts.scheme.to_ascii_lowercase());
        url.push(':');
    }
    url.push_str("//");
    url.push_str(&parts.netloc.to_ascii_lowercase());
    if !parts.path.is_empty() && !parts.path.starts_with('/') {
        url.push('/');
    }
    url.push_str(parts.path);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "example.com";

    fn internal(path: &str) -> NormalizedLink {
        NormalizedLink::Internal(path.to_string())
    }

    #[test]
    fn test_split_url() {
        let parts = split_url("HTTP://Example.com:8080/a/b?x=1#top");
        assert_eq!(parts.scheme, "HTTP");
        assert_eq!(parts.netloc, "Example.com:8080");
        assert_eq!(parts.path, "/a/b");
        assert_eq!(parts.query, "x=1");
        assert_eq!(parts.fragment, "top");

        let parts = split_url("page2.html?x");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "page2.html");
        assert_eq!(parts.query, "x");

        let parts = split_url("mailto:someone@example.com");
        assert_eq!(parts.scheme, "mailto");
        assert_eq!(parts.path, "someone@example.com");
    }

    #[test]
    fn test_netloc_of() {
        assert_eq!(netloc_of("http://Example.COM"), "example.com");
        assert_eq!(netloc_of("https://localhost:8080/x"), "localhost:8080");
    }

    #[test]
    fn test_fragments_and_empty_are_ignored() {
        assert_eq!(
            normalize_href("#section", HOST, "/"),
            NormalizedLink::Ignored(IgnoreReason::FragmentOnly)
        );
        assert_eq!(
            normalize_href("   ", HOST, "/"),
            NormalizedLink::Ignored(IgnoreReason::FragmentOnly)
        );
    }

    #[test]
    fn test_external_hosts() {
        assert_eq!(
            normalize_href("http://other.com/x?q=1#f", HOST, "/"),
            NormalizedLink::External("http://other.com/x".to_string())
        );
        assert_eq!(
            normalize_href("//cdn.other.com/lib.js", HOST, "/"),
            NormalizedLink::External("//cdn.other.com/lib.js".to_string())
        );
        assert_eq!(
            normalize_href("HTTPS://Other.com/Path", HOST, "/"),
            NormalizedLink::External("https://other.com/Path".to_string())
        );
    }

    #[test]
    fn test_same_host_is_case_insensitive() {
        assert_eq!(
            normalize_href("http://EXAMPLE.com/About/", HOST, "/"),
            internal("/About")
        );
    }

    #[test]
    fn test_unsupported_schemes() {
        for href in ["mailto:a@example.com", "tel:+123", "JavaScript:void(0)"] {
            assert_eq!(
                normalize_href(href, HOST, "/"),
                NormalizedLink::Ignored(IgnoreReason::UnsupportedScheme),
                "{href}"
            );
        }
    }

    #[test]
    fn test_empty_path_is_ignored() {
        assert_eq!(
            normalize_href("?page=2", HOST, "/"),
            NormalizedLink::Ignored(IgnoreReason::EmptyPath)
        );
        assert_eq!(
            normalize_href("http://example.com", HOST, "/about"),
            NormalizedLink::Ignored(IgnoreReason::EmptyPath)
        );
    }

    #[test]
    fn test_internal_paths_are_canonical() {
        assert_eq!(normalize_href("/about", HOST, "/"), internal("/about"));
        assert_eq!(normalize_href("/about/?a=b#c", HOST, "/"), internal("/about"));
        assert_eq!(normalize_href("/about//", HOST, "/x"), internal("/about"));
        assert_eq!(normalize_href("/", HOST, "/about"), internal("/"));
    }

    #[test]
    fn test_relative_paths_resolve_against_root() {
        assert_eq!(
            normalize_href("page2.html", HOST, "/sub/page1.html"),
            internal("/page2.html")
        );
    }

    #[test]
    fn test_self_links_are_ignored() {
        assert_eq!(
            normalize_href("/about#team", HOST, "/about"),
            NormalizedLink::Ignored(IgnoreReason::SelfLink)
        );
        assert_eq!(
            normalize_href("/", HOST, "/"),
            NormalizedLink::Ignored(IgnoreReason::SelfLink)
        );
    }

    #[test]
    fn test_resolved() {
        assert_eq!(internal("/a").resolved(), Some("/a"));
        assert_eq!(
            NormalizedLink::Ignored(IgnoreReason::SelfLink).resolved(),
            None
        );
    }
}
