use serde::{Deserialize, Serialize};

/// Title used when a page has no usable `<title>`
pub const NO_TITLE: &str = "No title";

/// An anchor found on a page: where it points and the text it displays
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub text: String,
}

impl Link {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// A non-anchor, non-stylesheet element with an `href`, e.g. `rel=canonical`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtherLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
}

impl OtherLink {
    pub fn new(url: impl Into<String>, rel: Option<String>) -> Self {
        Self {
            url: url.into(),
            rel,
        }
    }
}

/// One crawled document. Built once from its markup and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Canonical path relative to the domain
    url: String,

    /// Contents of the first `<title>`, or [`NO_TITLE`]
    title: String,

    /// Images, scripts and stylesheets the page loads
    assets: Vec<String>,

    /// Form submission targets
    actions: Vec<String>,

    internal_links: Vec<Link>,

    external_links: Vec<Link>,

    other_links: Vec<OtherLink>,
}

impl Page {
    /// Assembles a page from already deduplicated collections
    pub(crate) fn new(
        url: String,
        title: String,
        assets: Vec<String>,
        actions: Vec<String>,
        internal_links: Vec<Link>,
        external_links: Vec<Link>,
        other_links: Vec<OtherLink>,
    ) -> Self {
        Self {
            url,
            title,
            assets,
            actions,
            internal_links,
            external_links,
            other_links,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn internal_links(&self) -> &[Link] {
        &self.internal_links
    }

    pub fn external_links(&self) -> &[Link] {
        &self.external_links
    }

    pub fn other_links(&self) -> &[OtherLink] {
        &self.other_links
    }

    /// Internal links followed by external links
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.internal_links.iter().chain(self.external_links.iter())
    }
}
