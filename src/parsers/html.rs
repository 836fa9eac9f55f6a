use crate::normalize::{NormalizedLink, netloc_of, normalize_href};
use crate::results::{Link, NO_TITLE, OtherLink, Page};
use crate::utils::OrderedSet;
use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{ElementRef, Html, HtmlTreeSink};

/// Accumulates the references of one document while walking its elements
#[derive(Default)]
struct Collected {
    /// Text of the first `<title>`, blank or not
    title: Option<String>,
    assets: OrderedSet<String>,
    actions: OrderedSet<String>,
    internal_links: OrderedSet<Link>,
    external_links: OrderedSet<Link>,
    other_links: OrderedSet<OtherLink>,
}

/// Builds the [`Page`] for `url` from its raw markup.
///
/// Parsing is tolerant: malformed fragments are skipped, never reported.
/// Every collection keeps the order in which values first appear.
pub fn extract(domain: &str, url: &str, html: &str) -> Page {
    let doc = parse_document(html);
    let domain_host = netloc_of(domain);
    let mut collected = Collected::default();

    for element in doc.root_element().descendants().filter_map(ElementRef::wrap) {
        collect_element(&mut collected, element, &domain_host, url);
    }

    ::log::debug!(
        "Extracted {}: {} assets, {} actions, {} internal, {} external, {} other links",
        url,
        collected.assets.len(),
        collected.actions.len(),
        collected.internal_links.len(),
        collected.external_links.len(),
        collected.other_links.len()
    );

    Page::new(
        url.to_string(),
        collected
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string()),
        collected.assets.into_vec(),
        collected.actions.into_vec(),
        collected.internal_links.into_vec(),
        collected.external_links.into_vec(),
        collected.other_links.into_vec(),
    )
}

/// Parses with scripting disabled so `<noscript>` content is markup rather
/// than raw text.
fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

fn collect_element(collected: &mut Collected, element: ElementRef<'_>, domain_host: &str, url: &str) {
    let value = element.value();
    let tag = value.name();

    if tag == "title" && collected.title.is_none() {
        let title = element.text().collect::<String>();
        collected.title = Some(title.trim().to_string());
    }

    if let Some(src) = non_empty_attr(element, "src") {
        collected.assets.insert(src.to_string());
    }

    for attr in ["action", "formaction"] {
        if let Some(action) = non_empty_attr(element, attr) {
            collected.actions.insert(action.to_string());
        }
    }

    let Some(href) = value.attr("href") else {
        return;
    };
    let rel = non_empty_attr(element, "rel");

    let normalized = normalize_href(href, domain_host, url);
    let Some(resolved) = normalized.resolved() else {
        ::log::trace!("Ignoring href '{}' on {}: {:?}", href, url, normalized);
        return;
    };

    if tag == "link" && rel.is_some_and(is_stylesheet) {
        collected.assets.insert(resolved.to_string());
        return;
    }

    match (tag, &normalized) {
        ("a", NormalizedLink::Internal(path)) => {
            collected
                .internal_links
                .insert(Link::new(path.as_str(), anchor_text(element)));
        }
        ("a", NormalizedLink::External(absolute)) => {
            collected
                .external_links
                .insert(Link::new(absolute.as_str(), anchor_text(element)));
        }
        _ => {
            collected
                .other_links
                .insert(OtherLink::new(resolved, rel.map(str::to_string)));
        }
    }
}

/// Attribute value, trimmed, if present and not blank
fn non_empty_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn is_stylesheet(rel: &str) -> bool {
    rel.split_whitespace()
        .any(|token| token.eq_ignore_ascii_case("stylesheet"))
}

/// Text between the opening tag and the first nested tag, whitespace collapsed
fn anchor_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for child in element.children() {
        match child.value().as_text() {
            Some(fragment) => text.push_str(fragment),
            None => break,
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
