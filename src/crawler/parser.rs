//! HTML link extraction
//!
//! This module finds reference targets in an HTML document and resolves them
//! to absolute URLs.

use scraper::{Html, Selector};
use url::Url;

/// Elements whose reference attribute points at another resource
const LINK_SELECTOR: &str = "a[href], area[href], link[href], img[src], iframe[src], frame[src], \
     script[src], embed[src], source[src], video[src], audio[src], track[src], object[data]";

/// Turns an HTML body into the absolute URLs it references
///
/// Implementations must be cheap to share between workers.
pub trait LinkExtractor: Send + Sync {
    /// Extracts absolute URLs, in document order, resolving relative targets
    /// against `base`
    fn extract(&self, base: &Url, html: &[u8]) -> Vec<String>;
}

/// scraper-backed [`LinkExtractor`]
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `href` of `<a>`, `<area>` and `<link>`
/// - `src` of `<img>`, `<iframe>`, `<frame>`, `<script>`, `<embed>`, `<source>`,
///   `<video>`, `<audio>` and `<track>`
/// - `data` of `<object>`
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that is not HTTP(S) after resolution
///
/// A `<base href>` element, when present, replaces the page URL as the base
/// for resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, base: &Url, html: &[u8]) -> Vec<String> {
        let html = String::from_utf8_lossy(html);
        extract_links(&html, base)
    }
}

/// Extracts all valid links from an HTML string
///
/// # Example
///
/// ```
/// use sumi_crawl::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a><img src="pic.png"></body></html>"#;
/// let base_url = Url::parse("https://example.com/dir/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links, vec!["https://example.com/page", "https://example.com/dir/pic.png"]);
/// ```
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let base_url = document_base(&document, page_url);

    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(LINK_SELECTOR) {
        for element in document.select(&selector) {
            let attr = match element.value().name() {
                "a" | "area" | "link" => "href",
                "object" => "data",
                _ => "src",
            };

            if let Some(target) = element.value().attr(attr) {
                if let Some(absolute_url) = resolve_link(target, &base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Returns the document's `<base href>` resolved against the page URL, or the
/// page URL itself
fn document_base(document: &Html, page_url: &Url) -> Url {
    let Ok(selector) = Selector::parse("base[href]") else {
        return page_url.clone();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Resolves a link target to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only targets
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(target: &str, base_url: &Url) -> Option<String> {
    let target = target.trim();

    if target.is_empty() || target.starts_with('#') {
        return None;
    }

    let lowered = target.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    match base_url.join(target) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}
