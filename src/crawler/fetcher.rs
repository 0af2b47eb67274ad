//! Page fetcher
//!
//! This module performs the HEAD-then-GET sequence for a single URL:
//! - HEAD request to check Content-Type (when enabled)
//! - GET request to download the body of HTML pages
//!
//! Failures are reported as values, never as errors: a dead link ends its job
//! and nothing else.

use crate::http::{Transport, TransportError};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum Fetched {
    /// Page body, ready for link extraction
    Html(Vec<u8>),

    /// HEAD reported a document that is not HTML
    NotHtml {
        /// The Content-Type received (empty if the header was missing)
        content_type: String,
    },

    /// HEAD or GET failed
    Failed(TransportError),
}

impl Fetched {
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html(_))
    }
}

/// Fetches a URL, checking its Content-Type first if `head_first` is set
///
/// # Request Flow
///
/// 1. HEAD (only with `head_first`)
///    - transport error or non-2xx → `Failed`
///    - Content-Type not HTML → `NotHtml`, no GET is sent
/// 2. GET
///    - transport error or non-2xx → `Failed`
///    - otherwise → `Html(body)`
///
/// Without `head_first` the body is assumed to be HTML and the extractor
/// copes with whatever arrives.
pub async fn fetch_page(transport: &dyn Transport, url: &Url, head_first: bool) -> Fetched {
    if head_first {
        match transport.head(url).await {
            Ok(headers) => {
                let content_type = content_type(&headers);
                if !is_html_content_type(&content_type) {
                    return Fetched::NotHtml { content_type };
                }
            }
            Err(e) => return Fetched::Failed(e),
        }
    }

    match transport.get(url).await {
        Ok(body) => Fetched::Html(body),
        Err(e) => Fetched::Failed(e),
    }
}

/// Extracts the Content-Type header value, or an empty string
fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Checks whether a Content-Type value denotes an HTML document
///
/// Parameters such as `charset` are ignored, and so is case.
///
/// # Examples
///
/// ```
/// use sumi_crawl::crawler::is_html_content_type;
///
/// assert!(is_html_content_type("text/html; charset=utf-8"));
/// assert!(is_html_content_type("application/xhtml+xml"));
/// assert!(!is_html_content_type("image/png"));
/// ```
pub fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    matches!(mime.as_str(), "text/html" | "application/xhtml+xml")
}
