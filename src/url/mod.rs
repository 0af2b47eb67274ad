//! URL handling module for Sumi-Crawl
//!
//! This module provides the URL identity key used for deduplication and the
//! host/origin helpers the crawler uses to scope robots.txt rules.

mod domain;
mod identity;

// Re-export main items
pub use domain::{extract_domain, is_crawlable_scheme, robots_url, same_host, same_origin};
pub use identity::UrlKey;
