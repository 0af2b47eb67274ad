//! Crawler module for link discovery
//!
//! This module contains the core crawling logic, including:
//! - HEAD-then-GET fetching with Content-Type gating
//! - HTML link extraction
//! - The shared frontier and the politeness delay
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod stats;

pub use coordinator::Crawler;
pub use fetcher::{fetch_page, is_html_content_type, Fetched};
pub use parser::{extract_links, HtmlLinkExtractor, LinkExtractor};
pub use scheduler::{Frontier, InFlight, Job, PolitenessGate};
pub use stats::CrawlStats;

use crate::config::CrawlerConfig;
use crate::output::Sink;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Parse the seed URL
/// 3. Resolve robots.txt when asked to respect it
/// 4. Fetch pages and follow links up to the configured depth
/// 5. Return the crawl statistics
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The URL to start from
/// * `sink` - Receives every discovered URL once
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed
/// * `Err(CrawlError)` - Bad configuration or seed
pub async fn crawl<S>(config: CrawlerConfig, seed: &str, sink: S) -> Result<CrawlStats, CrawlError>
where
    S: Sink + 'static,
{
    Crawler::new(config)?.run(seed, sink).await
}
