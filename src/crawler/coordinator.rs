//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl engine that ties everything together:
//! - Validating the seed and (optionally) resolving robots.txt
//! - Seeding the frontier with the seed and any sitemaps
//! - Running the worker pool until the frontier drains
//! - Deduplicating, filtering and emitting discovered links

use crate::config::{validate_crawler_config, CrawlerConfig, RobotsAction};
use crate::crawler::fetcher::{fetch_page, Fetched};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::scheduler::{Frontier, InFlight, Job, PolitenessGate};
use crate::crawler::stats::{CrawlStats, StatsRecorder};
use crate::http::{HttpClient, Transport};
use crate::output::Sink;
use crate::robots::{RobotsPolicy, RobotsVerdict};
use crate::state::{CrawlPhase, JobOutcome, VisitedSet};
use crate::url::{is_crawlable_scheme, same_host, same_origin};
use crate::CrawlError;
use dashmap::DashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Concurrent link crawler
///
/// A `Crawler` holds the immutable configuration and the collaborators it
/// talks to. Each call to [`Crawler::run`] is an independent crawl with its own
/// frontier, visited set and robots policy.
///
/// # Example
///
/// ```no_run
/// use sumi_crawl::{Crawler, CrawlerConfig};
///
/// # async fn example() -> sumi_crawl::Result<()> {
/// let crawler = Crawler::new(CrawlerConfig::default())?;
/// let stats = crawler
///     .run("https://example.com/", |url: String| println!("{}", url))
///     .await?;
/// eprintln!("visited {} pages", stats.visited);
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    config: Arc<CrawlerConfig>,
    transport: Arc<dyn Transport>,
    extractor: Arc<dyn LinkExtractor>,
}

impl Crawler {
    /// Creates a crawler that fetches over HTTP with reqwest
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(CrawlError::Config)` - The configuration is invalid
    /// * `Err(CrawlError::Client)` - The HTTP client could not be built
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        validate_crawler_config(&config)?;
        let client = HttpClient::new(&config)?;
        Self::with_transport(config, Arc::new(client))
    }

    /// Creates a crawler that uses a custom transport
    pub fn with_transport(
        config: CrawlerConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CrawlError> {
        validate_crawler_config(&config)?;

        Ok(Self {
            config: Arc::new(config),
            transport,
            extractor: Arc::new(HtmlLinkExtractor::new()),
        })
    }

    /// Replaces the link extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn LinkExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls from `seed`, handing every discovered URL to `sink` once
    ///
    /// Returns when the frontier is empty and every worker has finished.
    /// Only a bad seed is an error; failures of individual jobs are logged and
    /// counted in the returned statistics.
    pub async fn run<S>(&self, seed: &str, sink: S) -> Result<CrawlStats, CrawlError>
    where
        S: Sink + 'static,
    {
        let start_time = Instant::now();
        let mut phase = CrawlPhase::Idle;

        let seed = parse_seed(seed)?;

        tracing::info!(
            "Starting crawl of {} (depth {}, {} workers, robots {})",
            seed,
            self.config.max_depth,
            self.config.workers,
            self.config.robots
        );

        let robots = if self.config.robots == RobotsAction::Respect {
            phase = phase.advance(CrawlPhase::RobotsInit);
            let policy =
                RobotsPolicy::initialize(&seed, self.transport.as_ref(), &self.config.user_agent)
                    .await;
            log_robots_policy(&policy);
            policy
        } else {
            RobotsPolicy::new(&self.config.user_agent, RobotsVerdict::Unknown)
        };

        phase = phase.advance(CrawlPhase::Seeding);

        let ctx = Arc::new(RunContext {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            extractor: Arc::clone(&self.extractor),
            sink: Box::new(sink),
            seed,
            robots,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            emitted: DashSet::new(),
            stats: StatsRecorder::default(),
        });

        ctx.seed_frontier();

        phase = phase.advance(CrawlPhase::Draining);

        let mut workers = JoinSet::new();
        for id in 0..self.config.workers {
            let ctx = Arc::clone(&ctx);
            workers.spawn(async move { ctx.work(id).await });
        }

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        phase = phase.advance(CrawlPhase::Done);
        debug_assert!(phase.is_done());

        let stats = ctx.stats.snapshot(start_time.elapsed());
        tracing::info!(
            "Crawl completed: {} visited, {} emitted in {:?}",
            stats.visited,
            stats.emitted,
            stats.elapsed
        );

        Ok(stats)
    }
}

/// Parses the seed into an absolute, fetchable URL
fn parse_seed(seed: &str) -> Result<Url, CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidSeed {
        seed: seed.to_string(),
        reason,
    };

    let url = Url::parse(seed.trim()).map_err(|e| invalid(e.to_string()))?;

    if !is_crawlable_scheme(&url) {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}

/// Summarizes what robots.txt means for this run
fn log_robots_policy(policy: &RobotsPolicy) {
    match policy.verdict() {
        RobotsVerdict::Parsed(rules) => {
            let rule_count = rules.disallowed(policy.agent()).map_or(0, |r| r.len());
            tracing::info!(
                "robots.txt has {} groups; {} disallow rules apply to agent {:?}",
                rules.group_count(),
                rule_count,
                policy.agent()
            );
        }
        RobotsVerdict::DenyAll => {
            tracing::warn!("robots.txt unavailable (server error), nothing will be crawled")
        }
        verdict => tracing::info!("robots.txt verdict: {:?}", verdict),
    }
}

/// Everything the workers of one run share
struct RunContext {
    config: Arc<CrawlerConfig>,
    transport: Arc<dyn Transport>,
    extractor: Arc<dyn LinkExtractor>,
    sink: Box<dyn Sink>,
    seed: Url,
    robots: RobotsPolicy,
    frontier: Frontier,
    visited: VisitedSet,
    /// Exact URL strings already handed to the sink
    emitted: DashSet<String>,
    stats: StatsRecorder,
}

impl RunContext {
    /// Emits the sitemaps and pushes them plus the seed at depth 0
    fn seed_frontier(&self) {
        for sitemap in self.robots.sitemaps() {
            if self.emit(sitemap) && is_crawlable_scheme(sitemap) {
                tracing::debug!("Seeding sitemap {}", sitemap);
                self.frontier.push(Job::new(sitemap.clone(), 0));
            }
        }

        if self.robots.forbids_url(&self.seed) {
            tracing::info!("Seed {} disallowed by robots.txt", self.seed);
            self.stats.record_forbidden();
        } else {
            self.frontier.push(Job::new(self.seed.clone(), 0));
        }
    }

    /// Worker loop: drains the frontier until the crawl is finished
    async fn work(&self, id: usize) {
        let mut gate = PolitenessGate::new(self.config.delay());

        while let Some(job) = self.frontier.next().await {
            let _in_flight = InFlight::new(&self.frontier);

            let outcome = self.process(&job, &mut gate).await;
            tracing::debug!(
                "[worker {}] {} (depth {}): {}, {} queued",
                id,
                job.url,
                job.depth,
                outcome,
                self.frontier.queued()
            );
            self.stats.record(outcome);
        }

        tracing::trace!("[worker {}] Frontier exhausted", id);
    }

    /// Processes a single job
    ///
    /// This method:
    /// 1. Drops jobs beyond the maximum depth
    /// 2. Claims the URL's identity key, dropping duplicates
    /// 3. Waits for the politeness gate and fetches the page
    /// 4. Extracts and accepts links from HTML pages
    async fn process(&self, job: &Job, gate: &mut PolitenessGate) -> JobOutcome {
        if job.depth > self.config.max_depth {
            return JobOutcome::DepthExceeded;
        }

        if !self.visited.claim(&job.url) {
            tracing::trace!("Already visited: {}", job.url);
            return JobOutcome::Duplicate;
        }

        gate.wait().await;

        match fetch_page(
            self.transport.as_ref(),
            &job.url,
            self.config.head_before_get,
        )
        .await
        {
            Fetched::Html(body) => {
                let links = self.extractor.extract(&job.url, &body);
                tracing::debug!("Found {} links on {}", links.len(), job.url);
                self.accept_links(job, links);
                JobOutcome::Parsed
            }
            Fetched::NotHtml { content_type } => {
                tracing::debug!("Skipping {}: Content-Type {:?}", job.url, content_type);
                JobOutcome::NotHtml
            }
            Fetched::Failed(e) => {
                tracing::debug!("Fetching {} failed: {}", job.url, e);
                JobOutcome::Failed
            }
        }
    }

    /// Filters, emits and enqueues the links found on `parent`'s page
    ///
    /// Links are handled in the order the extractor returned them. Every
    /// accepted link is emitted; only the first emission of a URL enqueues it,
    /// and only while the child stays within the maximum depth.
    fn accept_links(&self, parent: &Job, links: Vec<String>) {
        for link in links {
            let url = match Url::parse(&link) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Dropping unparsable link {:?}: {}", link, e);
                    continue;
                }
            };

            if !is_crawlable_scheme(&url) {
                continue;
            }

            // robots.txt only speaks for the origin it was fetched from
            if same_origin(&url, &self.seed) && self.robots.forbids_url(&url) {
                tracing::debug!("Disallowed by robots.txt: {}", url);
                self.stats.record_forbidden();
                continue;
            }

            if !self.emit(&url) {
                continue;
            }

            if self.config.same_host && !same_host(&url, &self.seed) {
                tracing::trace!("Not following off-host link {}", url);
                continue;
            }

            let child = parent.child(url);
            if child.depth > self.config.max_depth {
                continue;
            }

            self.frontier.push(child);
        }
    }

    /// Hands `url` to the sink unless it was emitted before
    ///
    /// Returns true on the first emission.
    fn emit(&self, url: &Url) -> bool {
        let url = url.to_string();
        if !self.emitted.insert(url.clone()) {
            return false;
        }

        self.sink.emit(url);
        self.stats.record_emitted();
        true
    }
}
