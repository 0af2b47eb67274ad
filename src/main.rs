//! Sumi-Crawl main entry point
//!
//! This is the command-line interface for the Sumi-Crawl link crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_crawl::config::{load_config_with_hash, Config};
use sumi_crawl::output::{print_statistics, LineSink};
use sumi_crawl::{Crawler, RobotsAction};
use tracing_subscriber::EnvFilter;

/// Sumi-Crawl: A polite concurrent link crawler
///
/// Sumi-Crawl walks a website from a seed URL up to a bounded depth and
/// prints every URL it discovers exactly once. robots.txt can be respected,
/// ignored, or skipped.
#[derive(Parser, Debug)]
#[command(name = "sumi-crawl")]
#[command(version)]
#[command(about = "A polite concurrent link crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth from the seed (0 = crawl the seed page only)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Number of concurrent workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Pause between requests of one worker, in milliseconds
    #[arg(long, value_name = "MS")]
    delay: Option<u64>,

    /// Deadline for every request, in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// User-agent token (matched against robots.txt and sent as User-Agent)
    #[arg(short, long)]
    user_agent: Option<String>,

    /// robots.txt handling: ignore, crawl or respect
    #[arg(long, value_name = "ACTION")]
    robots: Option<RobotsAction>,

    /// Download every page without checking its Content-Type first
    #[arg(long)]
    no_head: bool,

    /// Accept invalid TLS certificates
    #[arg(long)]
    skip_ssl: bool,

    /// Extra request header, as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Only follow links on the seed's host
    #[arg(long)]
    same_host: bool,

    /// Print URLs as JSON lines
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let config = apply_overrides(config, &cli);

    let crawler = Crawler::new(config.crawler).context("Failed to set up the crawler")?;
    let stats = crawler
        .run(&cli.url, LineSink::stdout(config.output.json_lines))
        .await
        .context("Crawl failed")?;

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only discovered URLs.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_crawl=warn,warn"),
            1 => EnvFilter::new("sumi_crawl=info,warn"),
            2 => EnvFilter::new("sumi_crawl=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line flags on top of the file configuration
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    let crawler = &mut config.crawler;

    if let Some(depth) = cli.depth {
        crawler.max_depth = depth;
    }
    if let Some(workers) = cli.workers {
        crawler.workers = workers;
    }
    if let Some(delay) = cli.delay {
        crawler.delay_ms = delay;
    }
    if let Some(timeout) = cli.timeout {
        crawler.timeout_ms = timeout;
    }
    if let Some(user_agent) = &cli.user_agent {
        crawler.user_agent = user_agent.clone();
    }
    if let Some(robots) = cli.robots {
        crawler.robots = robots;
    }
    if cli.no_head {
        crawler.head_before_get = false;
    }
    if cli.skip_ssl {
        crawler.skip_tls_verify = true;
    }
    if cli.same_host {
        crawler.same_host = true;
    }
    crawler.headers.extend(cli.headers.iter().cloned());

    if cli.json {
        config.output.json_lines = true;
    }

    config
}
