//! Sumi-Crawl: a polite concurrent link crawler
//!
//! This crate walks a website from a single seed URL, up to a bounded depth,
//! and streams every discovered absolute URL to a caller-supplied sink exactly
//! once. Crawling can respect, ignore, or skip robots.txt.

pub mod config;
pub mod crawler;
pub mod http;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Crawl operations
///
/// Only construction and seed problems surface here. Everything that goes
/// wrong once a run is under way is absorbed per job.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{seed}': {reason}")]
    InvalidSeed { seed: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown robots action: '{0}' (expected ignore, crawl or respect)")]
    UnknownRobotsAction(String),

    #[error("Invalid header '{0}': expected 'Name: value'")]
    InvalidHeader(String),
}

/// Result type alias for Sumi-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CrawlerConfig, RobotsAction};
pub use crawler::{CrawlStats, Crawler};
pub use output::Sink;
pub use robots::{RobotsPolicy, RobotsVerdict};
pub use url::UrlKey;
