use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure for Sumi-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// What the crawler does about robots.txt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum RobotsAction {
    /// Never fetch robots.txt, every path is allowed
    #[default]
    Ignore,
    /// Do not fetch or enforce robots.txt; behaves like `Ignore`
    Crawl,
    /// Fetch robots.txt for the seed origin before crawling and obey it
    Respect,
}

impl FromStr for RobotsAction {
    type Err = ConfigError;

    /// Parses an action token, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "crawl" => Ok(Self::Crawl),
            "respect" => Ok(Self::Respect),
            _ => Err(ConfigError::UnknownRobotsAction(s.to_string())),
        }
    }
}

impl TryFrom<String> for RobotsAction {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RobotsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Ignore => "ignore",
            Self::Crawl => "crawl",
            Self::Respect => "respect",
        };
        f.write_str(token)
    }
}

/// Crawler behavior configuration
///
/// Immutable once a [`Crawler`](crate::Crawler) has been built from it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Token matched against robots.txt user-agent groups, also sent as the
    /// User-Agent header when non-empty
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Number of concurrent workers
    pub workers: usize,

    /// Maximum depth to crawl from the seed URL (0 = crawl the seed page only)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause before each request a worker issues (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Deadline for every network call (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Issue a HEAD request and check Content-Type before downloading
    #[serde(rename = "head-before-get")]
    pub head_before_get: bool,

    /// Accept invalid TLS certificates
    #[serde(rename = "skip-tls-verify")]
    pub skip_tls_verify: bool,

    /// robots.txt handling
    pub robots: RobotsAction,

    /// Extra request headers, each formatted as "Name: value"
    pub headers: Vec<String>,

    /// Only follow links that stay on the seed's host
    #[serde(rename = "same-host")]
    pub same_host: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            workers: 4,
            max_depth: 1,
            delay_ms: 150,
            timeout_ms: 10_000,
            head_before_get: true,
            skip_tls_verify: false,
            robots: RobotsAction::Ignore,
            headers: Vec::new(),
            same_host: false,
        }
    }
}

impl CrawlerConfig {
    /// Pause applied before each request
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Deadline applied to each request
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write one JSON object per URL instead of bare lines
    #[serde(rename = "json-lines")]
    pub json_lines: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_robots_action() {
        assert_eq!("ignore".parse::<RobotsAction>().unwrap(), RobotsAction::Ignore);
        assert_eq!("crawl".parse::<RobotsAction>().unwrap(), RobotsAction::Crawl);
        assert_eq!("respect".parse::<RobotsAction>().unwrap(), RobotsAction::Respect);
    }

    #[test]
    fn test_parse_robots_action_case_insensitive() {
        assert_eq!("RESPECT".parse::<RobotsAction>().unwrap(), RobotsAction::Respect);
        assert_eq!(" Crawl ".parse::<RobotsAction>().unwrap(), RobotsAction::Crawl);
    }

    #[test]
    fn test_parse_robots_action_unknown() {
        let err = "dsf".parse::<RobotsAction>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRobotsAction(ref token) if token == "dsf"));
    }

    #[test]
    fn test_robots_action_display_round_trips() {
        for action in [RobotsAction::Ignore, RobotsAction::Crawl, RobotsAction::Respect] {
            assert_eq!(action.to_string().parse::<RobotsAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_default_config() {
        let config = CrawlerConfig::default();
        assert_eq!(config.workers, 4);
        assert_eq!(config.robots, RobotsAction::Ignore);
        assert!(config.head_before_get);
        assert_eq!(config.delay(), Duration::from_millis(150));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
