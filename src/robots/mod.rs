//! robots.txt handling module
//!
//! The resolver fetches robots.txt once per crawl for the seed origin and
//! turns the outcome into a [`RobotsVerdict`]. Workers then query the
//! resulting [`RobotsPolicy`] concurrently without any locking.

mod parser;

pub use parser::Ruleset;

use crate::http::Transport;
use crate::url::robots_url;
use url::Url;

/// Enforcement mode decided once, when the resolver is initialized
///
/// | Outcome of fetching robots.txt | Verdict |
/// |-------------------------------|---------|
/// | never fetched | `Unknown` (allow all) |
/// | 2xx | `Parsed` |
/// | network or body read error | `AllowAll` |
/// | 4xx or other non-success | `AllowAll` |
/// | 5xx | `DenyAll` |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RobotsVerdict {
    /// The resolver was never initialized
    #[default]
    Unknown,
    /// Rules parsed from a successful response
    Parsed(Ruleset),
    /// Fail open: no definitive answer was available
    AllowAll,
    /// Fail closed: the server could not serve its policy
    DenyAll,
}

/// robots.txt policy for one origin, as seen by one user agent
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    agent: String,
    verdict: RobotsVerdict,
    sitemaps: Vec<Url>,
}

impl RobotsPolicy {
    /// Creates a policy with an explicit verdict and no sitemaps
    pub fn new(agent: &str, verdict: RobotsVerdict) -> Self {
        Self {
            agent: agent.to_string(),
            verdict,
            sitemaps: Vec::new(),
        }
    }

    /// Builds a policy from robots.txt content served at `location`
    ///
    /// Relative sitemap entries are resolved against `location`; entries that
    /// do not form a valid URL are dropped.
    pub fn from_content(agent: &str, content: &str, location: &Url) -> Self {
        let rules = Ruleset::parse(content);
        let sitemaps = rules
            .sitemaps()
            .iter()
            .filter_map(|raw| match location.join(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("Ignoring sitemap entry {:?}: {}", raw, e);
                    None
                }
            })
            .collect();

        Self {
            agent: agent.to_string(),
            verdict: RobotsVerdict::Parsed(rules),
            sitemaps,
        }
    }

    /// Fetches robots.txt for the origin of `base` and decides the verdict
    ///
    /// This never fails: every outcome maps to a verdict (see [`RobotsVerdict`]).
    ///
    /// # Arguments
    ///
    /// * `base` - Any URL on the origin to resolve
    /// * `transport` - The HTTP transport to fetch with
    /// * `agent` - The user-agent token to evaluate rules for
    pub async fn initialize(base: &Url, transport: &dyn Transport, agent: &str) -> Self {
        let Some(location) = robots_url(base) else {
            tracing::debug!("Cannot build robots.txt URL for {}", base);
            return Self::new(agent, RobotsVerdict::AllowAll);
        };

        tracing::debug!("Fetching {}", location);

        match transport.get(&location).await {
            Ok(body) => {
                let content = String::from_utf8_lossy(&body);
                let policy = Self::from_content(agent, &content, &location);
                tracing::info!(
                    "Parsed {} ({} sitemaps)",
                    location,
                    policy.sitemaps.len()
                );
                policy
            }
            Err(e) => {
                let verdict = match e.status() {
                    Some(status) if status.is_server_error() => RobotsVerdict::DenyAll,
                    _ => RobotsVerdict::AllowAll,
                };
                tracing::info!("Fetching {} failed ({}): {:?}", location, e, verdict);
                Self::new(agent, verdict)
            }
        }
    }

    /// Checks whether a path (optionally with query) may not be fetched
    pub fn forbidden(&self, path: &str) -> bool {
        match &self.verdict {
            RobotsVerdict::Unknown | RobotsVerdict::AllowAll => false,
            RobotsVerdict::DenyAll => true,
            RobotsVerdict::Parsed(rules) => rules.is_forbidden(&self.agent, path),
        }
    }

    /// Checks a full URL against the rules, using its path and query
    pub fn forbids_url(&self, url: &Url) -> bool {
        match url.query() {
            Some(query) => self.forbidden(&format!("{}?{}", url.path(), query)),
            None => self.forbidden(url.path()),
        }
    }

    /// Sitemap URLs discovered while parsing
    pub fn sitemaps(&self) -> &[Url] {
        &self.sitemaps
    }

    /// The verdict this policy enforces
    pub fn verdict(&self) -> &RobotsVerdict {
        &self.verdict
    }

    /// The user-agent token rules are evaluated for
    pub fn agent(&self) -> &str {
        &self.agent
    }
}
