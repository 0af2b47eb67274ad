//! robots.txt parser implementation
//!
//! Only the directives the crawler acts on are understood: `user-agent`,
//! `disallow` and `sitemap`. Everything else is skipped without complaint.

use std::collections::HashMap;

/// Parsed robots.txt rules
///
/// Groups are keyed by lower-cased user-agent token. Sitemaps are global and
/// kept in file order no matter which group they appeared under. Once built a
/// ruleset is never modified, so it can be shared freely between workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ruleset {
    groups: HashMap<String, Vec<String>>,
    sitemaps: Vec<String>,
}

impl Ruleset {
    /// Parses raw robots.txt content
    ///
    /// A `user-agent` line (or the `useragent` spelling) always opens a fresh
    /// group for its token, replacing any earlier group of the same name.
    /// `disallow` lines attach to the most recently opened group and are
    /// dropped when no group is open. Empty `disallow` values restrict nothing
    /// and are dropped as well.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_crawl::robots::Ruleset;
    ///
    /// let rules = Ruleset::parse("User-agent: bot\nDisallow: /private\n");
    /// assert!(rules.is_forbidden("bot", "/private/page"));
    /// assert!(!rules.is_forbidden("bot", "/public"));
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();
        let mut sitemaps = Vec::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            // Strip comments
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "user-agent" | "useragent" => {
                    let agent = value.to_lowercase();
                    groups.insert(agent.clone(), Vec::new());
                    current = Some(agent);
                }
                "disallow" => {
                    if value.is_empty() {
                        continue;
                    }
                    if let Some(rules) = current.as_ref().and_then(|a| groups.get_mut(a)) {
                        rules.push(value.to_string());
                    }
                }
                "sitemap" => {
                    if !value.is_empty() {
                        sitemaps.push(value.to_string());
                    }
                }
                _ => {}
            }
        }

        Self { groups, sitemaps }
    }

    /// Returns the disallow prefixes of the group matching `agent`
    ///
    /// Matching is an exact, case-insensitive comparison of the whole token.
    pub fn disallowed(&self, agent: &str) -> Option<&[String]> {
        if agent.is_empty() {
            return None;
        }
        self.groups.get(&agent.to_lowercase()).map(Vec::as_slice)
    }

    /// Checks whether `path` is disallowed for `agent`
    ///
    /// Groups written for other agents never apply. An agent with no group of
    /// its own may fetch everything.
    pub fn is_forbidden(&self, agent: &str, path: &str) -> bool {
        self.disallowed(agent)
            .is_some_and(|prefixes| prefixes.iter().any(|prefix| path.starts_with(prefix.as_str())))
    }

    /// Sitemap locations exactly as written in the file
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Number of user-agent groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
