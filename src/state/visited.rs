use crate::url::UrlKey;
use dashmap::DashSet;
use url::Url;

/// Identity keys of every resource a worker has claimed during one run
///
/// All workers share a single instance. Claiming is one atomic test-and-set,
/// so when two workers race on the same resource exactly one of them wins.
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: DashSet<UrlKey>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the resource behind `url`
    ///
    /// Returns true if this call inserted the key, false if it was already present.
    pub fn claim(&self, url: &Url) -> bool {
        self.keys.insert(UrlKey::new(url))
    }

    /// Returns true if the resource behind `url` has been claimed
    pub fn contains(&self, url: &Url) -> bool {
        self.keys.contains(&UrlKey::new(url))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_claim_once() {
        let visited = VisitedSet::new();
        let url = parse("http://test/page");

        assert!(visited.claim(&url));
        assert!(!visited.claim(&url));
        assert!(visited.contains(&url));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_query_and_fragment_share_a_claim() {
        let visited = VisitedSet::new();

        assert!(visited.claim(&parse("http://test/page?a=1")));
        assert!(!visited.claim(&parse("http://test/page?b=2")));
        assert!(!visited.claim(&parse("http://test/page#top")));
        assert!(visited.claim(&parse("http://test/other")));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_concurrent_claims_have_one_winner() {
        let visited = Arc::new(VisitedSet::new());
        let url = parse("http://test/contended");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let visited = Arc::clone(&visited);
                let url = url.clone();
                std::thread::spawn(move || visited.claim(&url))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }
}
