use std::fmt;

/// Lifecycle phases of one crawl run
///
/// ```text
/// Idle -> RobotsInit? -> Seeding -> Draining -> Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Nothing has happened yet
    Idle,
    /// Fetching robots.txt for the seed origin (respect mode only)
    RobotsInit,
    /// Pushing the seed and sitemap jobs onto the frontier
    Seeding,
    /// Workers are draining the frontier
    Draining,
    /// Frontier empty and no job in flight
    Done,
}

impl CrawlPhase {
    /// Returns true if a run may move from `self` to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::RobotsInit)
                | (Self::Idle, Self::Seeding)
                | (Self::RobotsInit, Self::Seeding)
                | (Self::Seeding, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    /// Moves to `next`, logging the change
    ///
    /// Phases only ever advance; an out-of-order transition is a bug in the
    /// engine and trips a debug assertion.
    pub fn advance(self, next: CrawlPhase) -> CrawlPhase {
        debug_assert!(
            self.can_transition_to(next),
            "invalid crawl phase transition: {} -> {}",
            self,
            next
        );
        tracing::debug!("Crawl phase: {} -> {}", self, next);
        next
    }

    /// Returns true once the run has finished
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RobotsInit => "robots_init",
            Self::Seeding => "seeding",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(CrawlPhase::Idle.can_transition_to(CrawlPhase::RobotsInit));
        assert!(CrawlPhase::Idle.can_transition_to(CrawlPhase::Seeding));
        assert!(CrawlPhase::RobotsInit.can_transition_to(CrawlPhase::Seeding));
        assert!(CrawlPhase::Seeding.can_transition_to(CrawlPhase::Draining));
        assert!(CrawlPhase::Draining.can_transition_to(CrawlPhase::Done));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!CrawlPhase::Idle.can_transition_to(CrawlPhase::Draining));
        assert!(!CrawlPhase::Seeding.can_transition_to(CrawlPhase::RobotsInit));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Idle));
        assert!(!CrawlPhase::Draining.can_transition_to(CrawlPhase::Draining));
    }

    #[test]
    fn test_full_lifecycle() {
        let phase = CrawlPhase::Idle
            .advance(CrawlPhase::RobotsInit)
            .advance(CrawlPhase::Seeding)
            .advance(CrawlPhase::Draining)
            .advance(CrawlPhase::Done);
        assert!(phase.is_done());
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlPhase::RobotsInit.to_string(), "robots_init");
        assert_eq!(format!("{}", CrawlPhase::Done), "done");
    }
}
