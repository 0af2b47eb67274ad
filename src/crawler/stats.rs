//! Crawl counters shared by all workers

use crate::state::JobOutcome;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Summary of one finished crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Resources claimed in the visited set and requested
    pub visited: usize,
    /// Pages handed to the link extractor
    pub parsed: usize,
    pub not_html: usize,
    pub failed: usize,
    /// Jobs dropped because their resource was already claimed
    pub duplicates: usize,
    /// Links (or the seed) dropped by robots.txt
    pub forbidden: usize,
    /// URLs handed to the sink
    pub emitted: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    visited: AtomicUsize,
    parsed: AtomicUsize,
    not_html: AtomicUsize,
    failed: AtomicUsize,
    duplicates: AtomicUsize,
    forbidden: AtomicUsize,
    emitted: AtomicUsize,
}

impl StatsRecorder {
    pub fn record(&self, outcome: JobOutcome) {
        if outcome.is_visit() {
            bump(&self.visited);
        }

        match outcome {
            JobOutcome::Parsed => bump(&self.parsed),
            JobOutcome::NotHtml => bump(&self.not_html),
            JobOutcome::Failed => bump(&self.failed),
            JobOutcome::Duplicate => bump(&self.duplicates),
            JobOutcome::DepthExceeded => {}
        }
    }

    pub fn record_forbidden(&self) {
        bump(&self.forbidden);
    }

    pub fn record_emitted(&self) {
        bump(&self.emitted);
    }

    pub fn snapshot(&self, elapsed: Duration) -> CrawlStats {
        CrawlStats {
            visited: self.visited.load(Ordering::Relaxed),
            parsed: self.parsed.load(Ordering::Relaxed),
            not_html: self.not_html.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            forbidden: self.forbidden.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::Relaxed);
}
