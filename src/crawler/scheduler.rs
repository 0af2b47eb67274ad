//! Scheduler for the crawl frontier and request pacing
//!
//! This module handles:
//! - The shared FIFO frontier every worker pulls jobs from
//! - Detecting when the crawl is finished (nothing queued, nothing in flight)
//! - The per-worker politeness delay between requests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use url::Url;

/// A URL waiting to be processed
///
/// Created when a link is accepted and consumed exactly once by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// The URL to fetch
    pub url: Url,

    /// Number of links followed from the seed (the seed itself is 0)
    pub depth: u32,
}

impl Job {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }

    /// Creates the job for a link found on this job's page
    pub fn child(&self, url: Url) -> Self {
        Self {
            url,
            depth: self.depth + 1,
        }
    }
}

/// Shared work queue with termination detection
///
/// `pending` counts jobs that are queued or being processed. A job only stops
/// counting once its worker calls [`Frontier::complete`], which happens after
/// all of its children were pushed. The crawl is therefore finished exactly
/// when the queue is empty and `pending` reaches zero.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: Mutex<VecDeque<Job>>,
    pending: AtomicUsize,
    notify: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a job and wakes one idle worker
    pub fn push(&self, job: Job) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.lock().push_back(job);
        self.notify.notify_one();
    }

    /// Waits for the next job
    ///
    /// Returns None once the frontier is drained and no job is in flight,
    /// i.e. when no further job can ever appear.
    pub async fn next(&self) -> Option<Job> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking, so a push or the final completion
            // between the check and the await is not missed.
            notified.as_mut().enable();

            let job = self.lock().pop_front();
            if job.is_some() {
                return job;
            }

            if self.pending.load(Ordering::SeqCst) == 0 {
                return None;
            }

            notified.await;
        }
    }

    /// Marks one previously returned job as finished
    pub fn complete(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            tracing::trace!("Frontier drained");
            self.notify.notify_waiters();
        }
    }

    /// Jobs queued or in flight
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Jobs queued but not yet picked up
    pub fn queued(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Job>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Completes a job on drop
///
/// Held by a worker for as long as it processes a job, so the frontier is
/// released even if processing panics.
pub struct InFlight<'a> {
    frontier: &'a Frontier,
}

impl<'a> InFlight<'a> {
    pub fn new(frontier: &'a Frontier) -> Self {
        Self { frontier }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}

/// Minimum pause between consecutive requests of one worker
///
/// The worker consults the gate right before a job's network I/O. The first
/// call never waits.
#[derive(Debug, Clone)]
pub struct PolitenessGate {
    delay: Duration,
    last: Option<Instant>,
}

impl PolitenessGate {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Sleeps until `delay` has passed since the previous call
    pub async fn wait(&mut self) {
        if !self.delay.is_zero() {
            if let Some(last) = self.last {
                tokio::time::sleep_until(last + self.delay).await;
            }
        }
        self.last = Some(Instant::now());
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
