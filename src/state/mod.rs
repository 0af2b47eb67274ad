//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: Lifecycle of a single crawl run
//! - `JobOutcome`: How an individual job ended
//! - `VisitedSet`: Identity keys of every resource already claimed by a worker

mod job_state;
mod phase;
mod visited;

// Re-export main types
pub use job_state::JobOutcome;
pub use phase::CrawlPhase;
pub use visited::VisitedSet;
