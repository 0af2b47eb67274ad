//! Output module: where discovered URLs go
//!
//! The crawler hands each accepted URL to a [`Sink`] exactly once. Any
//! `Fn(String) + Send + Sync` closure is a sink; [`LineSink`] writes plain or
//! JSON lines for the command-line tool.

pub mod stats;
mod writer;

pub use stats::print_statistics;
pub use writer::LineSink;

/// Receiver of discovered URLs
///
/// Called from several workers at once. A slow sink stalls the worker that
/// calls it, nothing more.
pub trait Sink: Send + Sync {
    fn emit(&self, url: String);
}

impl<F> Sink for F
where
    F: Fn(String) + Send + Sync,
{
    fn emit(&self, url: String) {
        self(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_is_a_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |url: String| seen.lock().unwrap().push(url)
        };

        sink.emit("http://a/".to_string());
        Sink::emit(&sink, "http://b/".to_string());

        assert_eq!(*seen.lock().unwrap(), vec!["http://a/", "http://b/"]);
    }
}
