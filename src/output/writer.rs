use crate::output::Sink;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

/// One line of JSON output
#[derive(Serialize)]
struct Record<'a> {
    url: &'a str,
}

/// Sink writing one URL per line to any writer
///
/// Lines from concurrent workers never interleave. Write failures (a closed
/// pipe, usually) are logged and the URL is dropped.
pub struct LineSink<W: Write + Send> {
    out: Mutex<W>,
    json: bool,
}

impl LineSink<io::Stdout> {
    /// Sink writing to standard output
    pub fn stdout(json: bool) -> Self {
        Self::new(io::stdout(), json)
    }
}

impl<W: Write + Send> LineSink<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out: Mutex::new(out),
            json,
        }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, url: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.json {
            serde_json::to_writer(&mut *out, &Record { url })?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", url)?;
        }

        out.flush()
    }
}

impl<W: Write + Send> Sink for LineSink<W> {
    fn emit(&self, url: String) {
        if let Err(e) = self.write_line(&url) {
            tracing::warn!("Failed to write {}: {}", url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let sink = LineSink::new(Vec::new(), false);
        sink.emit("http://a/".to_string());
        sink.emit("http://b/x?y=1".to_string());

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "http://a/\nhttp://b/x?y=1\n");
    }

    #[test]
    fn test_json_lines() {
        let sink = LineSink::new(Vec::new(), true);
        sink.emit("http://a/\"quoted\"".to_string());

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["url"], "http://a/\"quoted\"");
        assert!(out.ends_with('\n'));
    }
}
