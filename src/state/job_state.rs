use std::fmt;

/// How a single crawl job ended
///
/// Every outcome except `Parsed` ends the job without looking at links. None
/// of them is an error as far as the run is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobOutcome {
    /// Fetched as HTML and handed to the link extractor
    Parsed,

    /// HEAD reported a non-HTML Content-Type
    NotHtml,

    /// HEAD or GET failed (transport error or non-success status)
    Failed,

    /// Another job already claimed the same identity key
    Duplicate,

    /// The job sat beyond the maximum depth
    DepthExceeded,
}

impl JobOutcome {
    /// Returns true if the job claimed its resource and issued requests for it
    pub fn is_visit(&self) -> bool {
        matches!(self, Self::Parsed | Self::NotHtml | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parsed => "parsed",
            Self::NotHtml => "not_html",
            Self::Failed => "failed",
            Self::Duplicate => "duplicate",
            Self::DepthExceeded => "depth_exceeded",
        }
    }
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
