use sha2::{Digest, Sha256};
use std::fmt;
use url::Url;

/// Fixed-size fingerprint identifying a logical resource
///
/// The key covers scheme, host, effective port and path. Query string and
/// fragment are left out on purpose: `/page?a=1` and `/page?b=2#top` are the
/// same resource as far as visiting is concerned.
///
/// SHA-256 keeps collisions out of reach for any realistic crawl size, so two
/// different resources never share a key within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UrlKey([u8; 32]);

impl UrlKey {
    /// Computes the identity key of a URL
    ///
    /// The URL is only borrowed; its query and fragment are untouched and the
    /// caller may keep using it afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_crawl::url::UrlKey;
    /// use url::Url;
    ///
    /// let one = Url::parse("http://test/some/path?foo=bar").unwrap();
    /// let two = Url::parse("http://test/some/path?other").unwrap();
    ///
    /// assert_eq!(UrlKey::new(&one), UrlKey::new(&two));
    /// assert_eq!(one.query(), Some("foo=bar"));
    /// ```
    pub fn new(url: &Url) -> Self {
        let mut hasher = Sha256::new();

        // Fields are NUL-separated so "ab" + "c" never hashes like "a" + "bc"
        hasher.update(url.scheme().as_bytes());
        hasher.update([0u8]);
        hasher.update(url.host_str().unwrap_or_default().as_bytes());
        hasher.update([0u8]);
        if let Some(port) = url.port_or_known_default() {
            hasher.update(port.to_be_bytes());
        }
        hasher.update([0u8]);
        hasher.update(url.path().as_bytes());

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

impl fmt::Display for UrlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
