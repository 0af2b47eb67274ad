use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_crawl::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if the URL uses a scheme the crawler can fetch
pub fn is_crawlable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Returns true if both URLs point at the same host (ports may differ)
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Returns true if both URLs share scheme, host and effective port
///
/// robots.txt rules only ever apply to the origin they were fetched from.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Builds the robots.txt location for the origin of `url`
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_crawl::url::robots_url;
///
/// let url = Url::parse("https://example.com/deep/page?x=1#top").unwrap();
/// assert_eq!(robots_url(&url).unwrap().as_str(), "https://example.com/robots.txt");
/// ```
pub fn robots_url(url: &Url) -> Option<Url> {
    url.join("/robots.txt").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_extract_with_port() {
        let url = parse("https://example.com:8080/");
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = parse("https://Example.COM/");
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_crawlable_schemes() {
        assert!(is_crawlable_scheme(&parse("http://example.com/")));
        assert!(is_crawlable_scheme(&parse("https://example.com/")));
        assert!(!is_crawlable_scheme(&parse("ftp://example.com/")));
        assert!(!is_crawlable_scheme(&parse("mailto:someone@example.com")));
    }

    #[test]
    fn test_same_host_ignores_port_and_path() {
        assert!(same_host(
            &parse("http://example.com:8080/a"),
            &parse("https://example.com/b")
        ));
        assert!(!same_host(
            &parse("http://example.com/"),
            &parse("http://other.com/")
        ));
    }

    #[test]
    fn test_same_origin_checks_port() {
        assert!(same_origin(
            &parse("http://127.0.0.1:4000/a"),
            &parse("http://127.0.0.1:4000/b?q")
        ));
        assert!(!same_origin(
            &parse("http://127.0.0.1:4000/"),
            &parse("http://127.0.0.1:4001/")
        ));
        assert!(same_origin(
            &parse("http://example.com/"),
            &parse("http://example.com:80/")
        ));
    }

    #[test]
    fn test_robots_url_for_bare_host() {
        let url = parse("http://127.0.0.1:4000");
        assert_eq!(
            robots_url(&url).unwrap().as_str(),
            "http://127.0.0.1:4000/robots.txt"
        );
    }
}
