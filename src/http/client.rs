//! reqwest-backed [`Transport`] implementation

use crate::config::{parse_header, CrawlerConfig};
use crate::http::{Transport, TransportError};
use crate::{ConfigError, CrawlError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect::Policy, Client};
use url::Url;

/// User-Agent header sent when no user-agent token is configured
pub fn default_user_agent() -> String {
    format!("sumi-crawl/{}", env!("CARGO_PKG_VERSION"))
}

/// HTTP client shared by every worker of a crawl
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds an HTTP client from the crawler configuration
    ///
    /// The configured timeout applies to each request as a whole, extra headers
    /// are attached to every request, and redirects are followed up to 10 hops.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sumi_crawl::config::CrawlerConfig;
    /// use sumi_crawl::http::HttpClient;
    ///
    /// let client = HttpClient::new(&CrawlerConfig::default()).unwrap();
    /// ```
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let user_agent = if config.user_agent.is_empty() {
            default_user_agent()
        } else {
            config.user_agent.clone()
        };

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(build_headers(&config.headers)?)
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .redirect(Policy::limited(10))
            .danger_accept_invalid_certs(config.skip_tls_verify)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

/// Converts "Name: value" lines into a header map
fn build_headers(lines: &[String]) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();

    for line in lines {
        let (name, value) = parse_header(line)?;
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(line.clone()))?;
        let value =
            HeaderValue::from_str(&value).map_err(|_| ConfigError::InvalidHeader(line.clone()))?;
        headers.append(name, value);
    }

    Ok(headers)
}

#[async_trait]
impl Transport for HttpClient {
    async fn head(&self, url: &Url) -> Result<HeaderMap, TransportError> {
        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(TransportError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        Ok(response.headers().clone())
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(TransportError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(body.to_vec())
    }
}
