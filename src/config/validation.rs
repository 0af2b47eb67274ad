use crate::config::types::{Config, CrawlerConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)
}

/// Validates crawler configuration
pub fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.workers < 1 {
        return Err(ConfigError::Validation(format!(
            "workers must be at least 1, got {}",
            config.workers
        )));
    }

    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout-ms must be greater than zero".to_string(),
        ));
    }

    if config.user_agent.chars().any(char::is_control) {
        return Err(ConfigError::Validation(format!(
            "user-agent must not contain control characters, got {:?}",
            config.user_agent
        )));
    }

    for header in &config.headers {
        parse_header(header)?;
    }

    Ok(())
}

/// Splits a "Name: value" header line into its trimmed parts
///
/// The name must be a valid HTTP token; the value may be empty.
pub fn parse_header(line: &str) -> Result<(String, String), ConfigError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ConfigError::InvalidHeader(line.to_string()))?;

    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_token_char) {
        return Err(ConfigError::InvalidHeader(line.to_string()));
    }

    let value = value.trim();
    if value.chars().any(|c| c.is_control() && c != '\t') {
        return Err(ConfigError::InvalidHeader(line.to_string()));
    }

    Ok((name.to_string(), value.to_string()))
}

/// RFC 9110 token characters
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}
