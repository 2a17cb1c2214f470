use crate::config::types::{Config, ScraperConfig, UserAgentConfig};
use crate::url::{document_url, parse_page_url};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates archive walk configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    parse_page_url(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-url: {}", e)))?;

    if config.output.trim().is_empty() {
        return Err(ConfigError::Validation("output cannot be empty".to_string()));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set, got 0".to_string(),
        ));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1 when set, got 0".to_string(),
        ));
    }

    // The template must yield a usable address for any identifier
    document_url(&config.document_url_template, "0").map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid document-url-template: {}", e))
    })?;

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Ok(())
}
