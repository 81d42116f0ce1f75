//! Config validation: checks run before the server or watcher starts.

use thiserror::Error;

use crate::schema::Config;

/// A config validation error with the offending variable and message.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config validation error at '{key}': {message}")]
pub struct ConfigError {
    pub key: String,
    pub message: String,
}

impl ConfigError {
    fn new(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Validate the config, returning every error found in one pass.
///
/// A missing access token is not an error here: the proxy reports it per request.
pub fn validate(config: &Config) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !is_http_url(&config.graph_base_url) {
        errors.push(ConfigError::new(
            "INSTAGRAM_GRAPH_URL",
            "must start with http:// or https://",
        ));
    }
    if !is_http_url(&config.proxy_url) {
        errors.push(ConfigError::new(
            "GALLERY_PROXY_URL",
            "must start with http:// or https://",
        ));
    }
    if config.max_pages == 0 {
        errors.push(ConfigError::new("INSTAGRAM_MAX_PAGES", "must be at least 1"));
    }
    if config.refresh_interval_secs == 0 {
        errors.push(ConfigError::new("GALLERY_REFRESH_SECS", "must be at least 1"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
