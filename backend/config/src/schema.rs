use std::path::PathBuf;

use serde::Serialize;

use crate::defaults::{
    default_favorites_path, DEFAULT_BIND_ADDRESS, DEFAULT_GRAPH_URL, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_PAGES, DEFAULT_PORT, DEFAULT_PROXY_URL, DEFAULT_REFRESH_SECS,
};
use crate::env::{self, EnvMap};

/// Instafeed runtime configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Upstream credential; checked on every proxy request
    pub access_token: Option<String>,
    /// Upstream API base URL
    pub graph_base_url: String,
    /// Fetch the account profile alongside media
    pub include_profile: bool,
    /// Pagination guard
    pub max_pages: usize,

    // Gallery client
    pub proxy_url: String,
    pub refresh_interval_secs: u64,
    pub favorites_path: PathBuf,

    // Logging
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            access_token: None,
            graph_base_url: DEFAULT_GRAPH_URL.to_string(),
            include_profile: true,
            max_pages: DEFAULT_MAX_PAGES,
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            favorites_path: default_favorites_path(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_vars(&env::snapshot())
    }

    /// Load configuration from a provided variable map (useful for testing).
    pub fn from_vars(vars: &EnvMap) -> Self {
        Self {
            bind_address: env::string_or(vars, "INSTAFEED_BIND", DEFAULT_BIND_ADDRESS),
            port: env::parse_or(vars, "INSTAFEED_PORT", DEFAULT_PORT),
            access_token: env::non_empty(vars, "INSTAGRAM_ACCESS_TOKEN"),
            graph_base_url: env::string_or(vars, "INSTAGRAM_GRAPH_URL", DEFAULT_GRAPH_URL)
                .trim_end_matches('/')
                .to_string(),
            include_profile: env::bool_or(vars, "INSTAGRAM_INCLUDE_PROFILE", true),
            max_pages: env::parse_or(vars, "INSTAGRAM_MAX_PAGES", DEFAULT_MAX_PAGES),
            proxy_url: env::string_or(vars, "GALLERY_PROXY_URL", DEFAULT_PROXY_URL),
            refresh_interval_secs: env::parse_or(
                vars,
                "GALLERY_REFRESH_SECS",
                DEFAULT_REFRESH_SECS,
            ),
            favorites_path: env::non_empty(vars, "GALLERY_FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_favorites_path),
            log_level: env::string_or(vars, "RUST_LOG", DEFAULT_LOG_LEVEL),
            log_dir: env::non_empty(vars, "INSTAFEED_LOG_DIR").map(PathBuf::from),
        }
    }

    /// `bind:port` for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// A JSON snapshot safe to log: secrets are masked.
    pub fn redacted(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(value) => crate::redact::redact(&value),
            Err(_) => serde_json::Value::Null,
        }
    }
}
