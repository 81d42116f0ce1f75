//! Log Redaction Layer
//!
//! Scrubs access tokens from URLs and bearer headers prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static ACCESS_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(access_token=)[^&\s#]+").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Replaces the value of every `access_token` query parameter.
pub fn redact_access_token(url: &str) -> String {
    ACCESS_TOKEN_RE
        .replace_all(url, "${1}[REDACTED]")
        .into_owned()
}

/// Redacts access tokens and bearer credentials anywhere in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = redact_access_token(input);
    BEARER_RE
        .replace_all(&redacted, "Bearer [REDACTED]")
        .into_owned()
}
