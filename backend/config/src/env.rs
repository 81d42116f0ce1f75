//! Environment lookup helpers.
//!
//! Values are read from a snapshot map so tests can supply their own.
//! Unset keys fall back silently; unparseable keys fall back with a warning.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, warn};

pub type EnvMap = HashMap<String, String>;

/// Snapshot the current process environment.
pub fn snapshot() -> EnvMap {
    std::env::vars().collect()
}

/// A non-empty, trimmed value for `key`.
pub fn non_empty(vars: &EnvMap, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn string_or(vars: &EnvMap, key: &str, default: &str) -> String {
    non_empty(vars, key).unwrap_or_else(|| {
        debug!("{key} not set, using default: {default}");
        default.to_string()
    })
}

pub fn parse_or<T>(vars: &EnvMap, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = non_empty(vars, key) else {
        return default;
    };
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}; using default {default}");
        default
    })
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` in any case.
pub fn bool_or(vars: &EnvMap, key: &str, default: bool) -> bool {
    let Some(raw) = non_empty(vars, key) else {
        return default;
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("Invalid {key} value {raw:?}; using default {default}");
            default
        }
    }
}
