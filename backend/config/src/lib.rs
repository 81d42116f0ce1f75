//! `instafeed-config` — process-wide configuration for the Instafeed proxy and gallery.
//!
//! Provides:
//! - Typed config read from environment variables (`Config::from_env`)
//! - Lenient value parsing with logged fallbacks
//! - Validation before the server or watcher starts
//! - Redaction of secrets for safe logging/display

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use redact::redact;
pub use schema::Config;
pub use validation::{validate, ConfigError};
