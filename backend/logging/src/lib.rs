//! Telemetry and structured logging components for Instafeed.
//!
//! Handles console/NDJSON output, file rotation, and scrubbing access tokens from logged URLs.

pub mod logger;
pub mod redact;

pub use logger::{LogGuard, init_logger};
pub use redact::{redact_access_token, redact_sensitive_data};
