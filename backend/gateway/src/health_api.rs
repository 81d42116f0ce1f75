//! Gateway Health API

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health() -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "instafeed",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}
