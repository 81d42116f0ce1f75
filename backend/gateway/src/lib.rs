//! Instafeed Gateway HTTP API Server
//!
//! Hides the Instagram access token behind `GET /api/instagram` and presents the
//! paginated Graph API as one aggregated `{ data, profile? }` envelope.

pub mod feed_api;
pub mod health_api;
pub mod mock;
pub mod proxy;
pub mod server;
pub mod upstream;

pub use proxy::fetch_feed;
pub use server::{GatewayState, build_router, start_server};
pub use upstream::{GraphApi, HttpGraphApi, UpstreamResponse};
