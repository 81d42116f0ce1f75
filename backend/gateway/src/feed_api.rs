//! Feed endpoint (`GET /api/instagram`).
//!
//! Every outcome, success or failure, is answered with a `FetchEnvelope` body.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use instafeed_core::{Feed, FeedError, FetchEnvelope};

use crate::proxy::fetch_feed;
use crate::server::GatewayState;

/// Result of one proxy call, rendered as an envelope.
pub struct FeedResponse(pub Result<Feed, FeedError>);

impl IntoResponse for FeedResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(feed) => (StatusCode::OK, Json(FetchEnvelope::from(feed))).into_response(),
            Err(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(FetchEnvelope::from(&err))).into_response()
            }
        }
    }
}

/// Handler for `GET /api/instagram`.
pub async fn get_feed(State(state): State<GatewayState>) -> FeedResponse {
    let request_id = Uuid::new_v4();
    let result = fetch_feed(&state.config, state.graph.as_ref())
        .instrument(info_span!("feed_request", %request_id))
        .await;
    FeedResponse(result)
}
