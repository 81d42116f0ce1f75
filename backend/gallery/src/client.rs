use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use instafeed_core::FetchEnvelope;

/// Source of feed envelopes for the view model.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// One call to the proxy. `Err` means the call itself failed, not that the
    /// proxy reported an error; those arrive as `FetchEnvelope::Failure`.
    async fn fetch(&self) -> Result<FetchEnvelope>;
}

/// Calls the proxy endpoint over HTTP.
///
/// The HTTP status is ignored; only the envelope shape matters.
pub struct HttpFeedClient {
    client: Client,
    endpoint: String,
}

impl HttpFeedClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self) -> Result<FetchEnvelope> {
        debug!(endpoint = %self.endpoint, "Requesting feed");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .context("Feed proxy request failed")?;

        response
            .json::<FetchEnvelope>()
            .await
            .context("Failed to parse feed envelope")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tokio::net::TcpListener;

    use instafeed_config::Config;
    use instafeed_core::MediaItem;
    use instafeed_gateway::mock::MockGraphApi;
    use instafeed_gateway::{GatewayState, build_router};

    use super::*;

    async fn serve(config: Config, graph: MockGraphApi) -> String {
        let state = GatewayState::new(config, Arc::new(graph));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{addr}/api/instagram")
    }

    fn config_with_token(token: Option<&str>) -> Config {
        Config {
            access_token: token.map(str::to_string),
            include_profile: false,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_error_statuses_decode_as_failure_envelopes() {
        let endpoint = serve(config_with_token(None), MockGraphApi::new()).await;
        let envelope = HttpFeedClient::new(endpoint).fetch().await.unwrap();
        assert_eq!(envelope, FetchEnvelope::failure("Missing Instagram access token"));

        let graph = MockGraphApi::new()
            .with_json(400, json!({ "error": { "message": "Invalid token" } }));
        let endpoint = serve(config_with_token(Some("bad")), graph).await;
        let envelope = HttpFeedClient::new(endpoint).fetch().await.unwrap();
        assert_eq!(envelope, FetchEnvelope::failure("Invalid token"));
    }

    #[tokio::test]
    async fn test_success_envelope_over_http() {
        let graph = MockGraphApi::new().with_json(
            200,
            json!({ "data": [{ "id": "1", "permalink": "https://instagram.com/p/1" }] }),
        );
        let endpoint = serve(config_with_token(Some("tok")), graph).await;

        let envelope = HttpFeedClient::new(endpoint).fetch().await.unwrap();
        assert_eq!(
            envelope,
            FetchEnvelope::Success {
                data: vec![MediaItem::new("1", "https://instagram.com/p/1")],
                profile: None,
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpFeedClient::new(format!("http://{addr}/api/instagram"));
        assert!(client.fetch().await.is_err());
    }
}
