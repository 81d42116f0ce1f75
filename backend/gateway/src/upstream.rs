//! Instagram Graph API client.
//!
//! The proxy only needs "GET this URL, give me status and body"; decoding and
//! error mapping happen in [`crate::proxy`].

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use instafeed_core::FeedError;
use logging::{redact_access_token, redact_sensitive_data};

/// Field selection for the media listing.
pub const MEDIA_FIELDS: &str = "id,caption,media_url,thumbnail_url,permalink";

/// Field selection for the account profile.
pub const PROFILE_FIELDS: &str =
    "id,username,account_type,media_count,profile_picture_url,biography";

/// Raw upstream reply: status plus undecoded body.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single-attempt GET against the upstream API.
///
/// Network failures are reported as [`FeedError::Transport`]; any HTTP status,
/// including errors, is returned as a response.
#[async_trait]
pub trait GraphApi: Send + Sync {
    async fn get(&self, url: &str) -> Result<UpstreamResponse, FeedError>;
}

/// `reqwest`-backed Graph API client.
pub struct HttpGraphApi {
    client: Client,
}

impl HttpGraphApi {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpGraphApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphApi for HttpGraphApi {
    async fn get(&self, url: &str) -> Result<UpstreamResponse, FeedError> {
        debug!(url = %redact_access_token(url), "Sending request to Instagram");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Transport(redact_sensitive_data(&e.to_string())))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Transport(redact_sensitive_data(&e.to_string())))?;

        Ok(UpstreamResponse::new(status, body.to_vec()))
    }
}

/// `<base>/me/media?fields=...&access_token=...`
pub fn media_url(base: &str, token: &str) -> Result<String, FeedError> {
    build_url(base, "me/media", MEDIA_FIELDS, token)
}

/// `<base>/me?fields=...&access_token=...`
pub fn profile_url(base: &str, token: &str) -> Result<String, FeedError> {
    build_url(base, "me", PROFILE_FIELDS, token)
}

fn build_url(base: &str, path: &str, fields: &str, token: &str) -> Result<String, FeedError> {
    let endpoint = format!("{}/{}", base.trim_end_matches('/'), path);
    Url::parse_with_params(&endpoint, &[("fields", fields), ("access_token", token)])
        .map(String::from)
        .map_err(|e| FeedError::Transport(format!("invalid upstream URL {endpoint}: {e}")))
}
