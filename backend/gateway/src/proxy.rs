//! Paginating feed aggregator.
//!
//! One call fetches the profile (optional) and then every media page, strictly
//! in sequence, following `paging.next` until it is absent. Any failure discards
//! whatever was already aggregated.

use std::collections::HashSet;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use instafeed_config::Config;
use instafeed_core::{Feed, FeedError, MediaItem, Profile};
use logging::redact_access_token;

use crate::upstream::{GraphApi, UpstreamResponse, media_url, profile_url};

pub const PROFILE_FALLBACK_MESSAGE: &str = "Failed to fetch Instagram profile";
pub const MEDIA_FALLBACK_MESSAGE: &str = "Failed to fetch Instagram media";

#[derive(Deserialize)]
struct MediaPage {
    #[serde(default)]
    data: Option<Vec<MediaItem>>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Deserialize)]
struct Paging {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    error: Option<UpstreamErrorDetail>,
}

#[derive(Deserialize)]
struct UpstreamErrorDetail {
    message: Option<String>,
}

/// Fetch the complete feed for the configured account.
///
/// Reads the access token from `config` on every call; without one no upstream
/// request is made.
pub async fn fetch_feed(config: &Config, api: &dyn GraphApi) -> Result<Feed, FeedError> {
    let Some(token) = config.access_token.as_deref() else {
        warn!("Rejecting feed request: INSTAGRAM_ACCESS_TOKEN is not set");
        return Err(FeedError::MissingCredential);
    };

    let profile = if config.include_profile {
        Some(fetch_profile(&config.graph_base_url, token, api).await?)
    } else {
        None
    };

    let media = fetch_all_media(&config.graph_base_url, token, config.max_pages, api).await?;

    info!(
        items = media.len(),
        with_profile = profile.is_some(),
        "Feed aggregated"
    );
    Ok(Feed { media, profile })
}

async fn fetch_profile(base: &str, token: &str, api: &dyn GraphApi) -> Result<Profile, FeedError> {
    let url = profile_url(base, token)?;
    let response = api.get(&url).await.inspect_err(log_failure)?;
    decode(response, PROFILE_FALLBACK_MESSAGE).inspect_err(log_failure)
}

async fn fetch_all_media(
    base: &str,
    token: &str,
    max_pages: usize,
    api: &dyn GraphApi,
) -> Result<Vec<MediaItem>, FeedError> {
    let mut media = Vec::new();
    let mut seen = HashSet::new();
    let mut pages = 0usize;
    let mut next = Some(media_url(base, token)?);

    while let Some(url) = next.take() {
        if pages >= max_pages || !seen.insert(url.clone()) {
            warn!(
                pages,
                url = %redact_access_token(&url),
                "Pagination cursor repeated or page limit reached"
            );
            return Err(FeedError::PaginationLoop { pages });
        }
        pages += 1;

        let response = api.get(&url).await.inspect_err(log_failure)?;
        let page: MediaPage = decode(response, MEDIA_FALLBACK_MESSAGE).inspect_err(log_failure)?;

        let items = page.data.unwrap_or_default();
        debug!(page = pages, items = items.len(), "Media page received");
        media.extend(items);

        next = page
            .paging
            .and_then(|paging| paging.next)
            .filter(|cursor| !cursor.is_empty());
    }

    Ok(media)
}

/// Map an upstream reply to `T`, or to the error the proxy should report.
fn decode<T: DeserializeOwned>(response: UpstreamResponse, fallback: &str) -> Result<T, FeedError> {
    if !response.is_success() {
        let body: serde_json::Value = serde_json::from_slice(&response.body).map_err(|e| {
            FeedError::Transport(format!(
                "upstream status {} with non-JSON body: {e}",
                response.status
            ))
        })?;
        let message = serde_json::from_value::<UpstreamErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .and_then(|detail| detail.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(FeedError::Upstream {
            status: response.status,
            message,
        });
    }

    serde_json::from_slice(&response.body)
        .map_err(|e| FeedError::Transport(format!("unexpected upstream payload: {e}")))
}

fn log_failure(err: &FeedError) {
    warn!(error = %err, "Upstream fetch failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGraphApi;
    use serde_json::json;

    fn config(token: Option<&str>, include_profile: bool) -> Config {
        Config {
            access_token: token.map(str::to_string),
            graph_base_url: "https://graph.test".into(),
            include_profile,
            max_pages: 10,
            ..Config::default()
        }
    }

    fn item(id: &str) -> serde_json::Value {
        json!({ "id": id, "media_url": format!("https://cdn/{id}.jpg"), "permalink": format!("https://instagram.com/p/{id}") })
    }

    fn ids(feed: &Feed) -> Vec<&str> {
        feed.media.iter().map(|m| m.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_calls() {
        let api = MockGraphApi::new();
        let err = fetch_feed(&config(None, true), &api).await.unwrap_err();
        assert_eq!(err, FeedError::MissingCredential);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_two_pages_concatenate_in_order() {
        let api = MockGraphApi::new()
            .with_json(200, json!({ "data": [item("1")], "paging": { "next": "https://graph.test/P2" } }))
            .with_json(200, json!({ "data": [item("2")], "paging": {} }));

        let feed = fetch_feed(&config(Some("tok"), false), &api).await.unwrap();
        assert_eq!(ids(&feed), vec!["1", "2"]);
        assert!(feed.profile.is_none());

        let requests = api.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("https://graph.test/me/media?"));
        assert_eq!(requests[1], "https://graph.test/P2");
    }

    #[tokio::test]
    async fn test_many_pages_keep_length_and_order() {
        let mut api = MockGraphApi::new();
        let page_sizes = [3usize, 1, 4, 2];
        let mut expected = Vec::new();
        for (page, size) in page_sizes.iter().enumerate() {
            let items: Vec<_> = (0..*size)
                .map(|i| {
                    let id = format!("{page}-{i}");
                    expected.push(id.clone());
                    item(&id)
                })
                .collect();
            let paging = if page + 1 < page_sizes.len() {
                json!({ "next": format!("https://graph.test/page{}", page + 1) })
            } else {
                json!({ "next": "" })
            };
            api = api.with_json(200, json!({ "data": items, "paging": paging }));
        }

        let feed = fetch_feed(&config(Some("tok"), false), &api).await.unwrap();
        assert_eq!(feed.media.len(), page_sizes.iter().sum::<usize>());
        assert_eq!(ids(&feed), expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(api.call_count(), page_sizes.len());
    }

    #[tokio::test]
    async fn test_failure_on_later_page_discards_everything() {
        let api = MockGraphApi::new()
            .with_json(200, json!({ "data": [item("1")], "paging": { "next": "https://graph.test/P2" } }))
            .with_json(200, json!({ "data": [item("2")], "paging": { "next": "https://graph.test/P3" } }))
            .with_json(500, json!({ "error": { "message": "Please retry" } }));

        let err = fetch_feed(&config(Some("tok"), false), &api).await.unwrap_err();
        assert_eq!(
            err,
            FeedError::Upstream {
                status: 500,
                message: "Please retry".into()
            }
        );
        assert_eq!(api.call_count(), 3);
    }

    #[tokio::test]
    async fn test_invalid_token_on_first_page() {
        let api = MockGraphApi::new()
            .with_json(400, json!({ "error": { "message": "Invalid token" } }));

        let err = fetch_feed(&config(Some("bad"), false), &api).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Invalid token");
    }

    #[tokio::test]
    async fn test_error_without_message_uses_fallback() {
        let api = MockGraphApi::new().with_json(503, json!({ "error": "unavailable" }));

        let err = fetch_feed(&config(Some("tok"), false), &api).await.unwrap_err();
        assert_eq!(
            err,
            FeedError::Upstream {
                status: 503,
                message: MEDIA_FALLBACK_MESSAGE.into()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_server_error() {
        let api = MockGraphApi::new().with_raw(503, "<html>unavailable</html>");

        let err = fetch_feed(&config(Some("tok"), false), &api).await.unwrap_err();
        assert!(matches!(err, FeedError::Transport(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Server error");
    }

    #[tokio::test]
    async fn test_profile_fetched_first() {
        let api = MockGraphApi::new()
            .with_json(200, json!({ "id": "17841", "username": "studio", "media_count": 1 }))
            .with_json(200, json!({ "data": [item("1")] }));

        let feed = fetch_feed(&config(Some("tok"), true), &api).await.unwrap();
        let profile = feed.profile.as_ref().unwrap();
        assert_eq!(profile.username, "studio");
        assert_eq!(ids(&feed), vec!["1"]);
        assert!(api.requests()[0].starts_with("https://graph.test/me?fields="));
    }

    #[tokio::test]
    async fn test_profile_failure_is_terminal() {
        let api = MockGraphApi::new()
            .with_json(401, json!({ "error": {} }))
            .with_json(200, json!({ "data": [item("1")] }));

        let err = fetch_feed(&config(Some("tok"), true), &api).await.unwrap_err();
        assert_eq!(
            err,
            FeedError::Upstream {
                status: 401,
                message: PROFILE_FALLBACK_MESSAGE.into()
            }
        );
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_profile_is_transport_error() {
        let api = MockGraphApi::new().with_json(200, json!({ "id": 1, "username": ["x"] }));

        let err = fetch_feed(&config(Some("tok"), true), &api).await.unwrap_err();
        assert!(matches!(err, FeedError::Transport(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_network_failure_maps_to_server_error() {
        let api = MockGraphApi::new().with_transport_error("connection reset");

        let err = fetch_feed(&config(Some("tok"), false), &api).await.unwrap_err();
        assert_eq!(err.public_message(), "Server error");
    }

    #[tokio::test]
    async fn test_repeated_cursor_stops_pagination() {
        let api = MockGraphApi::new()
            .with_json(200, json!({ "data": [item("1")], "paging": { "next": "https://graph.test/P2" } }))
            .with_json(200, json!({ "data": [item("2")], "paging": { "next": "https://graph.test/P2" } }));

        let err = fetch_feed(&config(Some("tok"), false), &api).await.unwrap_err();
        assert_eq!(err, FeedError::PaginationLoop { pages: 2 });
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_page_limit_is_enforced() {
        let mut cfg = config(Some("tok"), false);
        cfg.max_pages = 2;
        let api = MockGraphApi::new()
            .with_json(200, json!({ "data": [], "paging": { "next": "https://graph.test/P2" } }))
            .with_json(200, json!({ "data": [], "paging": { "next": "https://graph.test/P3" } }));

        let err = fetch_feed(&cfg, &api).await.unwrap_err();
        assert_eq!(err.status_code(), 502);
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_page_without_data_contributes_nothing() {
        let api = MockGraphApi::new()
            .with_json(200, json!({ "paging": { "next": "https://graph.test/P2" } }))
            .with_json(200, json!({ "data": [item("2")] }));

        let feed = fetch_feed(&config(Some("tok"), false), &api).await.unwrap();
        assert_eq!(ids(&feed), vec!["2"]);
    }
}
