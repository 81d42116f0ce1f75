use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::types::{MediaItem, Profile};

/// Aggregated result of one successful fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub media: Vec<MediaItem>,
    pub profile: Option<Profile>,
}

/// The JSON body exchanged between proxy and client.
///
/// An object carrying `error` is a failure whatever else it holds; any other
/// object is a success whose `data` defaults to an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchEnvelope {
    Failure {
        error: String,
    },
    Success {
        #[serde(default)]
        data: Vec<MediaItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile: Option<Profile>,
    },
}

impl FetchEnvelope {
    pub fn failure(message: impl Into<String>) -> Self {
        FetchEnvelope::Failure {
            error: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchEnvelope::Failure { .. })
    }
}

impl From<Feed> for FetchEnvelope {
    fn from(feed: Feed) -> Self {
        FetchEnvelope::Success {
            data: feed.media,
            profile: feed.profile,
        }
    }
}

impl From<&FeedError> for FetchEnvelope {
    fn from(err: &FeedError) -> Self {
        FetchEnvelope::failure(err.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_without_data() {
        let value = serde_json::to_value(FetchEnvelope::failure("Invalid token")).unwrap();
        assert_eq!(value, json!({ "error": "Invalid token" }));
    }

    #[test]
    fn test_success_omits_absent_profile() {
        let feed = Feed {
            media: vec![MediaItem::new("1", "https://instagram.com/p/1")],
            profile: None,
        };
        let value = serde_json::to_value(FetchEnvelope::from(feed)).unwrap();
        assert_eq!(
            value,
            json!({ "data": [{ "id": "1", "permalink": "https://instagram.com/p/1" }] })
        );
    }

    #[test]
    fn test_error_key_wins_when_decoding() {
        let env: FetchEnvelope =
            serde_json::from_value(json!({ "error": "boom", "data": [] })).unwrap();
        assert_eq!(env, FetchEnvelope::failure("boom"));
    }

    #[test]
    fn test_missing_data_defaults_to_empty() {
        let env: FetchEnvelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            env,
            FetchEnvelope::Success {
                data: vec![],
                profile: None
            }
        );
    }

    #[test]
    fn test_feed_error_maps_to_public_message() {
        let env = FetchEnvelope::from(&FeedError::MissingCredential);
        assert_eq!(env, FetchEnvelope::failure("Missing Instagram access token"));
    }
}
