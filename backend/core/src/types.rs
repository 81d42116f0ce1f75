use serde::{Deserialize, Serialize};

/// Alt text used when a media item carries no caption.
pub const DEFAULT_ALT_TEXT: &str = "Instagram media";

/// A single post from the upstream media listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub permalink: String,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            caption: None,
            media_url: None,
            thumbnail_url: None,
            permalink: permalink.into(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }

    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// URL to render for this item: the media itself, else its thumbnail.
    ///
    /// `None` means an empty image slot; callers must not treat it as an error.
    pub fn display_url(&self) -> Option<&str> {
        self.media_url
            .as_deref()
            .or(self.thumbnail_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn alt_text(&self) -> &str {
        match self.caption.as_deref() {
            Some(caption) if !caption.is_empty() => caption,
            _ => DEFAULT_ALT_TEXT,
        }
    }
}

/// Account profile returned by the upstream `me` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
}
