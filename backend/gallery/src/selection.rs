//! Which media item, if any, is open in the detail modal.
//!
//! Owned by whoever renders the gallery and passed down explicitly.

use serde::Serialize;

use instafeed_core::MediaItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<MediaItem>,
}

/// What the detail modal shows for the open item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView<'a> {
    pub image_url: Option<&'a str>,
    pub alt: &'a str,
    pub caption: Option<&'a str>,
    pub permalink: &'a str,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `item`, replacing any open item. Returns the one replaced.
    pub fn open(&mut self, item: MediaItem) -> Option<MediaItem> {
        self.selected.replace(item)
    }

    pub fn close(&mut self) -> Option<MediaItem> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<&MediaItem> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn modal(&self) -> Option<ModalView<'_>> {
        self.selected.as_ref().map(|item| ModalView {
            image_url: item.display_url(),
            alt: item.alt_text(),
            caption: item.caption.as_deref().filter(|c| !c.is_empty()),
            permalink: &item.permalink,
        })
    }
}
