use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use instafeed_core::{FetchEnvelope, MediaItem, Profile};

use crate::auto_refresh::AutoRefresh;
use crate::client::FeedClient;

/// Shown when the proxy could not be reached or answered garbage.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load gallery";

/// Everything the gallery view renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    pub media: Vec<MediaItem>,
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            media: Vec::new(),
            profile: None,
            loading: true,
            error: None,
        }
    }
}

impl GalleryState {
    /// What to draw: loading wins over error, error wins over the grid.
    pub fn view(&self) -> GalleryView {
        if self.loading {
            GalleryView::Loading
        } else if let Some(error) = &self.error {
            GalleryView::Error(error.clone())
        } else {
            GalleryView::Grid {
                media: self.media.clone(),
                profile: self.profile.clone(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryView {
    Loading,
    Error(String),
    Grid {
        media: Vec<MediaItem>,
        profile: Option<Profile>,
    },
}

/// Drives the feed proxy and holds gallery state.
///
/// Each `refresh` takes a generation number when it starts; its result is
/// applied only if no newer refresh has started since. Older results are dropped.
pub struct GalleryViewModel {
    client: Arc<dyn FeedClient>,
    state: watch::Sender<GalleryState>,
    generation: AtomicU64,
}

impl GalleryViewModel {
    pub fn new(client: Arc<dyn FeedClient>) -> Self {
        let (state, _) = watch::channel(GalleryState::default());
        Self {
            client,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> GalleryState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> GalleryView {
        self.state.borrow().view()
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<GalleryState> {
        self.state.subscribe()
    }

    /// Fetch the feed once and apply the outcome.
    ///
    /// Returns `false` when the result was superseded by a newer refresh.
    pub async fn refresh(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let outcome = self.client.fetch().await;

        let mut applied = false;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match outcome {
                Ok(FetchEnvelope::Success { data, profile }) => {
                    info!(items = data.len(), "Gallery refreshed");
                    state.media = data;
                    state.profile = profile;
                }
                Ok(FetchEnvelope::Failure { error }) => {
                    warn!(error = %error, "Feed proxy reported an error");
                    state.error = Some(error);
                }
                Err(e) => {
                    warn!(error = %e, "Feed request failed");
                    state.error = Some(LOAD_FAILED_MESSAGE.to_string());
                }
            }
            state.loading = false;
            applied = true;
            true
        });

        if !applied {
            debug!(generation, "Dropping stale refresh result");
        }
        applied
    }

    /// Refresh now and then every `period` until the returned handle is dropped.
    pub fn mount(self: &Arc<Self>, period: Duration) -> AutoRefresh {
        AutoRefresh::spawn(Arc::clone(self), period)
    }
}
