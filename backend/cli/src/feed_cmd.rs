//! Gallery commands: one-shot fetch, continuous watch, and item detail.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;

use instafeed_config::Config;
use instafeed_core::FetchEnvelope;
use instafeed_gallery::{Favorites, GalleryView, GalleryViewModel, HttpFeedClient, Selection};
use instafeed_gateway::server::shutdown_signal;

use crate::terminal_output;

fn view_model(config: &Config) -> Arc<GalleryViewModel> {
    let client = HttpFeedClient::new(config.proxy_url.clone());
    Arc::new(GalleryViewModel::new(Arc::new(client)))
}

/// The envelope equivalent of a settled view.
fn envelope(view: GalleryView) -> Option<FetchEnvelope> {
    match view {
        GalleryView::Loading => None,
        GalleryView::Error(message) => Some(FetchEnvelope::failure(message)),
        GalleryView::Grid { media, profile } => Some(FetchEnvelope::Success {
            data: media,
            profile,
        }),
    }
}

pub async fn fetch(config: &Config, json: bool) -> Result<()> {
    let vm = view_model(config);
    vm.refresh().await;

    if json {
        if let Some(envelope) = envelope(vm.view()) {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        return Ok(());
    }

    let favorites = Favorites::load(&config.favorites_path).await;
    terminal_output::print_view(&vm.view(), &favorites);
    Ok(())
}

pub async fn watch(config: &Config) -> Result<()> {
    let vm = view_model(config);
    let favorites = Favorites::load(&config.favorites_path).await;
    let mut updates = vm.subscribe();

    let auto_refresh = vm.mount(Duration::from_secs(config.refresh_interval_secs));
    info!(proxy = %config.proxy_url, "Watching gallery; press Ctrl-C to stop");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().view();
                if view != GalleryView::Loading {
                    terminal_output::print_view(&view, &favorites);
                }
            }
            _ = &mut shutdown => break,
        }
    }

    auto_refresh.stop();
    Ok(())
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let vm = view_model(config);
    vm.refresh().await;

    let media = match vm.view() {
        GalleryView::Grid { media, .. } => media,
        GalleryView::Error(message) => bail!("{message}"),
        GalleryView::Loading => bail!("gallery did not finish loading"),
    };

    let item = media
        .into_iter()
        .find(|item| item.id == id)
        .with_context(|| format!("no media item with id {id}"))?;

    let mut selection = Selection::new();
    selection.open(item);
    if let Some(modal) = selection.modal() {
        println!("{}", serde_json::to_string_pretty(&modal)?);
    }
    Ok(())
}
