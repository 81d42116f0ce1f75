//! Favourited media ids, persisted as a JSON array.
//!
//! Read once on load; the whole file is rewritten after every change.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Favorites {
    path: PathBuf,
    ids: Vec<String>,
}

impl Favorites {
    /// Load favourites from `path`.
    ///
    /// A missing file is an empty set; an unreadable or malformed one is logged
    /// and treated as empty.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring malformed favourites file");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No favourites file yet");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read favourites file");
                Vec::new()
            }
        };
        Self { path, ids }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Favourited ids in the order they were added.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Flip `id` in or out of the set and persist. Returns whether it is now a favourite.
    ///
    /// The in-memory set only changes once the file has been written.
    pub async fn toggle(&mut self, id: &str) -> Result<bool> {
        let mut next = self.ids.clone();
        let now_favorite = match next.iter().position(|fav| fav == id) {
            Some(index) => {
                next.remove(index);
                false
            }
            None => {
                next.push(id.to_string());
                true
            }
        };
        self.persist(&next).await?;
        self.ids = next;
        info!(id, favorite = now_favorite, "Favourite toggled");
        Ok(now_favorite)
    }

    /// Write `ids` to disk atomically (temp file, then rename).
    async fn persist(&self, ids: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create favourites directory: {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string(ids).context("Failed to serialize favourites")?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write temp favourites: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!("Failed to rename temp favourites to: {}", self.path.display())
        })?;

        Ok(())
    }
}
