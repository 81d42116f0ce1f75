//! Default values applied when an environment variable is unset or invalid.

use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Instagram Basic Display API host.
pub const DEFAULT_GRAPH_URL: &str = "https://graph.instagram.com";

/// Upper bound on media pages followed in one fetch cycle.
pub const DEFAULT_MAX_PAGES: usize = 200;

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000/api/instagram";

/// Gallery auto-refresh period (3 minutes).
pub const DEFAULT_REFRESH_SECS: u64 = 180;

pub const DEFAULT_LOG_LEVEL: &str = "info";

const FAVORITES_FILE_NAME: &str = "favorites.json";

/// Resolve the default favourites file.
/// Priority: platform data dir > home dir > current dir.
pub fn default_favorites_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        return data.join("instafeed").join(FAVORITES_FILE_NAME);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".instafeed").join(FAVORITES_FILE_NAME);
    }
    PathBuf::from(".instafeed").join(FAVORITES_FILE_NAME)
}
