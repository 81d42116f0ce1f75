//! Client side of the gallery: drives the feed proxy and holds what the view renders.

pub mod auto_refresh;
pub mod client;
pub mod favorites;
pub mod selection;
pub mod view_model;

pub use auto_refresh::AutoRefresh;
pub use client::{FeedClient, HttpFeedClient};
pub use favorites::Favorites;
pub use selection::{ModalView, Selection};
pub use view_model::{GalleryState, GalleryView, GalleryViewModel, LOAD_FAILED_MESSAGE};
