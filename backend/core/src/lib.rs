pub mod envelope;
pub mod error;
pub mod types;

pub use envelope::{Feed, FetchEnvelope};
pub use error::FeedError;
pub use types::{MediaItem, Profile};
