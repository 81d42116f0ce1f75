use thiserror::Error;

/// Message returned when no access token is configured.
pub const MISSING_TOKEN_MESSAGE: &str = "Missing Instagram access token";

/// Message returned for network or decoding failures. Details stay in the logs.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

pub const PAGINATION_LOOP_MESSAGE: &str = "Instagram pagination did not terminate";

/// Failures of a single feed fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("Missing Instagram access token")]
    MissingCredential,

    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("pagination did not terminate after {pages} pages")]
    PaginationLoop { pages: usize },
}

impl FeedError {
    /// HTTP status the proxy answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            FeedError::MissingCredential => 400,
            FeedError::Upstream { status, .. } => *status,
            FeedError::Transport(_) => 500,
            FeedError::PaginationLoop { .. } => 502,
        }
    }

    /// Message placed in the `{ error }` envelope.
    pub fn public_message(&self) -> String {
        match self {
            FeedError::MissingCredential => MISSING_TOKEN_MESSAGE.to_string(),
            FeedError::Upstream { message, .. } => message.clone(),
            FeedError::Transport(_) => SERVER_ERROR_MESSAGE.to_string(),
            FeedError::PaginationLoop { .. } => PAGINATION_LOOP_MESSAGE.to_string(),
        }
    }
}
