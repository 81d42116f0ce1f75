use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use instafeed_core::FeedError;

use crate::upstream::{GraphApi, UpstreamResponse};

/// A mock Graph API that replays scripted replies in order and records every URL requested.
#[derive(Default)]
pub struct MockGraphApi {
    replies: Mutex<VecDeque<Result<UpstreamResponse, FeedError>>>,
    requests: Mutex<Vec<String>>,
}

impl MockGraphApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply with the given status.
    pub fn with_json(self, status: u16, body: Value) -> Self {
        self.push(Ok(UpstreamResponse::new(status, body.to_string())))
    }

    /// Queue a raw reply body.
    pub fn with_raw(self, status: u16, body: &str) -> Self {
        self.push(Ok(UpstreamResponse::new(status, body)))
    }

    /// Queue a network failure.
    pub fn with_transport_error(self, detail: &str) -> Self {
        self.push(Err(FeedError::Transport(detail.to_string())))
    }

    fn push(self, reply: Result<UpstreamResponse, FeedError>) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl GraphApi for MockGraphApi {
    async fn get(&self, url: &str) -> Result<UpstreamResponse, FeedError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Err(FeedError::Transport("no scripted reply".into())))
    }
}
