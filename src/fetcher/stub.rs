//! Canned-response transport for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{QuranError, Result};
use crate::fetcher::Fetcher;

#[derive(Debug, Clone)]
pub enum StubReply {
    Body(Vec<u8>),
    Status(u16),
    /// Never answers within any reasonable timeout.
    Hang,
}

impl StubReply {
    pub fn text(body: &str) -> Self {
        StubReply::Body(body.as_bytes().to_vec())
    }
}

/// Answers each URL with the reply of the first rule whose pattern it contains.
/// Unmatched URLs get a 404.
#[derive(Default)]
pub struct StubFetcher {
    rules: Vec<(String, StubReply)>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, pattern: &str, reply: StubReply) -> Self {
        self.rules.push((pattern.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());

        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(StubReply::Status(404));

        match reply {
            StubReply::Body(body) => Ok(body),
            StubReply::Status(status) => Err(QuranError::Status {
                url: url.to_string(),
                status,
            }),
            StubReply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(QuranError::Transport("stub hang elapsed".into()))
            }
        }
    }
}
