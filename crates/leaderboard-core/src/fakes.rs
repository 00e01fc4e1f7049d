//! In-memory fakes for the fetch capability (testing only)
//!
//! `MemoryFetcher` serves canned responses by path and records every
//! request it sees, so tests can assert what a resolver asked for.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::FetchError;
use crate::fetch::{FetchRequest, FetchResponse, Fetcher};

/// In-memory fetcher backed by a `HashMap<path, body>`.
///
/// Unknown paths answer 404.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`.
    pub fn with_body(self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    /// Serve `value` serialized as JSON for `path`.
    pub fn with_json(self, path: impl Into<String>, value: &serde_json::Value) -> Self {
        self.insert(path, value.to_string().into_bytes());
        self
    }

    pub fn insert(&self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        let mut bodies = self.bodies.lock().unwrap();
        bodies.insert(path.into(), body.into());
    }

    /// Paths requested so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        self.requests.lock().unwrap().push(request.path.clone());

        let bodies = self.bodies.lock().unwrap();
        Ok(match bodies.get(&request.path) {
            Some(body) => FetchResponse::ok(request.path.clone(), body.clone()),
            None => FetchResponse::not_found(request.path.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_fetcher_serves_and_records() {
        let fetcher = MemoryFetcher::new().with_json("static/m1.json", &json!([]));

        let hit = fetcher.fetch(&FetchRequest::new("static/m1.json")).await.unwrap();
        assert!(hit.is_success());
        assert_eq!(hit.body, b"[]");

        let miss = fetcher.fetch(&FetchRequest::new("static/m2.json")).await.unwrap();
        assert_eq!(miss.status, 404);

        assert_eq!(fetcher.requests(), vec!["static/m1.json", "static/m2.json"]);
    }
}
