// src/reports/fake.rs
// In-memory GithubApi for report tests. Collections that were never
// registered answer with no items, like GitHub does for an empty list.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::github::{ApiError, GithubApi};

#[derive(Default)]
pub struct FakeApi {
    collections: HashMap<String, Vec<Value>>,
    resources: HashMap<String, Value>,
    undecodable: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection endpoint. `items` must be a JSON array.
    pub fn with_collection(mut self, path: &str, items: Value) -> Self {
        let items = match items {
            Value::Array(items) => items,
            other => panic!("collection {} must be an array, got {}", path, other),
        };
        self.collections.insert(path.to_string(), items);
        self
    }

    /// Registers a single resource for `fetch_one`.
    pub fn with_resource(mut self, path: &str, value: Value) -> Self {
        self.resources.insert(path.to_string(), value);
        self
    }

    /// Makes `path` answer with a body that isn't JSON (an empty repository).
    pub fn with_undecodable(mut self, path: &str) -> Self {
        self.undecodable.insert(path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    fn record(&self, path: &str) {
        self.calls.lock().unwrap().push(path.to_string());
    }
}

#[async_trait]
impl GithubApi for FakeApi {
    async fn fetch_all(&self, path: &str) -> Result<Vec<Value>, ApiError> {
        self.record(path);

        if self.undecodable.contains(path) {
            return Err(ApiError::Decode {
                url: path.to_string(),
                source: serde_json::from_str::<Value>("").unwrap_err(),
            });
        }

        Ok(self.collections.get(path).cloned().unwrap_or_default())
    }

    async fn fetch_one(&self, path: &str) -> Result<Value, ApiError> {
        self.record(path);

        self.resources.get(path).cloned().ok_or_else(|| ApiError::Status {
            url: path.to_string(),
            status: StatusCode::NOT_FOUND,
            message: "Not Found".to_string(),
        })
    }
}
