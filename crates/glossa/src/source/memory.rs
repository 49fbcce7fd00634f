use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::source::{CatalogSource, SourceError};

/// A request observed by a [`MemorySource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRequest {
    Fetch(String),
    Probe(String),
}

/// An in-process resource map, mostly useful in tests and embedded setups.
///
/// Every request is recorded so callers can assert on fetch counts.
///
/// ```
/// use glossa::source::MemorySource;
///
/// let source = MemorySource::new()
///     .with_resource("languages.json", r#"{"availableLanguages": ["en"]}"#)
///     .with_resource("en.json", r#"{"hello": "Hello"}"#);
/// assert_eq!(source.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    resources: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<SourceRequest>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(path.into(), body.into());
        self
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// All requests seen so far, in arrival order.
    pub fn requests(&self) -> Vec<SourceRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Number of body fetches issued for `path`.
    pub fn fetch_count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| matches!(request, SourceRequest::Fetch(p) if p == path))
            .count()
    }

    /// Forget the recorded requests.
    pub fn clear_requests(&self) {
        if let Ok(mut log) = self.requests.lock() {
            log.clear();
        }
    }

    fn record(&self, request: SourceRequest) {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        self.record(SourceRequest::Fetch(path.to_owned()));
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                path: path.to_owned(),
            })
    }

    async fn exists(&self, path: &str) -> bool {
        self.record(SourceRequest::Probe(path.to_owned()));
        self.resources.contains_key(path)
    }
}
