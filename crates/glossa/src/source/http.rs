use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::source::{CatalogSource, SourceError};

/// Serves resources over HTTP relative to a base URL.
///
/// Probes use `HEAD`; bodies use `GET`. Only 2xx responses count as present.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let url = self.url(path);
        let transport = |e: reqwest::Error| SourceError::Transport {
            url: url.clone(),
            message: e.to_string(),
        };
        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                path: path.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(SourceError::Http {
                url: url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }

    async fn exists(&self, path: &str) -> bool {
        let url = self.url(path);
        match self.client.head(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(url = %url, error = %e, "Probe failed");
                false
            }
        }
    }
}
