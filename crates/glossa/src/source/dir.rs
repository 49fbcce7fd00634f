use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::source::{CatalogSource, SourceError};

/// Serves resources from a directory on disk, e.g. an app's `language/` folder.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CatalogSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let full = self.root.join(path);
        fs::read(&full).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SourceError::NotFound {
                    path: path.to_owned(),
                }
            } else {
                SourceError::Io { path: full, source }
            }
        })
    }

    async fn exists(&self, path: &str) -> bool {
        let full = self.root.join(path);
        match fs::metadata(&full).await {
            Ok(meta) => meta.is_file(),
            Err(e) => {
                debug!(path = %full.display(), error = %e, "Probe failed");
                false
            }
        }
    }
}
