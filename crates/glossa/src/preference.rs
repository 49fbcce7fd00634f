//! Durable storage of the user's last chosen language.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::types::LanguageCode;

/// Storage key (and file name) holding the preferred language.
pub const PREFERENCE_KEY: &str = "preferredLanguage";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to persist preference to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no configuration directory is available on this platform")]
    NoConfigDir,
}

/// Persists the last selected language across restarts.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// The saved language, or `None` if nothing was saved. Never an error.
    async fn load(&self) -> Option<LanguageCode>;

    async fn save(&self, code: &LanguageCode) -> Result<(), PreferenceError>;
}

/// A preference kept only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<LanguageCode>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(code: impl Into<LanguageCode>) -> Self {
        Self {
            value: Mutex::new(Some(code.into())),
        }
    }

    /// Current stored value without going through the async trait.
    pub fn get(&self) -> Option<LanguageCode> {
        self.value.lock().ok().and_then(|value| value.clone())
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self) -> Option<LanguageCode> {
        self.get()
    }

    async fn save(&self, code: &LanguageCode) -> Result<(), PreferenceError> {
        if let Ok(mut value) = self.value.lock() {
            *value = Some(code.clone());
        }
        Ok(())
    }
}

/// Stores the preference as plain text in `<dir>/preferredLanguage`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store under an explicit directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PREFERENCE_KEY),
        }
    }

    /// Store under the platform configuration directory for `app`.
    pub fn for_app(app: &str) -> Result<Self, PreferenceError> {
        let dir = dirs::config_dir().ok_or(PreferenceError::NoConfigDir)?;
        Ok(Self::new(dir.join(app)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load(&self) -> Option<LanguageCode> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let code = content.trim();
                (!code.is_empty()).then(|| LanguageCode::from(code))
            }
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    debug!(path = %self.path.display(), error = %e, "Ignoring unreadable preference");
                }
                None
            }
        }
    }

    async fn save(&self, code: &LanguageCode) -> Result<(), PreferenceError> {
        let io_error = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        fs::write(&self.path, code.as_str()).await.map_err(io_error)
    }
}
