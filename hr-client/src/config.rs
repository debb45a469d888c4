//! Client configuration

use std::path::PathBuf;

/// Default location of the local key/value store
pub const DEFAULT_STORAGE_FILE: &str = "hr-client-storage.json";

/// Client configuration for connecting to the HR server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// File backing [`LocalStorage`](crate::LocalStorage)
    pub storage_path: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}
