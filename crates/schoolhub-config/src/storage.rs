//! Local storage configuration.
//!
//! - `SCHOOLHUB_DATA_DIR`: Directory for the persisted session and logs
//!   (default: `<platform data dir>/schoolhub`, falling back to `./storage`)

use std::path::PathBuf;

/// File holding the persisted key/value storage document.
pub const STORAGE_FILE: &str = "storage.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("SCHOOLHUB_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|dir| dir.join("schoolhub")))
            .unwrap_or_else(|| PathBuf::from("storage"));

        Self { data_dir }
    }

    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
