//! # Schoolhub Config
//!
//! Configuration types for the schoolhub client, loaded from environment
//! variables (a `.env` file is honoured by the binary through `dotenvy`):
//!
//! - [`api`]: Backend location and request settings
//! - [`storage`]: Where the persisted session and log files live
//! - [`logging`]: Console log level and file logging switch
//!
//! Every config has a `from_env()` constructor and a `from_lookup()` variant
//! that takes the variable source as a closure, which is what the tests use.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::{ApiConfig, LogConfig, StorageConfig};
//!
//! let api = ApiConfig::from_env();
//! let storage = StorageConfig::from_env();
//! let log = LogConfig::from_env();
//! ```

pub mod api;
pub mod logging;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use logging::LogConfig;
pub use storage::StorageConfig;

/// All client configuration in one place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api: ApiConfig::from_lookup(&lookup),
            storage: StorageConfig::from_lookup(&lookup),
            log: LogConfig::from_lookup(&lookup),
        }
    }
}
