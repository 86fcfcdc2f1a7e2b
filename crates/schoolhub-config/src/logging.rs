//! Logging configuration.
//!
//! - `LOG_LEVEL`: Console level for schoolhub targets (default: `warn`; the
//!   shell prints its own output, logs are for diagnosis)
//! - `SCHOOLHUB_LOG_FILE`: Set to `false`/`0` to disable the JSON log file

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub file_enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_enabled: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            level: lookup("LOG_LEVEL")
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.level),
            file_enabled: lookup("SCHOOLHUB_LOG_FILE")
                .map(|s| !matches!(s.trim().to_lowercase().as_str(), "false" | "0" | "off"))
                .unwrap_or(defaults.file_enabled),
        }
    }
}
