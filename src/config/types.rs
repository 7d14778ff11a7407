use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulated data source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Delay before a fetch resolves, in milliseconds (default: 1000).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Number of fresh items produced by each non-memoized fetch (default: 2).
    #[serde(default = "default_items_per_fetch")]
    pub items_per_fetch: usize,
    /// Payload returned by the memoized "once" fetch.
    #[serde(default = "default_once_items")]
    pub once_items: Vec<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset: "error", "warn", "info", "debug", "trace".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn default_latency_ms() -> u64 {
    1000
}

fn default_items_per_fetch() -> usize {
    2
}

fn default_once_items() -> Vec<String> {
    vec!["Constant Data Item".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoaderConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            items_per_fetch: default_items_per_fetch(),
            once_items: default_once_items(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
