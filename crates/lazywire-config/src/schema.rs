//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

pub use lazywire_protocols::{OrderingPolicy, RegistrySettings};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistrySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_ansi")]
    pub ansi: bool,

    /// Directory for rolling log files. Console only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,

    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            ansi: default_ansi(),
            log_dir: None,
            max_log_files: default_max_log_files(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

fn default_max_log_files() -> usize {
    7
}
