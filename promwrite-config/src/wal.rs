//! Write-ahead log configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_buffer_size() -> usize {
    300
}

fn default_truncate_frequency() -> Duration {
    Duration::from_secs(60)
}

/// Settings for persisting samples before they are sent.
///
/// Only present on [`ExporterConfig`](crate::ExporterConfig) when the `wal`
/// key exists in the document; absence disables the WAL.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WalConfig {
    /// Directory holding the log segments.
    #[serde(default)]
    pub directory: String,

    /// Number of requests read from the WAL per send.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// How often already-sent entries are truncated.
    #[serde(default = "default_truncate_frequency", with = "humantime_serde")]
    pub truncate_frequency: Duration,
}

impl Default for WalConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            buffer_size: default_buffer_size(),
            truncate_frequency: default_truncate_frequency(),
        }
    }
}
