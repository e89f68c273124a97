//! Transport, timeout and retry settings.
//!
//! These records are owned by the HTTP client and the retry executor. They are
//! carried here so the whole exporter can be decoded from one document, but
//! they are not validated by this crate.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::de;

fn default_write_buffer_size() -> usize {
    512 * 1024
}

fn default_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_true() -> bool {
    true
}

fn default_initial_interval() -> Duration {
    Duration::from_millis(50)
}

fn default_max_interval() -> Duration {
    Duration::from_millis(200)
}

fn default_max_elapsed_time() -> Duration {
    Duration::from_secs(60)
}

/// HTTP client settings for the remote write endpoint.
///
/// Decoded from the top level of the exporter document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HttpClientSettings {
    /// Remote write URL, e.g. `https://prometheus:9090/api/v1/write`.
    pub endpoint: String,

    /// Extra headers sent with every request.
    #[serde(deserialize_with = "de::text_map")]
    pub headers: BTreeMap<String, String>,

    /// Read buffer size of the HTTP client. Responses are tiny, so 0 is fine.
    pub read_buffer_size: usize,

    /// Write buffer size of the HTTP client (bytes).
    pub write_buffer_size: usize,

    pub tls: TlsClientSettings,
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            headers: BTreeMap::new(),
            read_buffer_size: 0,
            write_buffer_size: default_write_buffer_size(),
            tls: TlsClientSettings::default(),
        }
    }
}

/// Client-side TLS settings.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TlsClientSettings {
    /// Use plain HTTP.
    pub insecure: bool,
    pub insecure_skip_verify: bool,
    pub ca_file: String,
    pub cert_file: String,
    pub key_file: String,
    pub server_name_override: String,
}

/// Per-request timeout, decoded from the top level `timeout` key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutSettings {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

/// Exponential backoff policy applied to failed requests (`retry_on_failure`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Wait before the first retry.
    #[serde(default = "default_initial_interval", with = "humantime_serde")]
    pub initial_interval: Duration,

    /// Upper bound on the wait between consecutive retries.
    #[serde(default = "default_max_interval", with = "humantime_serde")]
    pub max_interval: Duration,

    /// Total time spent retrying a batch before it is dropped.
    #[serde(default = "default_max_elapsed_time", with = "humantime_serde")]
    pub max_elapsed_time: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            initial_interval: default_initial_interval(),
            max_interval: default_max_interval(),
            max_elapsed_time: default_max_elapsed_time(),
        }
    }
}

/// Converts resource attributes into metric labels when enabled.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceToTelemetrySettings {
    pub enabled: bool,
}
