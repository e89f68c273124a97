//! Root exporter configuration.
//!
//! Groups every setting the remote write exporter needs. Transport and
//! timeout settings are flattened into the top level of the document; every
//! other group lives under its own key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::de;
use crate::error::InvalidConfig;
use crate::featuregate::{self, GateSource, PERMISSIVE_LABEL_SANITIZATION};
use crate::queue::RemoteWriteQueue;
use crate::tenancy::MultiTenancy;
use crate::transport::{
    HttpClientSettings, ResourceToTelemetrySettings, RetrySettings, TimeoutSettings,
};
use crate::validation;
use crate::wal::WalConfig;

/// Configuration of the Prometheus remote write exporter.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExporterConfig {
    #[serde(flatten)]
    pub timeout: TimeoutSettings,

    #[serde(rename = "retry_on_failure", default)]
    pub retry: RetrySettings,

    /// Prefix attached to each exported metric name.
    #[serde(default, deserialize_with = "de::text")]
    pub namespace: String,

    #[serde(default)]
    pub remote_write_queue: RemoteWriteQueue,

    #[serde(default)]
    pub multi_tenancy: MultiTenancy,

    /// Labels added to every series. Keys may use the reserved `__` prefix.
    #[serde(default, deserialize_with = "de::text_map")]
    pub external_labels: BTreeMap<String, String>,

    #[serde(flatten)]
    pub http: HttpClientSettings,

    /// When enabled all resource attributes become metric labels.
    #[serde(rename = "resource_to_telemetry_conversion", default)]
    pub resource_to_telemetry: ResourceToTelemetrySettings,

    /// `None` disables the write-ahead log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wal: Option<WalConfig>,

    #[serde(skip, default = "sanitize_label_from_global")]
    sanitize_label: bool,
}

fn sanitize_label_from_gates(gates: &dyn GateSource) -> bool {
    !gates.is_enabled(PERMISSIVE_LABEL_SANITIZATION)
}

fn sanitize_label_from_global() -> bool {
    sanitize_label_from_gates(featuregate::global())
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            timeout: TimeoutSettings::default(),
            retry: RetrySettings::default(),
            namespace: String::new(),
            remote_write_queue: RemoteWriteQueue::default(),
            multi_tenancy: MultiTenancy::default(),
            external_labels: BTreeMap::new(),
            http: HttpClientSettings::default(),
            resource_to_telemetry: ResourceToTelemetrySettings::default(),
            wal: None,
            sanitize_label: sanitize_label_from_global(),
        }
    }
}

impl ExporterConfig {
    /// Check the configuration before the exporter starts.
    ///
    /// Returns the first rule that fails; queue rules are checked before
    /// multi-tenancy rules.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        validation::validate_queue(&self.remote_write_queue)?;
        validation::validate_multi_tenancy(&self.multi_tenancy)
    }

    /// Whether label keys starting with `_` are rewritten to `key_`.
    ///
    /// Derived from the [`PERMISSIVE_LABEL_SANITIZATION`] gate, never read
    /// from the document.
    pub fn sanitize_label(&self) -> bool {
        self.sanitize_label
    }

    /// Re-derive gate-controlled settings from `gates`.
    #[must_use]
    pub fn with_feature_gates(mut self, gates: &dyn GateSource) -> Self {
        self.sanitize_label = sanitize_label_from_gates(gates);
        self
    }

    /// True when the write-ahead log is configured.
    pub fn wal_enabled(&self) -> bool {
        self.wal.is_some()
    }
}
