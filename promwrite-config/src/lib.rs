//! # Prometheus Remote Write Exporter Configuration
//!
//! Schema, loading and validation for the remote write exporter.
//!
//! ## Features
//! - **Schema**: one typed record for transport, retry, queueing,
//!   multi-tenancy, label handling and write-ahead log settings
//! - **Validation**: fail-fast checks that run before any data is sent
//! - **Layered Loading**: defaults, YAML file and `PROMWRITE_*` environment
//! - **Feature Gates**: process-wide switches such as permissive label
//!   sanitization

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

mod de;
mod error;
mod exporter;
pub mod featuregate;
mod provider;
mod queue;
mod tenancy;
mod transport;
mod validation;
mod wal;

pub use error::{ConfigError, GateError, InvalidConfig};
pub use exporter::ExporterConfig;
pub use featuregate::{Gate, GateSource, Registry, PERMISSIVE_LABEL_SANITIZATION};
pub use provider::{
    ConfigProvider, FileProvider, LayeredProvider, YamlStrProvider, DEFAULT_CONFIG_PATH,
    ENV_PREFIX,
};
pub use queue::RemoteWriteQueue;
pub use tenancy::MultiTenancy;
pub use transport::{
    HttpClientSettings, ResourceToTelemetrySettings, RetrySettings, TimeoutSettings,
    TlsClientSettings,
};
pub use validation::{validate_multi_tenancy, validate_queue};
pub use wal::WalConfig;

impl ExporterConfig {
    /// Load configuration from the default file and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/promwrite.yaml`. If missing, defaults are used.
    /// 3. `PROMWRITE_*` environment variables, `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&LayeredProvider::default())
    }

    /// Load configuration from a specific path, overridden by the environment.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_with(&FileProvider::new(path))
    }

    /// Extract and validate configuration from any provider.
    pub fn load_with<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self, ConfigError> {
        provider
            .load()?
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
