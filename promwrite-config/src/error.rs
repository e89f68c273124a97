//! Error types for configuration loading and validation

use std::path::PathBuf;
use thiserror::Error;

/// Reason a populated [`ExporterConfig`](crate::ExporterConfig) is rejected.
///
/// Each variant carries a fixed message that is surfaced to the operator
/// unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfig {
    #[error("remote write queue size can't be negative")]
    NegativeQueueSize,

    #[error("a 0 size queue will drop all the data")]
    ZeroSizeQueue,

    #[error("remote write consumer number can't be negative")]
    NegativeConsumers,

    #[error("one of multi_tenancy header or query_param should be set")]
    MissingTenantCarrier,

    #[error("from_label should be set to find tenant name")]
    MissingFromLabel,
}

impl InvalidConfig {
    /// Configuration key the rejection refers to.
    pub fn field(&self) -> &'static str {
        match self {
            InvalidConfig::NegativeQueueSize | InvalidConfig::ZeroSizeQueue => {
                "remote_write_queue.queue_size"
            }
            InvalidConfig::NegativeConsumers => "remote_write_queue.num_consumers",
            InvalidConfig::MissingTenantCarrier => "multi_tenancy",
            InvalidConfig::MissingFromLabel => "multi_tenancy.from_label",
        }
    }
}

/// Unified configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found error.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The loaded configuration failed validation.
    #[error(transparent)]
    Invalid(#[from] InvalidConfig),

    /// Figment parsing error.
    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),
}

/// Feature gate registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("attempted to add pre-existing gate {0:?}")]
    AlreadyRegistered(String),

    #[error("feature gate {0:?} is unregistered")]
    Unregistered(String),

    #[error("empty feature gate id in {0:?}")]
    EmptyId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_surfaces_verbatim_through_config_error() {
        let err = ConfigError::from(InvalidConfig::ZeroSizeQueue);
        assert_eq!(err.to_string(), "a 0 size queue will drop all the data");
    }

    #[test]
    fn field_names_match_document_keys() {
        assert_eq!(
            InvalidConfig::NegativeConsumers.field(),
            "remote_write_queue.num_consumers"
        );
        assert_eq!(InvalidConfig::MissingFromLabel.field(), "multi_tenancy.from_label");
    }
}
