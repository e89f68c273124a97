//! Configuration providers for loading exporter configuration from various sources.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};

use crate::{ConfigError, ExporterConfig};

/// Prefix of environment overrides, e.g. `PROMWRITE_REMOTE_WRITE_QUEUE__QUEUE_SIZE`.
///
/// Keys are lowercased, so map keys set this way lose their case:
/// `PROMWRITE_EXTERNAL_LABELS__Cluster` sets the `cluster` label and
/// `PROMWRITE_HEADERS__X-Scope-OrgID` sets `x-scope-orgid`. Use the YAML file
/// for case-sensitive keys. Values are parsed as typed data; text fields keep
/// numeric and boolean values in their textual form.
pub const ENV_PREFIX: &str = "PROMWRITE_";

/// Base configuration file consulted by [`ExporterConfig::load`].
pub const DEFAULT_CONFIG_PATH: &str = "config/promwrite.yaml";

/// Trait for loading exporter configuration from different sources.
pub trait ConfigProvider {
    /// Loads the configuration and returns a Figment instance.
    fn load(&self) -> Result<Figment, ConfigError>;
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(ExporterConfig::default()))
}

/// Defaults, then the base file if it exists, then the environment.
#[derive(Debug, Clone)]
pub struct LayeredProvider {
    path: PathBuf,
}

impl LayeredProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for LayeredProvider {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

impl ConfigProvider for LayeredProvider {
    fn load(&self) -> Result<Figment, ConfigError> {
        let mut figment = defaults();
        if self.path.exists() {
            figment = figment.merge(Yaml::file(&self.path));
        } else {
            tracing::info!(
                path = %self.path.display(),
                "configuration file not found, using default configuration"
            );
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }
}

/// A file that must exist, overridden by the environment.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigProvider for FileProvider {
    fn load(&self) -> Result<Figment, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::FileNotFound(self.path.clone()));
        }
        tracing::debug!(path = %self.path.display(), "loading exporter configuration");
        Ok(defaults()
            .merge(Yaml::file(&self.path))
            .merge(Env::prefixed(ENV_PREFIX).split("__")))
    }
}

/// An in-memory YAML document, without environment overrides.
#[derive(Debug, Clone)]
pub struct YamlStrProvider {
    document: String,
}

impl YamlStrProvider {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl ConfigProvider for YamlStrProvider {
    fn load(&self) -> Result<Figment, ConfigError> {
        Ok(defaults().merge(Yaml::string(&self.document)))
    }
}
