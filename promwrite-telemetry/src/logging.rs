//! ## promwrite-telemetry::logging
//! Structured logging with `tracing`.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the level passed
//! to [`EventLogger::init`].

use tracing::info_span;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Install the global subscriber.
    ///
    /// # Panics
    /// If a global subscriber is already installed.
    pub fn init(default_level: &str) {
        if let Err(err) = Self::try_init(default_level) {
            panic!("failed to install log subscriber: {err}");
        }
    }

    /// Install the global subscriber, failing if one is already installed.
    pub fn try_init(default_level: &str) -> Result<(), TryInitError> {
        use tracing_subscriber::util::SubscriberInitExt;

        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_thread_names(true)
            .with_writer(std::io::stderr)
            .finish()
            .try_init()
    }

    /// Record a configuration lifecycle event inside its own span.
    pub fn log_event(event_type: &str, source: &str, outcome: &str) {
        let _span = info_span!("config_event", event_type = event_type, source = source).entered();
        tracing::info!(outcome = outcome, "Configuration event");
    }
}
