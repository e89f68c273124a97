//! # Remote Write Exporter Telemetry
//!
//! Structured logging setup shared by the exporter binaries.

pub mod logging;

pub use logging::EventLogger;
