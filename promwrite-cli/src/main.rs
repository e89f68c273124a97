//! ## promwrite-cli
//! Operator tool for the remote write exporter configuration.
//!
//! `promwrite check` loads and validates a configuration the same way the
//! exporter does at startup; `promwrite gates` lists feature gates.

use clap::Parser;
use promwrite_telemetry::logging::EventLogger;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    EventLogger::init(&cli.log_level);

    commands::run_command(cli)
}
