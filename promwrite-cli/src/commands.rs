use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use promwrite_config::{
    featuregate, ConfigError, ConfigProvider, ExporterConfig, FileProvider, GateSource,
    LayeredProvider, Registry,
};
use promwrite_telemetry::EventLogger;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Feature gate overrides, e.g. `+gate.one,-gate.two`
    #[arg(long, global = true, value_name = "GATES")]
    pub feature_gates: Option<String>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate an exporter configuration
    Check(CheckArgs),
    /// List registered feature gates
    Gates,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Configuration file; defaults to config/promwrite.yaml plus environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Print the effective configuration as YAML
    #[arg(long)]
    pub print: bool,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let registry = featuregate::global();
    apply_feature_gates(registry, cli.feature_gates.as_deref())?;

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Check(args) => run_check(&args, registry, &mut stdout),
        Commands::Gates => write_gates(registry, &mut stdout),
    }
}

/// Apply `--feature-gates` before any command reads gate state.
fn apply_feature_gates(registry: &Registry, flags: Option<&str>) -> anyhow::Result<()> {
    if let Some(flags) = flags {
        registry
            .apply_flags(flags)
            .context("invalid --feature-gates")?;
    }
    Ok(())
}

fn load_checked(
    provider: &dyn ConfigProvider,
    gates: &dyn GateSource,
) -> Result<ExporterConfig, ConfigError> {
    ExporterConfig::load_with(provider).map(|config| config.with_feature_gates(gates))
}

fn run_check(
    args: &CheckArgs,
    gates: &dyn GateSource,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let source = args
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| promwrite_config::DEFAULT_CONFIG_PATH.to_string());

    let loaded = match &args.config {
        Some(path) => load_checked(&FileProvider::new(path), gates),
        None => load_checked(&LayeredProvider::default(), gates),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            EventLogger::log_event("check", &source, "rejected");
            if let ConfigError::Invalid(reason) = &err {
                tracing::error!(field = reason.field(), "{reason}");
            }
            return Err(err.into());
        }
    };

    EventLogger::log_event("check", &source, "accepted");
    tracing::info!(
        endpoint = %config.http.endpoint,
        namespace = %config.namespace,
        queue_enabled = config.remote_write_queue.enabled,
        multi_tenancy = config.multi_tenancy.enabled,
        wal = config.wal_enabled(),
        sanitize_label = config.sanitize_label(),
        "exporter configuration is valid"
    );

    if args.print {
        out.write_all(serde_yaml::to_string(&config)?.as_bytes())?;
    }
    Ok(())
}

fn write_gates(registry: &Registry, out: &mut impl Write) -> anyhow::Result<()> {
    for gate in registry.list() {
        let state = if registry.is_enabled(&gate.id) {
            "enabled"
        } else {
            "disabled"
        };
        writeln!(out, "{}\t{}\t{}", gate.id, state, gate.description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promwrite_config::{Gate, GateError, YamlStrProvider, PERMISSIVE_LABEL_SANITIZATION};

    #[test]
    fn parses_check_with_global_flags() {
        let cli = Cli::try_parse_from([
            "promwrite",
            "check",
            "--config",
            "exporter.yaml",
            "--feature-gates",
            "+a,-b",
            "--print",
        ])
        .unwrap();
        assert_eq!(cli.feature_gates.as_deref(), Some("+a,-b"));
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.config, Some(PathBuf::from("exporter.yaml")));
                assert!(args.print);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn gates_command_takes_no_arguments() {
        assert!(Cli::try_parse_from(["promwrite", "gates", "extra"]).is_err());
    }

    #[test]
    fn gate_listing_shows_state() {
        let registry = Registry::new();
        registry.register(Gate::new("b.gate", true, "second")).unwrap();
        registry.register(Gate::new("a.gate", false, "first")).unwrap();

        let mut out = Vec::new();
        write_gates(&registry, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "a.gate\tdisabled\tfirst\nb.gate\tenabled\tsecond\n");
    }

    #[test]
    fn check_reports_missing_file() {
        let args = CheckArgs {
            config: Some(PathBuf::from("no/such/exporter.yaml")),
            print: false,
        };
        let err = run_check(&args, &Registry::new(), &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn unknown_feature_gate_aborts_before_command() {
        let cli = Cli::try_parse_from([
            "promwrite",
            "--feature-gates",
            "+no.such.gate",
            "gates",
        ])
        .unwrap();
        let err = run_command(cli).unwrap_err();
        assert!(err.to_string().contains("invalid --feature-gates"));
        assert_eq!(
            err.downcast_ref::<GateError>(),
            Some(&GateError::Unregistered("no.such.gate".into()))
        );
    }

    #[test]
    fn unknown_feature_gate_leaves_registry_untouched() {
        let registry = Registry::new();
        registry
            .register(Gate::new("known.gate", false, "test gate"))
            .unwrap();
        assert!(apply_feature_gates(&registry, Some("+known.gate,+other.gate")).is_err());
        assert!(!registry.is_enabled("known.gate"));
    }

    #[test]
    fn gate_override_changes_label_sanitization() {
        let registry = Registry::new();
        registry
            .register(Gate::new(PERMISSIVE_LABEL_SANITIZATION, false, "test gate"))
            .unwrap();
        let provider = YamlStrProvider::new("namespace: otel\n");

        let config = load_checked(&provider, &registry).unwrap();
        assert!(config.sanitize_label());

        apply_feature_gates(&registry, Some(&format!("+{PERMISSIVE_LABEL_SANITIZATION}"))).unwrap();
        let config = load_checked(&provider, &registry).unwrap();
        assert!(!config.sanitize_label());
        assert_eq!(config.namespace, "otel");
    }

    #[test]
    fn no_feature_gates_is_a_no_op() {
        let registry = Registry::new();
        apply_feature_gates(&registry, None).unwrap();
        assert!(registry.list().is_empty());
    }
}
