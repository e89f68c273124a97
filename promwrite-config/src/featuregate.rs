//! Process-wide feature gates.
//!
//! Gates are named boolean switches for optional behaviour. The exporter's
//! gates are registered into the [`global`] registry the first time it is
//! touched; components that only need to read a gate take a [`GateSource`]
//! so tests can hand them a plain map instead.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::GateError;

/// Leaves label keys starting with `_` alone instead of rewriting them to `key_`.
pub const PERMISSIVE_LABEL_SANITIZATION: &str =
    "exporter.prometheusremotewrite.PermissiveLabelSanitization";

/// A named switch and its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub id: String,
    pub enabled: bool,
    pub description: String,
}

impl Gate {
    pub fn new(id: impl Into<String>, enabled: bool, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled,
            description: description.into(),
        }
    }
}

/// Read-only view of gate state.
pub trait GateSource {
    /// Whether the gate is on. Unknown gates read as off.
    fn is_enabled(&self, id: &str) -> bool;
}

impl GateSource for BTreeMap<String, bool> {
    fn is_enabled(&self, id: &str) -> bool {
        self.get(id).copied().unwrap_or(false)
    }
}

/// Thread-safe set of registered gates.
#[derive(Debug, Default)]
pub struct Registry {
    gates: RwLock<BTreeMap<String, Gate>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gate. An id can only be registered once.
    pub fn register(&self, gate: Gate) -> Result<(), GateError> {
        if gate.id.is_empty() {
            return Err(GateError::EmptyId(gate.id));
        }
        let mut gates = self.gates.write();
        if gates.contains_key(&gate.id) {
            return Err(GateError::AlreadyRegistered(gate.id));
        }
        gates.insert(gate.id.clone(), gate);
        Ok(())
    }

    /// Register a gate during process initialization.
    ///
    /// # Panics
    /// If the id is already registered: two components disagree on a gate.
    pub fn must_register(&self, gate: Gate) {
        if let Err(err) = self.register(gate) {
            panic!("feature gate registration failed: {err}");
        }
    }

    /// Change the state of a registered gate.
    pub fn set(&self, id: &str, enabled: bool) -> Result<(), GateError> {
        let mut gates = self.gates.write();
        let gate = gates
            .get_mut(id)
            .ok_or_else(|| GateError::Unregistered(id.to_string()))?;
        if gate.enabled != enabled {
            tracing::info!(gate = id, enabled, "feature gate overridden");
        }
        gate.enabled = enabled;
        Ok(())
    }

    /// Apply a batch of overrides. Nothing changes if any id is unknown.
    pub fn apply(&self, settings: &BTreeMap<String, bool>) -> Result<(), GateError> {
        {
            let gates = self.gates.read();
            if let Some(id) = settings.keys().find(|id| !gates.contains_key(*id)) {
                return Err(GateError::Unregistered(id.clone()));
            }
        }
        for (id, enabled) in settings {
            self.set(id, *enabled)?;
        }
        Ok(())
    }

    /// Apply overrides written as `+id,-id,id`.
    ///
    /// A leading `+` or no prefix enables the gate, `-` disables it.
    pub fn apply_flags(&self, flags: &str) -> Result<(), GateError> {
        self.apply(&parse_flags(flags)?)
    }

    /// All registered gates ordered by id.
    pub fn list(&self) -> Vec<Gate> {
        self.gates.read().values().cloned().collect()
    }
}

impl GateSource for Registry {
    fn is_enabled(&self, id: &str) -> bool {
        self.gates.read().get(id).is_some_and(|gate| gate.enabled)
    }
}

fn parse_flags(flags: &str) -> Result<BTreeMap<String, bool>, GateError> {
    let mut settings = BTreeMap::new();
    for entry in flags.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (id, enabled) = if let Some(id) = entry.strip_prefix('-') {
            (id, false)
        } else {
            (entry.strip_prefix('+').unwrap_or(entry), true)
        };
        if id.is_empty() {
            return Err(GateError::EmptyId(entry.to_string()));
        }
        settings.insert(id.to_string(), enabled);
    }
    Ok(settings)
}

fn register_exporter_gates(registry: &Registry) {
    registry.must_register(Gate::new(
        PERMISSIVE_LABEL_SANITIZATION,
        false,
        "Controls whether to change labels starting with '_' to 'key_'",
    ));
}

static GLOBAL: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_exporter_gates(&registry);
    registry
});

/// The process-wide registry, with the exporter's gates registered.
pub fn global() -> &'static Registry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn registry_with(ids: &[&str]) -> Registry {
        let registry = Registry::new();
        for id in ids {
            registry.register(Gate::new(*id, false, "test gate")).unwrap();
        }
        registry
    }

    #[test]
    fn global_registers_permissive_gate_disabled() {
        let gates = global().list();
        let gate = gates
            .iter()
            .find(|g| g.id == PERMISSIVE_LABEL_SANITIZATION)
            .expect("gate registered at first use");
        assert!(!gate.enabled);
        assert_eq!(
            gate.description,
            "Controls whether to change labels starting with '_' to 'key_'"
        );
    }

    #[test]
    fn second_registration_fails_without_overwrite() {
        let registry = Registry::new();
        registry.register(Gate::new("a.b", false, "first")).unwrap();
        let err = registry.register(Gate::new("a.b", true, "second")).unwrap_err();
        assert_eq!(err, GateError::AlreadyRegistered("a.b".into()));

        let gates = registry.list();
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].description, "first");
        assert!(!registry.is_enabled("a.b"));
    }

    #[test]
    fn global_rejects_reregistering_exporter_gate() {
        let err = global()
            .register(Gate::new(PERMISSIVE_LABEL_SANITIZATION, true, "dup"))
            .unwrap_err();
        assert!(matches!(err, GateError::AlreadyRegistered(_)));
    }

    #[test]
    #[should_panic(expected = "feature gate registration failed")]
    fn must_register_panics_on_duplicate() {
        let registry = registry_with(&["dup"]);
        registry.must_register(Gate::new("dup", false, "again"));
    }

    #[test]
    fn unknown_gate_reads_disabled() {
        assert!(!Registry::new().is_enabled("missing"));
    }

    #[test]
    fn apply_flags_enables_and_disables() {
        let registry = registry_with(&["alpha", "beta", "gamma"]);
        registry.set("beta", true).unwrap();

        registry.apply_flags("+alpha, -beta,gamma,").unwrap();
        assert!(registry.is_enabled("alpha"));
        assert!(!registry.is_enabled("beta"));
        assert!(registry.is_enabled("gamma"));
    }

    #[traced_test]
    #[test]
    fn override_is_logged() {
        let registry = registry_with(&["alpha"]);
        registry.set("alpha", true).unwrap();
        assert!(logs_contain("feature gate overridden"));
        assert!(logs_contain("alpha"));
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let registry = registry_with(&["alpha"]);
        let err = registry.apply_flags("+alpha,+unknown").unwrap_err();
        assert_eq!(err, GateError::Unregistered("unknown".into()));
        assert!(!registry.is_enabled("alpha"));
    }

    #[test]
    fn bare_sign_is_rejected() {
        let registry = registry_with(&["alpha"]);
        assert!(matches!(
            registry.apply_flags("-"),
            Err(GateError::EmptyId(_))
        ));
    }

    #[test]
    fn map_source_defaults_to_disabled() {
        let mut source = BTreeMap::new();
        source.insert("on".to_string(), true);
        assert!(source.is_enabled("on"));
        assert!(!source.is_enabled("off"));
    }
}
