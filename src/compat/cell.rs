//! Components that check their optional dependency on first use.

use std::sync::OnceLock;

use crate::compat::gate::{CheckResult, CompatibilityGate};
use crate::compat::probe::{DependencyStatus, VersionProbe};

/// What a component builder learns about its dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialization {
    /// Probe result for the dependency.
    pub status: DependencyStatus,
    /// Gate verdict; `None` when the dependency is absent.
    pub check: Option<CheckResult>,
}

/// A lazily built component wrapping an optional dependency.
///
/// The first call to [`get_or_materialize`](Self::get_or_materialize)
/// probes the dependency, runs the compatibility gate if it is present and
/// builds the component. Every later call returns the same component
/// without probing or checking again.
#[derive(Debug)]
pub struct GatedCell<T> {
    dependency: String,
    component: OnceLock<T>,
}

impl<T> GatedCell<T> {
    /// Create an unmaterialized cell for a component needing `dependency`.
    pub fn new(dependency: impl Into<String>) -> Self {
        Self {
            dependency: dependency.into(),
            component: OnceLock::new(),
        }
    }

    /// The dependency this component wraps.
    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    /// The component, if it has been materialized.
    pub fn get(&self) -> Option<&T> {
        self.component.get()
    }

    /// Get the component, building it on first access.
    pub fn get_or_materialize<F>(
        &self,
        gate: &CompatibilityGate,
        probe: &dyn VersionProbe,
        build: F,
    ) -> &T
    where
        F: FnOnce(&Materialization) -> T,
    {
        self.component.get_or_init(|| {
            let status = probe.probe(&self.dependency);
            let check = gate.check_status(&self.dependency, &status);
            build(&Materialization { status, check })
        })
    }
}
