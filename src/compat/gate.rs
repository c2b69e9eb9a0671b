//! The dependency compatibility gate.
//!
//! [`check_version`] is the pure comparison. [`CompatibilityGate`] wraps it
//! with the per-dependency "checked once" state machine and sends
//! diagnostics to a [`DiagnosticSink`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::compat::policy::CompatibilityPolicy;
use crate::compat::probe::{DependencyStatus, VersionProbe};
use crate::compat::sink::{DiagnosticSink, TracingSink};
use crate::compat::version::VersionSpec;

/// Warning raised when a present dependency is older than its minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Dependency name as configured in the policy.
    pub dependency: String,
    /// Version string the dependency reported.
    pub installed: String,
    /// Minimum version string from the policy.
    pub minimum: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Insufficient version of {} installed ({}); {} or later is required. \
             Continuing with the installed version.",
            self.dependency, self.installed, self.minimum
        )
    }
}

/// Outcome of comparing one reported version with the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CheckResult {
    /// Version meets the minimum, or no minimum is configured.
    Sufficient,
    /// Version is below the minimum.
    Insufficient(Diagnostic),
}

impl CheckResult {
    /// Whether the dependency meets the policy.
    pub fn is_sufficient(&self) -> bool {
        matches!(self, CheckResult::Sufficient)
    }

    /// The diagnostic, if the version was insufficient.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            CheckResult::Sufficient => None,
            CheckResult::Insufficient(diagnostic) => Some(diagnostic),
        }
    }
}

/// Compare `raw_version` of `dependency` against the policy minimum.
///
/// Only `(major, minor)` take part; the bound is inclusive. A dependency the
/// policy does not mention is always sufficient.
pub fn check_version(
    dependency: &str,
    raw_version: &str,
    policy: &CompatibilityPolicy,
) -> CheckResult {
    let Some(minimum) = policy.minimum_str(dependency) else {
        return CheckResult::Sufficient;
    };

    if VersionSpec::parse(raw_version).is_at_least(&VersionSpec::parse(minimum)) {
        CheckResult::Sufficient
    } else {
        CheckResult::Insufficient(Diagnostic {
            dependency: dependency.to_string(),
            installed: raw_version.to_string(),
            minimum: minimum.to_string(),
        })
    }
}

/// Per-dependency position in the check lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// No check has run yet.
    NotYetChecked,
    /// Checked and found sufficient. Terminal.
    Sufficient,
    /// Checked and found insufficient. Terminal.
    Insufficient(Diagnostic),
}

/// Runs each dependency's compatibility check at most once.
pub struct CompatibilityGate {
    policy: CompatibilityPolicy,
    sink: Arc<dyn DiagnosticSink>,
    outcomes: Mutex<HashMap<String, CheckResult>>,
}

impl CompatibilityGate {
    /// Create a gate that reports through `sink`.
    pub fn new(policy: CompatibilityPolicy, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            policy,
            sink,
            outcomes: Mutex::new(HashMap::new()),
        }
    }

    /// Create a gate that reports through `tracing`.
    pub fn with_tracing(policy: CompatibilityPolicy) -> Self {
        Self::new(policy, Arc::new(TracingSink))
    }

    /// The policy this gate enforces.
    pub fn policy(&self) -> &CompatibilityPolicy {
        &self.policy
    }

    /// Check `dependency` at `raw_version`, once.
    ///
    /// The first call decides and, if insufficient, emits one diagnostic.
    /// Later calls for the same dependency return the recorded result
    /// without re-evaluating or re-emitting, whatever version they pass.
    pub fn check(&self, dependency: &str, raw_version: &str) -> CheckResult {
        let mut outcomes = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(recorded) = outcomes.get(dependency) {
            return recorded.clone();
        }

        let result = check_version(dependency, raw_version, &self.policy);
        match &result {
            CheckResult::Sufficient => {
                tracing::debug!("{} {} meets policy", dependency, raw_version);
            }
            CheckResult::Insufficient(diagnostic) => self.sink.emit(diagnostic),
        }
        outcomes.insert(dependency.to_string(), result.clone());
        result
    }

    /// Probe for `dependency` and check it if present.
    ///
    /// Returns `None` when the dependency is absent. Absence is not an
    /// insufficient version: nothing is emitted and nothing is recorded.
    pub fn check_probe(&self, dependency: &str, probe: &dyn VersionProbe) -> Option<CheckResult> {
        self.check_status(dependency, &probe.probe(dependency))
    }

    /// Check `dependency` given an already probed status.
    ///
    /// Same semantics as [`check_probe`](Self::check_probe).
    pub fn check_status(&self, dependency: &str, status: &DependencyStatus) -> Option<CheckResult> {
        match status {
            DependencyStatus::Present { version } => Some(self.check(dependency, version)),
            DependencyStatus::Absent => {
                tracing::debug!("{} not found, skipping version check", dependency);
                None
            }
        }
    }

    /// Where `dependency` is in the check lifecycle.
    pub fn state(&self, dependency: &str) -> GateState {
        let outcomes = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match outcomes.get(dependency) {
            None => GateState::NotYetChecked,
            Some(CheckResult::Sufficient) => GateState::Sufficient,
            Some(CheckResult::Insufficient(diagnostic)) => {
                GateState::Insufficient(diagnostic.clone())
            }
        }
    }

    /// Forget all recorded outcomes.
    #[cfg(any(test, feature = "test-support"))]
    pub fn reset(&self) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl fmt::Debug for CompatibilityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompatibilityGate")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
