//! The explicitly owned process context.
//!
//! A [`ProcessContext`] bundles the reactor slot, the compatibility gate
//! and the probe used to locate optional dependencies. Bootstrap code
//! creates one and passes it where it is needed; tests create their own
//! instead of sharing process globals.

use std::sync::Arc;

use crate::compat::{
    CheckResult, CompatibilityGate, CompatibilityPolicy, DiagnosticSink, GatedCell,
    Materialization, StaticProbe, TracingSink, VersionProbe,
};
use crate::error::{ReactorAlreadyInstalledError, ReactorNotInstalledError};
use crate::reactor::slot::ReactorSlot;

/// Process-wide runtime state for one reactor type.
pub struct ProcessContext<R: ?Sized> {
    slot: ReactorSlot<R>,
    gate: CompatibilityGate,
    probe: Arc<dyn VersionProbe>,
}

impl<R: ?Sized> ProcessContext<R> {
    /// Create a context with an empty slot.
    pub fn new(
        policy: CompatibilityPolicy,
        sink: Arc<dyn DiagnosticSink>,
        probe: Arc<dyn VersionProbe>,
    ) -> Self {
        Self {
            slot: ReactorSlot::new(),
            gate: CompatibilityGate::new(policy, sink),
            probe,
        }
    }

    /// Create a context that warns through `tracing` and finds no
    /// optional dependencies until a probe is supplied.
    pub fn with_policy(policy: CompatibilityPolicy) -> Self {
        Self::new(policy, Arc::new(TracingSink), Arc::new(StaticProbe::new()))
    }

    /// Replace the dependency probe.
    pub fn with_probe(mut self, probe: Arc<dyn VersionProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Install the process reactor.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorAlreadyInstalledError`] if one is already installed;
    /// the existing reactor stays in place.
    pub fn install_reactor(&self, reactor: Arc<R>) -> Result<(), ReactorAlreadyInstalledError> {
        self.slot.install(reactor)
    }

    /// The installed reactor.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorNotInstalledError`] before installation.
    pub fn reactor(&self) -> Result<Arc<R>, ReactorNotInstalledError> {
        self.slot.current()
    }

    /// The reactor slot.
    pub fn slot(&self) -> &ReactorSlot<R> {
        &self.slot
    }

    /// The compatibility gate.
    pub fn gate(&self) -> &CompatibilityGate {
        &self.gate
    }

    /// Check `dependency` through this context's probe.
    ///
    /// `None` means the dependency is absent.
    pub fn check_dependency(&self, dependency: &str) -> Option<CheckResult> {
        self.gate.check_probe(dependency, self.probe.as_ref())
    }

    /// Get `cell`'s component, materializing it through this context's
    /// gate and probe on first access.
    pub fn materialize<'c, T, F>(&self, cell: &'c GatedCell<T>, build: F) -> &'c T
    where
        F: FnOnce(&Materialization) -> T,
    {
        cell.get_or_materialize(&self.gate, self.probe.as_ref(), build)
    }

    /// Return the context to its initial state: empty slot, nothing checked.
    #[cfg(any(test, feature = "test-support"))]
    pub fn reset(&self) {
        self.slot.reset();
        self.gate.reset();
    }
}

impl<R: ?Sized> Default for ProcessContext<R> {
    fn default() -> Self {
        Self::with_policy(CompatibilityPolicy::default())
    }
}

impl<R: ?Sized> std::fmt::Debug for ProcessContext<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessContext")
            .field("slot", &self.slot)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{GateState, RecordingSink, TLS_DEPENDENCY};
    use crate::error::Error;

    struct SelectReactor;

    fn context(version: Option<&str>) -> (ProcessContext<SelectReactor>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let probe = match version {
            Some(v) => StaticProbe::new().with_version(TLS_DEPENDENCY, v),
            None => StaticProbe::new(),
        };
        let ctx = ProcessContext::new(
            CompatibilityPolicy::default(),
            sink.clone(),
            Arc::new(probe),
        );
        (ctx, sink)
    }

    #[test]
    fn install_then_lookup_returns_installed_reactor() {
        let (ctx, _) = context(None);
        let reactor = Arc::new(SelectReactor);
        ctx.install_reactor(Arc::clone(&reactor)).unwrap();
        assert!(Arc::ptr_eq(&reactor, &ctx.reactor().unwrap()));
    }

    #[test]
    fn double_install_propagates_as_precondition_violation() {
        fn bootstrap(ctx: &ProcessContext<SelectReactor>) -> crate::Result<()> {
            ctx.install_reactor(Arc::new(SelectReactor))?;
            ctx.install_reactor(Arc::new(SelectReactor))?;
            Ok(())
        }

        let (ctx, _) = context(None);
        let err = bootstrap(&ctx).unwrap_err();
        assert!(err.is_precondition_violation());
    }

    #[test]
    fn lookup_before_install_propagates_not_installed() {
        fn lookup(ctx: &ProcessContext<SelectReactor>) -> crate::Result<Arc<SelectReactor>> {
            Ok(ctx.reactor()?)
        }

        let (ctx, _) = context(None);
        assert!(matches!(lookup(&ctx), Err(Error::NotInstalled(_))));
    }

    #[test]
    fn empty_install_reset_cycle() {
        let (ctx, _) = context(None);
        assert_eq!(ctx.reactor().err(), Some(ReactorNotInstalledError));
        ctx.install_reactor(Arc::new(SelectReactor)).unwrap();
        assert!(ctx.reactor().is_ok());
        ctx.reset();
        assert_eq!(ctx.reactor().err(), Some(ReactorNotInstalledError));
    }

    #[test]
    fn reset_clears_gate_state() {
        let (ctx, _) = context(Some("0.13"));
        ctx.check_dependency(TLS_DEPENDENCY);
        ctx.reset();
        assert_eq!(ctx.gate().state(TLS_DEPENDENCY), GateState::NotYetChecked);
    }

    #[test]
    fn check_dependency_uses_probe() {
        let (ctx, sink) = context(Some("0.13"));
        let result = ctx.check_dependency(TLS_DEPENDENCY).unwrap();
        assert!(!result.is_sufficient());
        ctx.check_dependency(TLS_DEPENDENCY);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn check_dependency_absent() {
        let (ctx, sink) = context(None);
        assert_eq!(ctx.check_dependency(TLS_DEPENDENCY), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn materialize_checks_once() {
        let (ctx, sink) = context(Some("0.13"));
        let cell = GatedCell::new(TLS_DEPENDENCY);

        let first = *ctx.materialize(&cell, |m| m.check.is_some());
        let second = *ctx.materialize(&cell, |_| false);

        assert!(first);
        assert!(second);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn with_probe_replaces_probe() {
        let ctx: ProcessContext<SelectReactor> = ProcessContext::default()
            .with_probe(Arc::new(StaticProbe::new().with_version(TLS_DEPENDENCY, "16.0.0")));
        assert_eq!(
            ctx.check_dependency(TLS_DEPENDENCY),
            Some(CheckResult::Sufficient)
        );
    }
}
