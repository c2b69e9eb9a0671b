//! Integration tests for reactor installation through the public API.

use std::sync::Arc;

use reactor_gate::reactor::{ProcessContext, ReactorSlot};
use reactor_gate::{Error, ReactorAlreadyInstalledError, ReactorNotInstalledError};

trait Reactor: Send + Sync {
    fn name(&self) -> &str;
}

struct NamedReactor(&'static str);

impl Reactor for NamedReactor {
    fn name(&self) -> &str {
        self.0
    }
}

#[test]
fn install_reactor_installs_when_none_present() {
    let ctx: ProcessContext<dyn Reactor> = ProcessContext::default();
    let reactor: Arc<dyn Reactor> = Arc::new(NamedReactor("poll"));

    ctx.install_reactor(Arc::clone(&reactor)).unwrap();

    assert!(Arc::ptr_eq(&reactor, &ctx.reactor().unwrap()));
}

#[test]
fn install_reactor_when_already_installed_fails() {
    let ctx: ProcessContext<dyn Reactor> = ProcessContext::default();
    ctx.install_reactor(Arc::new(NamedReactor("first"))).unwrap();

    let err = ctx
        .install_reactor(Arc::new(NamedReactor("second")))
        .unwrap_err();

    assert_eq!(err, ReactorAlreadyInstalledError);
    assert_eq!(ctx.reactor().unwrap().name(), "first");
}

#[test]
fn already_installed_propagates_through_crate_error() {
    fn bootstrap(ctx: &ProcessContext<dyn Reactor>) -> reactor_gate::Result<()> {
        ctx.install_reactor(Arc::new(NamedReactor("a")))?;
        ctx.install_reactor(Arc::new(NamedReactor("b")))?;
        Ok(())
    }

    let ctx: ProcessContext<dyn Reactor> = ProcessContext::default();
    let err = bootstrap(&ctx).unwrap_err();
    assert!(err.is_precondition_violation());
    assert_eq!(err.to_string(), "reactor already installed");
}

#[test]
fn lookup_before_install_fails() {
    let ctx: ProcessContext<dyn Reactor> = ProcessContext::default();
    assert_eq!(ctx.reactor().err(), Some(ReactorNotInstalledError));

    let err: Error = ctx.reactor().map(|_| ()).unwrap_err().into();
    assert!(!err.is_precondition_violation());
}

#[test]
fn separate_contexts_are_isolated() {
    let first: ProcessContext<dyn Reactor> = ProcessContext::default();
    let second: ProcessContext<dyn Reactor> = ProcessContext::default();

    first.install_reactor(Arc::new(NamedReactor("one"))).unwrap();

    assert!(first.slot().is_installed());
    assert!(!second.slot().is_installed());
    second.install_reactor(Arc::new(NamedReactor("two"))).unwrap();
}

#[test]
fn standalone_slot_preserves_identity() {
    let slot: ReactorSlot<NamedReactor> = ReactorSlot::default();
    let reactor = Arc::new(NamedReactor("kqueue"));
    slot.install(Arc::clone(&reactor)).unwrap();
    assert!(Arc::ptr_eq(&reactor, &slot.current().unwrap()));
}
