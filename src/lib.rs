//! reactor-gate - Reactor installation and optional-dependency gating.
//!
//! A runtime has exactly one reactor per process, installed once during
//! bootstrap. Some runtime components wrap optional libraries; the first
//! time such a component is built, the library's reported version is
//! checked against a minimum and a warning is emitted if it is too old.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compat`] - Version policy, probes and the compatibility gate
//! - [`error`] - Error types and result aliases
//! - [`reactor`] - Reactor slot and process context
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reactor_gate::compat::{GatedCell, RecordingSink, StaticProbe, TLS_DEPENDENCY};
//! use reactor_gate::compat::CompatibilityPolicy;
//! use reactor_gate::reactor::ProcessContext;
//!
//! struct EpollReactor;
//!
//! let sink = Arc::new(RecordingSink::new());
//! let probe = Arc::new(StaticProbe::new().with_version(TLS_DEPENDENCY, "0.13"));
//! let ctx: ProcessContext<EpollReactor> =
//!     ProcessContext::new(CompatibilityPolicy::default(), sink.clone(), probe);
//!
//! ctx.install_reactor(Arc::new(EpollReactor)).unwrap();
//!
//! let tls = GatedCell::new(TLS_DEPENDENCY);
//! ctx.materialize(&tls, |m| m.status.version().map(String::from));
//! ctx.materialize(&tls, |m| m.status.version().map(String::from));
//!
//! assert_eq!(sink.len(), 1);
//! ```

pub mod cli;
pub mod compat;
pub mod error;
pub mod reactor;

pub use error::{
    Error, PreconditionViolation, ReactorAlreadyInstalledError, ReactorNotInstalledError, Result,
};
