//! Reactor installation lifecycle.
//!
//! The reactor is the runtime's single event-loop component. This module
//! only governs how it is installed and found, not how it runs.
//!
//! # Modules
//!
//! - [`slot`] - Single-occupancy storage with install-once semantics
//! - [`context`] - The process context owning the slot and the gate
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reactor_gate::reactor::ProcessContext;
//!
//! struct PollReactor;
//!
//! let ctx: ProcessContext<PollReactor> = ProcessContext::default();
//! assert!(ctx.reactor().is_err());
//!
//! ctx.install_reactor(Arc::new(PollReactor)).unwrap();
//! assert!(ctx.install_reactor(Arc::new(PollReactor)).is_err());
//! assert!(ctx.reactor().is_ok());
//! ```

pub mod context;
pub mod slot;

pub use context::ProcessContext;
pub use slot::ReactorSlot;
