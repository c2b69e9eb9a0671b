//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! effective policy once and routes CLI subcommands to their
//! implementations.

pub mod check;
pub mod dispatcher;
pub mod policy;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
