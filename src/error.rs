//! Error types for reactor-gate operations.
//!
//! This module defines [`Error`], the crate-wide error type, the
//! [`PreconditionViolation`] category, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Installation failures are returned to the bootstrap caller immediately
//! - A double install is a [`ReactorAlreadyInstalledError`], which is also a
//!   [`PreconditionViolation`] so broad precondition handlers keep working
//! - An insufficient dependency version is never an error; see
//!   [`crate::compat::Diagnostic`]

use std::path::PathBuf;
use thiserror::Error;

/// A reactor was already installed when another install was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("reactor already installed")]
pub struct ReactorAlreadyInstalledError;

/// The reactor was accessed before one was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no reactor installed")]
pub struct ReactorNotInstalledError;

/// An operation was invoked while the process was in an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionViolation {
    /// Second installation attempt on an occupied slot.
    #[error(transparent)]
    ReactorAlreadyInstalled(#[from] ReactorAlreadyInstalledError),

    /// Any other violated precondition.
    #[error("precondition violated: {message}")]
    Other { message: String },
}

/// Core error type for reactor-gate operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller violated an operation's precondition.
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),

    /// The reactor was requested before installation.
    #[error(transparent)]
    NotInstalled(#[from] ReactorNotInstalledError),

    /// Policy file not found at the expected location.
    #[error("Policy not found: {path}")]
    PolicyNotFound { path: PathBuf },

    /// Failed to parse a policy file.
    #[error("Failed to parse policy at {path}: {message}")]
    PolicyParseError { path: PathBuf, message: String },

    /// Policy contents are structurally valid but unusable.
    #[error("Invalid policy: {message}")]
    InvalidPolicy { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Whether this error belongs to the precondition-violation category.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }
}

impl From<ReactorAlreadyInstalledError> for Error {
    fn from(err: ReactorAlreadyInstalledError) -> Self {
        Error::Precondition(err.into())
    }
}

/// Result type alias for reactor-gate operations.
pub type Result<T> = std::result::Result<T, Error>;
