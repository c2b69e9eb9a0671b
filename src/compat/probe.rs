//! Capability probes for optional dependencies.
//!
//! A probe answers "is this dependency present, and what version does it
//! report?". Absence is reported separately from any version so that a
//! missing dependency never looks like an outdated one.
//!
//! # Example
//!
//! ```
//! use reactor_gate::compat::{DependencyStatus, StaticProbe, VersionProbe};
//!
//! let probe = StaticProbe::new().with_version("OpenSSL", "16.0.0");
//! assert_eq!(
//!     probe.probe("OpenSSL"),
//!     DependencyStatus::Present { version: "16.0.0".to_string() }
//! );
//! assert_eq!(probe.probe("zlib"), DependencyStatus::Absent);
//! ```

use std::collections::HashMap;
use std::process::Command;

use anyhow::{bail, Context};

use crate::compat::version::extract_version;

/// Whether an optional dependency could be located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    /// Dependency cannot be located at all.
    Absent,
    /// Dependency is present and reports `version`.
    Present { version: String },
}

impl DependencyStatus {
    /// Shorthand for a present dependency.
    pub fn present(version: impl Into<String>) -> Self {
        DependencyStatus::Present {
            version: version.into(),
        }
    }

    /// The reported version, if present.
    pub fn version(&self) -> Option<&str> {
        match self {
            DependencyStatus::Absent => None,
            DependencyStatus::Present { version } => Some(version),
        }
    }
}

/// Locates an optional dependency and reads its reported version.
pub trait VersionProbe: Send + Sync {
    /// Look up `dependency`.
    fn probe(&self, dependency: &str) -> DependencyStatus;
}

impl<F> VersionProbe for F
where
    F: Fn(&str) -> DependencyStatus + Send + Sync,
{
    fn probe(&self, dependency: &str) -> DependencyStatus {
        self(dependency)
    }
}

/// Reports versions from a fixed table; anything else is absent.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    versions: HashMap<String, String>,
}

impl StaticProbe {
    /// Create a probe that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `version` for `dependency`.
    pub fn with_version(mut self, dependency: impl Into<String>, version: impl Into<String>) -> Self {
        self.versions.insert(dependency.into(), version.into());
        self
    }
}

impl VersionProbe for StaticProbe {
    fn probe(&self, dependency: &str) -> DependencyStatus {
        self.versions
            .get(dependency)
            .map_or(DependencyStatus::Absent, DependencyStatus::present)
    }
}

/// Reads a dependency's version from a command's output banner.
///
/// A command that cannot be spawned or exits unsuccessfully means the
/// dependency is absent. The banner is searched on stdout, then stderr.
/// If neither holds a recognisable version, the dependency is still
/// present and its first non-empty output line is reported verbatim; that
/// text usually parses as `0.0` and so fails any configured minimum.
pub struct CommandProbe {
    command: String,
    args: Vec<String>,
}

impl CommandProbe {
    /// Create a probe running `command` with no arguments.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: Vec::new(),
        }
    }

    /// Create from a full command string, e.g. `"openssl version"`.
    pub fn from_string(cmd: &str) -> Self {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        match parts.split_first() {
            Some((command, args)) => Self {
                command: command.to_string(),
                args: args.iter().map(|s| s.to_string()).collect(),
            },
            None => Self::new(cmd),
        }
    }

    /// Add arguments to the command.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn run(&self) -> anyhow::Result<(String, String)> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .output()
            .with_context(|| format!("failed to run '{}'", self.command))?;

        if !output.status.success() {
            bail!("'{}' exited with {}", self.command, output.status);
        }
        Ok((
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ))
    }
}

impl VersionProbe for CommandProbe {
    fn probe(&self, dependency: &str) -> DependencyStatus {
        match self.run() {
            Ok((stdout, stderr)) => {
                if let Some(version) = extract_version(&stdout).or_else(|| extract_version(&stderr)) {
                    return DependencyStatus::Present { version };
                }

                let raw = stdout
                    .lines()
                    .chain(stderr.lines())
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .unwrap_or_default()
                    .to_string();
                tracing::debug!(
                    "No version in '{}' output for {}, reporting raw text {:?}",
                    self.command,
                    dependency,
                    raw
                );
                DependencyStatus::Present { version: raw }
            }
            Err(e) => {
                tracing::debug!("Probe for {} found nothing: {:#}", dependency, e);
                DependencyStatus::Absent
            }
        }
    }
}
