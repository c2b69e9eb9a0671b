//! Minimum supported versions for optional dependencies.
//!
//! A [`CompatibilityPolicy`] maps dependency names to the oldest version
//! the runtime supports. The built-in defaults can be overlaid by a YAML
//! policy file:
//!
//! ```yaml
//! minimums:
//!   OpenSSL: "0.15"
//! ```
//!
//! # Policy File Locations
//!
//! The first of these that is set wins:
//! 1. An explicit path (the `--policy` flag)
//! 2. The `REACTOR_GATE_POLICY` environment variable
//! 3. The project file `.reactor-gate/policy.yml`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::compat::version::{has_numeric_major, VersionSpec};
use crate::error::{Error, Result};

/// Environment variable naming a policy file.
pub const POLICY_ENV_VAR: &str = "REACTOR_GATE_POLICY";

/// Name of the TLS library wrapped by the default runtime components.
pub const TLS_DEPENDENCY: &str = "OpenSSL";

/// Oldest supported TLS library release.
pub const TLS_MINIMUM: &str = "0.15";

/// On-disk policy file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    /// Minimum supported version per dependency name (e.g. `OpenSSL: "0.15"`).
    #[serde(default)]
    pub minimums: BTreeMap<String, String>,
}

/// Read-only mapping from dependency name to minimum supported version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityPolicy {
    minimums: BTreeMap<String, String>,
}

impl CompatibilityPolicy {
    /// A policy with no requirements.
    pub fn empty() -> Self {
        Self {
            minimums: BTreeMap::new(),
        }
    }

    /// Add or replace the minimum for `dependency`.
    pub fn with_minimum(mut self, dependency: impl Into<String>, minimum: impl Into<String>) -> Self {
        self.minimums.insert(dependency.into(), minimum.into());
        self
    }

    /// The minimum version string configured for `dependency`.
    pub fn minimum_str(&self, dependency: &str) -> Option<&str> {
        self.minimums.get(dependency).map(String::as_str)
    }

    /// The parsed minimum for `dependency`.
    pub fn minimum(&self, dependency: &str) -> Option<VersionSpec> {
        self.minimum_str(dependency).map(VersionSpec::parse)
    }

    /// Iterate over `(dependency, minimum)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.minimums
            .iter()
            .map(|(name, min)| (name.as_str(), min.as_str()))
    }

    /// Number of dependencies with a minimum.
    pub fn len(&self) -> usize {
        self.minimums.len()
    }

    /// Whether the policy has no requirements.
    pub fn is_empty(&self) -> bool {
        self.minimums.is_empty()
    }

    /// Overlay `file` on this policy; entries in `file` win.
    pub fn merged_with(mut self, file: PolicyFile) -> Self {
        self.minimums.extend(file.minimums);
        self
    }
}

impl Default for CompatibilityPolicy {
    fn default() -> Self {
        Self::empty().with_minimum(TLS_DEPENDENCY, TLS_MINIMUM)
    }
}

/// Check a policy file for unusable entries.
///
/// # Errors
///
/// Returns `InvalidPolicy` for an empty dependency name or a minimum whose
/// major component is not numeric, since such a minimum would parse as
/// `0.0` and accept every version.
pub fn validate_policy(file: &PolicyFile) -> Result<()> {
    for (name, minimum) in &file.minimums {
        if name.trim().is_empty() {
            return Err(Error::InvalidPolicy {
                message: "dependency name must not be empty".to_string(),
            });
        }
        if !has_numeric_major(minimum) {
            return Err(Error::InvalidPolicy {
                message: format!(
                    "minimum '{}' for '{}' does not start with a numeric version",
                    minimum, name
                ),
            });
        }
    }
    Ok(())
}

/// Parse YAML content into a validated [`PolicyFile`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_policy(content: &str, source_path: &Path) -> Result<PolicyFile> {
    // An empty document is an empty policy.
    if content.trim().is_empty() {
        return Ok(PolicyFile::default());
    }

    let file: PolicyFile = serde_yaml::from_str(content).map_err(|e| Error::PolicyParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })?;
    validate_policy(&file)?;
    Ok(file)
}

/// Load a single policy file.
///
/// # Errors
///
/// Returns `PolicyNotFound` if the file doesn't exist.
/// Returns `PolicyParseError` if the YAML is invalid.
pub fn load_policy_file(path: &Path) -> Result<PolicyFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::PolicyNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    parse_policy(&content, path)
}

/// The project policy path: `.reactor-gate/policy.yml`.
pub fn project_policy_path(project_root: &Path) -> PathBuf {
    project_root.join(".reactor-gate").join("policy.yml")
}

/// Resolve which policy file applies, if any.
///
/// An explicit override always wins, then `env_override`, then the project
/// file if it exists.
pub fn discover_policy_path(
    project_root: &Path,
    explicit: Option<&Path>,
    env_override: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit.or(env_override) {
        return Some(path.to_path_buf());
    }

    let project = project_policy_path(project_root);
    if project.exists() {
        Some(project)
    } else {
        None
    }
}

/// Load the effective policy: built-in defaults overlaid by the discovered file.
///
/// An explicitly named file that does not exist is an error; a missing
/// project file just means the defaults apply.
pub fn load_policy(project_root: &Path, explicit: Option<&Path>) -> Result<CompatibilityPolicy> {
    let env_override = std::env::var_os(POLICY_ENV_VAR).map(PathBuf::from);
    let Some(path) = discover_policy_path(project_root, explicit, env_override.as_deref()) else {
        tracing::debug!("No policy file found, using built-in defaults");
        return Ok(CompatibilityPolicy::default());
    };

    tracing::debug!("Loading policy from {}", path.display());
    let file = load_policy_file(&path)?;
    Ok(CompatibilityPolicy::default().merged_with(file))
}

/// JSON Schema for the policy file format.
pub fn policy_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(PolicyFile);
    serde_json::to_value(&schema).unwrap_or_default()
}
