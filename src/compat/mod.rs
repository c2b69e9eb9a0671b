//! Optional-dependency compatibility checking.
//!
//! When a component that wraps an optional library is first materialized,
//! the library's reported version is compared with a configured minimum.
//! An outdated library produces one non-fatal warning and execution
//! continues; a missing library produces none.
//!
//! # Modules
//!
//! - [`version`] - Tolerant version parsing and banner extraction
//! - [`policy`] - Minimum versions and policy file loading
//! - [`gate`] - The check itself and the once-per-dependency gate
//! - [`probe`] - Capability probes reporting presence and version
//! - [`sink`] - Warning channels for diagnostics
//! - [`cell`] - Components gated on first use
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reactor_gate::compat::{CompatibilityGate, CompatibilityPolicy, RecordingSink};
//!
//! let sink = Arc::new(RecordingSink::new());
//! let policy = CompatibilityPolicy::empty().with_minimum("OpenSSL", "0.15");
//! let gate = CompatibilityGate::new(policy, sink.clone());
//!
//! assert!(!gate.check("OpenSSL", "0.13").is_sufficient());
//! assert!(sink.messages()[0].contains("Insufficient version of OpenSSL"));
//! ```

pub mod cell;
pub mod gate;
pub mod policy;
pub mod probe;
pub mod sink;
pub mod version;

pub use cell::{GatedCell, Materialization};
pub use gate::{check_version, CheckResult, CompatibilityGate, Diagnostic, GateState};
pub use policy::{
    load_policy, load_policy_file, parse_policy, policy_schema, validate_policy,
    CompatibilityPolicy, PolicyFile, POLICY_ENV_VAR, TLS_DEPENDENCY, TLS_MINIMUM,
};
pub use probe::{CommandProbe, DependencyStatus, StaticProbe, VersionProbe};
pub use sink::{DiagnosticSink, RecordingSink, TracingSink};
pub use version::{extract_version, VersionSpec};
