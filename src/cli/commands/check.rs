//! Check command implementation.
//!
//! The `reactor-gate check` command runs the compatibility gate once for a
//! single dependency. The version comes from `--installed` or from the
//! output of `--command`; with neither, the dependency is treated as absent.

use std::io::Write;
use std::sync::Arc;

use serde_json::json;

use crate::cli::args::CheckArgs;
use crate::compat::{
    CheckResult, CommandProbe, CompatibilityGate, CompatibilityPolicy, StaticProbe, VersionProbe,
};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    policy: CompatibilityPolicy,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(policy: CompatibilityPolicy, args: CheckArgs) -> Self {
        Self { policy, args }
    }

    fn probe(&self) -> Arc<dyn VersionProbe> {
        match (&self.args.installed, &self.args.command) {
            (Some(version), _) => Arc::new(
                StaticProbe::new().with_version(self.args.dependency.clone(), version.clone()),
            ),
            (None, Some(command)) => Arc::new(CommandProbe::from_string(command)),
            (None, None) => Arc::new(StaticProbe::new()),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let dependency = self.args.dependency.as_str();
        let gate = CompatibilityGate::with_tracing(self.policy.clone());
        let probe = self.probe();

        let status = probe.probe(dependency);
        let result = gate.check_status(dependency, &status);

        if self.args.json {
            let report = json!({
                "dependency": dependency,
                "installed": status.version(),
                "minimum": self.policy.minimum_str(dependency),
                "check": result,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?)?;
        } else {
            match &result {
                None => writeln!(out, "{} not found", dependency)?,
                Some(CheckResult::Sufficient) => writeln!(
                    out,
                    "OK {} {}",
                    dependency,
                    status.version().unwrap_or_default()
                )?,
                Some(CheckResult::Insufficient(diagnostic)) => writeln!(out, "{}", diagnostic)?,
            }
        }

        let insufficient = matches!(result, Some(CheckResult::Insufficient(_)));
        if insufficient && self.args.strict {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
