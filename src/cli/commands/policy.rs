//! Policy command implementation.
//!
//! The `reactor-gate policy` command shows the effective minimum versions
//! or prints the policy file schema.

use std::io::Write;

use crate::cli::args::PolicyAction;
use crate::compat::{policy_schema, CompatibilityPolicy};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The policy command implementation.
pub struct PolicyCommand {
    policy: CompatibilityPolicy,
    action: PolicyAction,
}

impl PolicyCommand {
    /// Create a new policy command.
    pub fn new(policy: CompatibilityPolicy, action: PolicyAction) -> Self {
        Self { policy, action }
    }
}

impl Command for PolicyCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match &self.action {
            PolicyAction::Show { json: true } => {
                let rendered =
                    serde_json::to_string_pretty(&self.policy).map_err(anyhow::Error::from)?;
                writeln!(out, "{}", rendered)?;
            }
            PolicyAction::Show { json: false } => {
                if self.policy.is_empty() {
                    writeln!(out, "No minimum versions configured")?;
                }
                let width = self.policy.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
                for (name, minimum) in self.policy.iter() {
                    writeln!(out, "{:<width$}  >= {}", name, minimum, width = width)?;
                }
            }
            PolicyAction::Schema => {
                let rendered =
                    serde_json::to_string_pretty(&policy_schema()).map_err(anyhow::Error::from)?;
                writeln!(out, "{}", rendered)?;
            }
        }
        Ok(CommandResult::success())
    }
}
