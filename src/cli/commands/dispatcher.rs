//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::compat::load_policy;
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the command's report
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Loads the effective policy, then routes the CLI subcommand to the
    /// appropriate command implementation.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let policy = load_policy(&self.project_root, cli.policy.as_deref())?;

        match &cli.command {
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(policy, args.clone());
                cmd.execute(out)
            }
            Commands::Policy(args) => {
                let cmd = super::policy::PolicyCommand::new(policy, args.action.clone());
                cmd.execute(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn dispatch_uses_project_policy() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".reactor-gate");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yml"), "minimums:\n  zlib: \"1.2\"\n").unwrap();

        let cli = Cli::parse_from(["reactor-gate", "check", "zlib", "--installed", "1.1"]);
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let mut out = Vec::new();
        let result = dispatcher.dispatch(&cli, &mut out).unwrap();

        assert!(result.success);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Insufficient version of zlib"));
    }

    #[test]
    fn dispatch_reports_missing_explicit_policy() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yml");
        let cli = Cli::parse_from([
            "reactor-gate",
            "--policy",
            missing.to_str().unwrap(),
            "policy",
            "show",
        ]);
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let mut out = Vec::new();
        assert!(dispatcher.dispatch(&cli, &mut out).is_err());
    }
}
