//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// reactor-gate - Check optional runtime dependencies against a version policy.
#[derive(Debug, Parser)]
#[command(name = "reactor-gate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to policy file (overrides .reactor-gate/policy.yml)
    #[arg(long, global = true, env = "REACTOR_GATE_POLICY")]
    pub policy: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a dependency's version against the policy
    Check(CheckArgs),

    /// Inspect the effective policy
    Policy(PolicyArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Dependency name as it appears in the policy
    pub dependency: String,

    /// Reported version to check
    #[arg(long = "installed", conflicts_with = "command")]
    pub installed: Option<String>,

    /// Command whose output reports the version (e.g. "openssl version")
    #[arg(long)]
    pub command: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when the version is insufficient
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `policy` command.
#[derive(Debug, Clone, Args)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub action: PolicyAction,
}

/// Policy subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum PolicyAction {
    /// Show the effective minimum versions
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON Schema for policy files
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_installed_version() {
        let cli = Cli::parse_from(["reactor-gate", "check", "OpenSSL", "--installed", "0.13"]);
        let Commands::Check(args) = cli.command else {
            panic!("Expected Check command");
        };
        assert_eq!(args.dependency, "OpenSSL");
        assert_eq!(args.installed.as_deref(), Some("0.13"));
        assert!(!args.strict);
    }

    #[test]
    fn installed_conflicts_with_command() {
        let result = Cli::try_parse_from([
            "reactor-gate",
            "check",
            "OpenSSL",
            "--installed",
            "1.0",
            "--command",
            "openssl version",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "reactor-gate",
            "policy",
            "show",
            "--json",
            "--policy",
            "custom.yml",
            "--debug",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.policy, Some(PathBuf::from("custom.yml")));
        assert!(matches!(
            cli.command,
            Commands::Policy(PolicyArgs {
                action: PolicyAction::Show { json: true }
            })
        ));
    }

    #[test]
    fn parses_policy_schema() {
        let cli = Cli::parse_from(["reactor-gate", "policy", "schema"]);
        assert!(matches!(
            cli.command,
            Commands::Policy(PolicyArgs {
                action: PolicyAction::Schema
            })
        ));
    }
}
