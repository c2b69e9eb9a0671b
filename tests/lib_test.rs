//! Library integration tests.

use reactor_gate::{Error, PreconditionViolation, ReactorAlreadyInstalledError};

#[test]
fn error_types_are_public() {
    let err = Error::InvalidPolicy {
        message: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> reactor_gate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn already_installed_is_catchable_as_precondition_violation() {
    fn broad_handler(violation: PreconditionViolation) -> &'static str {
        match violation {
            PreconditionViolation::ReactorAlreadyInstalled(_) => "already installed",
            PreconditionViolation::Other { .. } => "other",
        }
    }

    assert_eq!(
        broad_handler(ReactorAlreadyInstalledError.into()),
        "already installed"
    );
    assert!(Error::from(ReactorAlreadyInstalledError).is_precondition_violation());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use reactor_gate::cli::{Cli, Commands};

    let cli = Cli::parse_from(["reactor-gate", "check", "OpenSSL", "--json"]);
    if let Commands::Check(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}
