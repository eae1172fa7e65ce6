use super::*;
use clap::{CommandFactory, Parser};

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_bare_invocation_has_no_command() {
    let cli = Cli::parse_from(["wp"]);
    assert!(cli.command.is_none());
}

#[test]
fn test_new_defaults_to_unnamed() {
    let cli = Cli::parse_from(["wp", "new"]);
    match cli.command {
        Some(Commands::New(args)) => assert_eq!(args.name, "unnamed"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_run_target_and_globals() {
    let cli = Cli::parse_from(["wp", "run", "up.3.add_tags", "-p", "/srv/blog", "-y"]);
    assert_eq!(cli.global.project_dir, "/srv/blog");
    assert!(cli.global.yes);
    match cli.command {
        Some(Commands::Run(args)) => assert_eq!(args.target, "up.3.add_tags"),
        other => panic!("unexpected command: {other:?}"),
    }
}
