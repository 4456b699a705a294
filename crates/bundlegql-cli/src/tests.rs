use std::path::Path;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bundlegql"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_process_with_catalog_file() {
    let cli = Cli::try_parse_from([
        "bundlegql",
        "process",
        "--input",
        "results.json",
        "--catalog",
        "catalog.json",
        "--pretty",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Process {
            input,
            catalog,
            output,
            pretty,
        }) => {
            assert_eq!(input, Path::new("results.json"));
            assert_eq!(catalog.as_deref(), Some(Path::new("catalog.json")));
            assert!(output.is_none());
            assert!(pretty);
        }
        other => panic!("expected process command, got {other:?}"),
    }
}

#[test]
fn parses_process_short_flags_and_stdin() {
    let cli = Cli::try_parse_from(["bundlegql", "process", "-i", "-", "-o", "out.json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Process {
            ref input,
            catalog: None,
            output: Some(ref output),
            pretty: false,
        }) if input == Path::new("-") && output == Path::new("out.json")
    ));
}

#[test]
fn process_requires_input() {
    assert!(Cli::try_parse_from(["bundlegql", "process"]).is_err());
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["bundlegql", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["bundlegql", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_seed_command() {
    let cli = Cli::try_parse_from(["bundlegql", "db", "seed", "--catalog", "catalog.json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { ref catalog }
        }) if catalog == Path::new("catalog.json")
    ));
}

#[test]
fn parses_enums_show_command() {
    let cli = Cli::try_parse_from(["bundlegql", "enums", "show"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Enums {
            command: EnumsCommands::Show
        })
    ));
}
