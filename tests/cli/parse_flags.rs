use clap::{CommandFactory, Parser};
use user_store::tooling::cli::{normalize_flag_prefix, Cli};
use user_store::DuplicatePolicy;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(normalize_flag_prefix(args.iter().copied()))
}

#[test]
fn parse_valid_flag_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["user-store", "-operation", "list", "-fileName", "users.json"],
        vec!["user-store", "--operation", "list", "--fileName", "users.json"],
        vec!["user-store", "-operation=findById", "-id=1", "-fileName=users.json"],
        vec![
            "user-store",
            "-operation",
            "add",
            "-item",
            r#"{"id":"1","email":"a@b.com","age":30}"#,
            "-fileName",
            "users.json",
        ],
        vec!["user-store", "-operation", "remove", "-id", "-1", "-fileName", "u.json"],
        vec!["user-store", "--duplicates", "overwrite"],
        vec!["user-store"],
    ];

    for args in cases {
        let parsed = parse(&args);
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_maps_flags_into_arguments() {
    let cli = parse(&[
        "user-store",
        "-operation",
        "remove",
        "-id",
        "-1",
        "-fileName",
        "users.json",
    ])
    .unwrap();
    let args = cli.arguments();
    assert_eq!(args.operation, "remove");
    assert_eq!(args.id, "-1");
    assert_eq!(args.file_name, "users.json");
    assert_eq!(args.item, "");
}

#[test]
fn parse_keeps_explicit_empty_values() {
    let cli = parse(&["user-store", "-operation", "findById", "-id", ""]).unwrap();
    assert_eq!(cli.arguments().id, "");
}

#[test]
fn parse_accepts_file_names_starting_with_a_dash() {
    let cli = parse(&["user-store", "-operation", "list", "-fileName", "-x.json"]).unwrap();
    assert_eq!(cli.arguments().file_name, "-x.json");
}

#[test]
fn parse_rejects_unknown_flags() {
    assert!(parse(&["user-store", "-operation", "list", "-bogus", "x"]).is_err());
}

#[test]
fn parse_rejects_unknown_duplicate_policy() {
    assert!(parse(&["user-store", "--duplicates", "sometimes"]).is_err());
    let cli = parse(&["user-store", "-duplicates", "reject"]).unwrap();
    assert_eq!(cli.duplicates, Some(DuplicatePolicy::Reject));
}

#[test]
fn help_lists_every_operation_flag() {
    let mut command = Cli::command();
    let mut output = Vec::new();
    command.write_long_help(&mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    for flag in ["--operation", "--item", "--id", "--fileName"] {
        assert!(output.contains(flag), "help should mention {flag}");
    }
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
