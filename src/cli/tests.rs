// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::env::EnvArgs;
use crate::cli::metadata::MetadataSubcommand;
use crate::cli::rc::RcSubcommand;
use crate::cli::{Cli, Command};
use clap::{CommandFactory, Parser};

fn environment(raw: &[&str]) -> (String, EnvArgs) {
    let cli = Cli::try_parse_from(raw).unwrap();
    let Some(Command::Environment(args)) = cli.command else {
        panic!("expected an environment command, got {:?}", cli.command);
    };
    EnvArgs::parse_external(&args).unwrap()
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
    EnvArgs::command().debug_assert();
}

#[test]
fn test_parse_environment_print() {
    let (name, args) = environment(&["envset", "development"]);
    assert_eq!(name, "development");
    assert_eq!(args.isolated, None);
    assert!(args.split_command().is_none());
}

#[test]
fn test_parse_environment_run() {
    let (name, args) = environment(&[
        "envset",
        "staging",
        "--isolated=false",
        "--expand",
        "-R",
        "DB_URL",
        "--required",
        "API_KEY",
        "-I",
        "PATH",
        "-N",
        "ENVIRONMENT",
        "--max-restarts",
        "5",
        "--",
        "node",
        "index.js",
        "--port=3000",
    ]);

    assert_eq!(name, "staging");
    assert_eq!(args.isolated, Some(false));
    assert_eq!(args.expand, Some(true));
    assert_eq!(args.required, vec!["DB_URL", "API_KEY"]);
    assert_eq!(args.inherit, vec!["PATH"]);
    assert_eq!(args.export_env_name.as_deref(), Some("ENVIRONMENT"));
    assert_eq!(args.max_restarts, Some(5));
    assert!(!args.forever);

    let (cmd, rest) = args.split_command().unwrap();
    assert_eq!(cmd, "node");
    assert_eq!(rest, ["index.js", "--port=3000"]);
}

#[test]
fn test_parse_environment_rejects_bad_bool() {
    let cli = Cli::try_parse_from(["envset", "development", "--isolated=maybe"]).unwrap();
    let Some(Command::Environment(raw)) = cli.command else {
        panic!("expected an environment command");
    };
    assert!(EnvArgs::parse_external(&raw).is_err());
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "envset",
        "-l",
        "4",
        "--rc",
        "ci.envsetrc",
        "--env-file",
        ".env.ini",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.rc, Some(PathBuf::from("ci.envsetrc")));
    assert_eq!(cli.env_file, Some(PathBuf::from(".env.ini")));
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_metadata() {
    let cli = Cli::try_parse_from([
        "envset",
        "metadata",
        "--values",
        "--overwrite=false",
        "--secret",
        "s3cret",
    ])
    .unwrap();
    let Some(Command::Metadata(args)) = cli.command else {
        panic!("expected metadata");
    };
    assert!(args.values);
    assert!(!args.overwrite);
    assert!(!args.globals);
    assert_eq!(args.secret.as_deref(), Some("s3cret"));
    assert!(args.subcommand.is_none());
}

#[test]
fn test_parse_metadata_defaults_overwrite() {
    let cli = Cli::try_parse_from(["envset", "metadata"]).unwrap();
    let Some(Command::Metadata(args)) = cli.command else {
        panic!("expected metadata");
    };
    assert!(args.overwrite);
}

#[test]
fn test_parse_metadata_compare() {
    let cli = Cli::try_parse_from([
        "envset",
        "metadata",
        "compare",
        "-s",
        "staging",
        "--json",
        "-I",
        "BUILD_ID",
        "ci/metadata.json",
    ])
    .unwrap();
    let Some(Command::Metadata(args)) = cli.command else {
        panic!("expected metadata");
    };
    let Some(MetadataSubcommand::Compare(compare)) = args.subcommand else {
        panic!("expected compare");
    };
    assert_eq!(compare.section, "staging");
    assert_eq!(compare.json, Some(true));
    assert_eq!(compare.print, None);
    assert_eq!(compare.ignore, vec!["BUILD_ID"]);
    assert_eq!(compare.files, vec![PathBuf::from("ci/metadata.json")]);
}

#[test]
fn test_compare_requires_section() {
    assert!(Cli::try_parse_from(["envset", "metadata", "compare", "a.json"]).is_err());
}

#[test]
fn test_parse_rc_alias() {
    let cli = Cli::try_parse_from(["envset", "rc", "get", "meta.file"]).unwrap();
    let Some(Command::Config(args)) = cli.command else {
        panic!("expected config");
    };
    assert!(matches!(
        args.subcommand,
        Some(RcSubcommand::Get { ref key }) if key == "meta.file"
    ));
}

#[test]
fn test_parse_template_and_version() {
    let cli = Cli::try_parse_from(["envset", "template", "--print", "--overwrite"]).unwrap();
    let Some(Command::Template(args)) = cli.command else {
        panic!("expected template");
    };
    assert!(args.print);
    assert!(args.overwrite);

    let cli = Cli::try_parse_from(["envset", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}
