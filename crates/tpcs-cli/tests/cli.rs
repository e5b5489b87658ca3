use std::path::PathBuf;

use clap::Parser;

use tpcs_cli::cli::{Cli, Command, LogFormatArg, ProviderKind, StageArgs};

fn stage_args(argv: &[&str]) -> StageArgs {
    let cli = Cli::try_parse_from(argv).expect("arguments parse");
    match cli.command {
        Command::Stage(args) => args,
        other => panic!("expected stage, got {other:?}"),
    }
}

#[test]
fn stage_accepts_note_files() {
    let args = stage_args(&["tpcs", "stage", "a.txt", "b.txt"]);
    assert_eq!(args.notes, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    assert!(args.notes_dir.is_none());
    assert_eq!(args.output, PathBuf::from("results.csv"));
    assert_eq!(args.status_file, PathBuf::from("project_status.md"));
    assert!(!args.no_markdown);
    assert!(!args.show_responses);
}

#[test]
fn stage_accepts_notes_dir() {
    let args = stage_args(&["tpcs", "stage", "--notes-dir", "notes", "-o", "out/run.csv"]);
    assert!(args.notes.is_empty());
    assert_eq!(args.notes_dir, Some(PathBuf::from("notes")));
    assert_eq!(args.output, PathBuf::from("out/run.csv"));
}

#[test]
fn stage_requires_notes_or_dir() {
    assert!(Cli::try_parse_from(["tpcs", "stage"]).is_err());
}

#[test]
fn notes_and_notes_dir_conflict() {
    assert!(Cli::try_parse_from(["tpcs", "stage", "a.txt", "--notes-dir", "notes"]).is_err());
}

#[test]
fn provider_flags_parse() {
    let args = stage_args(&[
        "tpcs",
        "stage",
        "a.txt",
        "--provider",
        "azure",
        "--temperature",
        "0.7",
        "--timeout-secs",
        "30",
        "--azure-deployment",
        "gpt-4o",
        "--show-responses",
        "--no-markdown",
    ]);
    assert_eq!(args.provider.provider, ProviderKind::Azure);
    assert!((args.provider.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(args.provider.timeout_secs, 30);
    assert_eq!(args.provider.azure_deployment, "gpt-4o");
    assert!(args.show_responses);
    assert!(args.no_markdown);
}

#[test]
fn unknown_provider_is_rejected() {
    assert!(Cli::try_parse_from(["tpcs", "stage", "a.txt", "--provider", "openai"]).is_err());
}

#[test]
fn global_flags_follow_the_subcommand() {
    let cli = Cli::try_parse_from([
        "tpcs",
        "categories",
        "--log-format",
        "json",
        "--staging-data",
        "tables/custom.json",
        "--log-file",
        "tpcs.log",
    ])
    .expect("arguments parse");
    assert!(matches!(cli.command, Command::Categories));
    assert_eq!(cli.log_format, LogFormatArg::Json);
    assert_eq!(cli.staging_data, PathBuf::from("tables/custom.json"));
    assert_eq!(cli.log_file, Some(PathBuf::from("tpcs.log")));
}

#[test]
fn synonyms_takes_no_arguments() {
    let cli = Cli::try_parse_from(["tpcs", "synonyms"]).expect("arguments parse");
    assert!(matches!(cli.command, Command::Synonyms));
    assert!(Cli::try_parse_from(["tpcs", "synonyms", "extra"]).is_err());
}
