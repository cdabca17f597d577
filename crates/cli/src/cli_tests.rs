// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use clap::CommandFactory;
use yare::parameterized;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("trellis").chain(args.iter().copied())).unwrap()
}

fn parse_err(args: &[&str]) -> clap::Error {
    match Cli::try_parse_from(std::iter::once("trellis").chain(args.iter().copied())) {
        Ok(_) => panic!("expected parse failure for {args:?}"),
        Err(e) => e,
    }
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["task", "ready", "-P", "proj-1", "-C", "/tmp"]);
    assert_eq!(cli.project.as_deref(), Some("proj-1"));
    assert_eq!(cli.directory.as_deref(), Some("/tmp"));
    assert!(matches!(cli.command, Command::Task(TaskCommand::Ready { .. })));
}

#[test]
fn test_task_new_collects_prerequisites() {
    let cli = parse(&[
        "task", "new", "Ship it", "--after", "task-a,task-b", "--after", "task-c", "-p", "high",
        "--estimate", "2.5", "-o", "id",
    ]);
    let Command::Task(TaskCommand::New {
        title,
        after,
        priority,
        estimate,
        output,
        ..
    }) = cli.command
    else {
        panic!("expected task new");
    };
    assert_eq!(title, "Ship it");
    assert_eq!(after, vec!["task-a", "task-b", "task-c"]);
    assert_eq!(priority.as_deref(), Some("high"));
    assert_eq!(estimate, Some(2.5));
    assert_eq!(output.output, OutputFormat::Id);
}

#[parameterized(
    text = { "text", OutputFormat::Text },
    json = { "json", OutputFormat::Json },
    id = { "id", OutputFormat::Id },
    ids_alias = { "ids", OutputFormat::Id },
)]
fn test_output_format_values(value: &str, expected: OutputFormat) {
    let cli = parse(&["project", "list", "-o", value]);
    let Command::Project(ProjectCommand::List { output }) = cli.command else {
        panic!("expected project list");
    };
    assert_eq!(output.output, expected);
}

#[parameterized(
    tree = { &["dep", "tree", "task-a"], false },
    flat = { &["dep", "tree", "task-a", "--flat"], true },
)]
fn test_dep_tree_flat_flag(args: &[&str], expected: bool) {
    let Command::Dep(DepCommand::Tree { id, flat }) = parse(args).command else {
        panic!("expected dep tree");
    };
    assert_eq!(id, "task-a");
    assert_eq!(flat, expected);
}

#[test]
fn test_dep_add_defaults_to_blocks() {
    let cli = parse(&["dep", "add", "task-b", "task-a"]);
    let Command::Dep(DepCommand::Add {
        dependent,
        prerequisite,
        dependency_type,
    }) = cli.command
    else {
        panic!("expected dep add");
    };
    assert_eq!(dependent, "task-b");
    assert_eq!(prerequisite, "task-a");
    assert_eq!(dependency_type, "blocks");
}

#[test]
fn test_milestone_alias() {
    let cli = parse(&["ms", "list", "--open"]);
    assert!(matches!(
        cli.command,
        Command::Milestone(MilestoneCommand::List { open: true, .. })
    ));
}

#[parameterized(
    blank_title = { &["task", "new", "  "] },
    milestone_without_due = { &["milestone", "new", "Beta"] },
    open_and_completed = { &["milestone", "list", "--open", "--completed"] },
    dependent_and_independent = { &["task", "list", "--dependent", "--independent"] },
    description_without_name = { &["init", "-d", "orphan"] },
    unknown_output = { &["stats", "-o", "yaml"] },
)]
fn test_rejected_arguments(args: &[&str]) {
    parse_err(args);
}
