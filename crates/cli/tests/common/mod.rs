// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Far enough ahead that due dates never fall in the past.
pub const FUTURE: &str = "2099-01-01";

/// The binary with the environment it reads cleared.
pub fn trellis() -> Command {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.env_remove("TRELLIS_DB")
        .env_remove("TRELLIS_PROJECT")
        .env_remove("TRELLIS_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Helper to create an initialized temp directory with a default project
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    trellis()
        .args(["init", "--name", "Apollo"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Runs `trellis <args> -o id` and returns the single id it prints.
pub fn create_id(temp: &TempDir, args: &[&str]) -> String {
    let output = trellis()
        .args(args)
        .args(["-o", "id"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Helper to create a task and return its ID
pub fn create_task(temp: &TempDir, title: &str) -> String {
    create_id(temp, &["task", "new", title])
}

/// Helper to create a milestone due in the far future and return its ID
pub fn create_milestone(temp: &TempDir, name: &str) -> String {
    create_id(temp, &["milestone", "new", name, "--due", FUTURE])
}

/// Runs `trellis <args> -o json` and parses stdout.
pub fn json(temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = trellis()
        .args(args)
        .args(["-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Lines printed by `trellis <args> -o id`.
pub fn ids(temp: &TempDir, args: &[&str]) -> Vec<String> {
    let output = trellis()
        .args(args)
        .args(["-o", "id"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
