// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod dep;
pub mod graph;
pub mod init;
pub mod milestone;
pub mod project;
pub mod stats;
pub mod task;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use trellis_core::Database;

use crate::config::{find_work_dir, get_db_path, Config};
use crate::env;
use crate::error::{Error, Result};

/// Helper to open the database from the current context.
pub fn open_db() -> Result<(Database, Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    let db = Database::open(&db_path)?;
    tracing::debug!(path = %db_path.display(), "opened workspace database");
    Ok((db, config, work_dir))
}

/// Picks the project to operate on: the `--project` flag, then
/// `TRELLIS_PROJECT`, then the workspace default.
pub(crate) fn resolve_project(explicit: Option<&str>, config: &Config) -> Result<String> {
    select_project(explicit, env::project(), config)
}

pub(crate) fn select_project(
    explicit: Option<&str>,
    from_env: Option<String>,
    config: &Config,
) -> Result<String> {
    explicit
        .map(str::to_string)
        .or(from_env)
        .or_else(|| config.default_project.clone())
        .ok_or(Error::NoProject)
}

/// Parses a `YYYY-MM-DD` date argument.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

pub(crate) fn parse_date_opt(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value.map(parse_date).transpose()
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
