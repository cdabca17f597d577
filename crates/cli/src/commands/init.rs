// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use trellis_core::{Database, Project};

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(name: Option<String>, description: Option<String>, database: Option<String>) -> Result<()> {
    let target_path = std::env::current_dir()?;
    let config = Config {
        database,
        default_project: None,
    };
    let work_dir = init_work_dir(&target_path, &config)?;
    let db_path = get_db_path(&work_dir, &config);
    let project = finish_init(&work_dir, &db_path, config, name.as_deref(), description.as_deref())?;

    println!("Initialized trellis workspace at {}", work_dir.display());
    println!("Database: {}", db_path.display());
    if let Some(project) = project {
        println!("Project: {} ({})", project.id, project.name);
    }
    Ok(())
}

/// Creates the database and, when `name` is given, a first project that
/// becomes the workspace default.
pub(crate) fn finish_init(
    work_dir: &Path,
    db_path: &Path,
    mut config: Config,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Project>> {
    let mut db = Database::open(db_path)?;
    let Some(name) = name else {
        return Ok(None);
    };
    let project = db.create_project(name, description)?;
    config.default_project = Some(project.id.clone());
    config.save(work_dir)?;
    Ok(Some(project))
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
