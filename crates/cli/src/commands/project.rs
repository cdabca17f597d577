// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use trellis_core::{Database, Project};

use crate::cli::{OutputFormat, ProjectCommand};
use crate::config::Config;
use crate::display::format_project_line;
use crate::error::Result;

use super::{open_db, print_json, resolve_project};

pub fn run(selected: Option<&str>, command: ProjectCommand) -> Result<()> {
    let (mut db, mut config, work_dir) = open_db()?;
    match command {
        ProjectCommand::Create {
            name,
            description,
            make_default,
            output,
        } => {
            let project = db.create_project(&name, description.as_deref())?;
            if make_default {
                set_default(&mut config, &work_dir, &project.id)?;
            }
            match output.output {
                OutputFormat::Text => println!("Created {}: {}", project.id, project.name),
                OutputFormat::Id => println!("{}", project.id),
                OutputFormat::Json => print_json(&project)?,
            }
            Ok(())
        }
        ProjectCommand::List { output } => {
            let projects = db.list_projects()?;
            match output.output {
                OutputFormat::Json => print_json(&projects)?,
                OutputFormat::Id => {
                    for p in &projects {
                        println!("{}", p.id);
                    }
                }
                OutputFormat::Text => {
                    let default = config.default_project.as_deref();
                    for p in &projects {
                        println!("{}", format_project_line(p, default == Some(p.id.as_str())));
                    }
                }
            }
            Ok(())
        }
        ProjectCommand::Show { id, output } => {
            let id = match id {
                Some(id) => id,
                None => resolve_project(selected, &config)?,
            };
            let project = db.get_project(&id)?;
            match output.output {
                OutputFormat::Json => print_json(&project)?,
                OutputFormat::Id => println!("{}", project.id),
                OutputFormat::Text => {
                    println!("[{}] {}", project.id, project.name);
                    if let Some(description) = &project.description {
                        println!("\n  {}", description);
                    }
                    println!("\nCreated: {}", project.created_at.format("%Y-%m-%d %H:%M"));
                }
            }
            Ok(())
        }
        ProjectCommand::Use { id } => {
            let project = use_impl(&db, &mut config, &work_dir, &id)?;
            println!("Using {}: {}", project.id, project.name);
            Ok(())
        }
        ProjectCommand::Delete { id } => {
            delete_impl(&mut db, &mut config, &work_dir, &id)?;
            println!("Deleted {}", id);
            Ok(())
        }
    }
}

fn set_default(config: &mut Config, work_dir: &Path, id: &str) -> Result<()> {
    config.default_project = Some(id.to_string());
    config.save(work_dir)
}

/// Makes `id` the workspace default after checking it exists.
pub(crate) fn use_impl(
    db: &Database,
    config: &mut Config,
    work_dir: &Path,
    id: &str,
) -> Result<Project> {
    let project = db.get_project(id)?;
    set_default(config, work_dir, &project.id)?;
    Ok(project)
}

/// Deletes the project, clearing the workspace default if it pointed there.
pub(crate) fn delete_impl(
    db: &mut Database,
    config: &mut Config,
    work_dir: &Path,
    id: &str,
) -> Result<()> {
    db.delete_project(id)?;
    if config.default_project.as_deref() == Some(id) {
        config.default_project = None;
        config.save(work_dir)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
