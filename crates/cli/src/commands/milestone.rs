// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use trellis_core::{ClockSource, Database, DependencyEdge, Milestone, MilestoneUpdate, NewMilestone};

use crate::cli::{MilestoneCommand, OutputFormat};
use crate::colors::should_colorize;
use crate::display::{format_milestone_details, format_milestone_line};
use crate::error::{Error, Result};

use super::{open_db, parse_date, parse_date_opt, print_json, resolve_project};

#[derive(Serialize)]
struct MilestoneDetailJson<'a> {
    #[serde(flatten)]
    milestone: &'a Milestone,
    overdue: bool,
    depends_on: &'a [DependencyEdge],
    required_by: &'a [DependencyEdge],
}

pub fn run(project: Option<&str>, command: MilestoneCommand) -> Result<()> {
    let (mut db, config, _) = open_db()?;
    let today = db.clock().today();
    match command {
        MilestoneCommand::New {
            name,
            due,
            description,
            after,
            output,
        } => {
            let project = resolve_project(project, &config)?;
            let new = NewMilestone {
                project_id: project,
                name,
                description,
                due_date: parse_date(&due)?,
            };
            let milestone = db.create_milestone(&new, &after)?;
            match output.output {
                OutputFormat::Text => {
                    println!("Created {}: {} (due {})", milestone.id, milestone.name, milestone.due_date)
                }
                OutputFormat::Id => println!("{}", milestone.id),
                OutputFormat::Json => print_json(&milestone)?,
            }
            Ok(())
        }
        MilestoneCommand::Show { id, output } => {
            let milestone = db.get_milestone(&id)?;
            let prerequisites = db.list_dependencies::<Milestone>(&id)?;
            let dependents = db.list_dependents::<Milestone>(&id)?;
            match output.output {
                OutputFormat::Json => print_json(&MilestoneDetailJson {
                    milestone: &milestone,
                    overdue: milestone.is_overdue(today),
                    depends_on: &prerequisites,
                    required_by: &dependents,
                })?,
                OutputFormat::Id => println!("{}", milestone.id),
                OutputFormat::Text => println!(
                    "{}",
                    format_milestone_details(&milestone, &prerequisites, &dependents, today)
                ),
            }
            Ok(())
        }
        MilestoneCommand::List {
            open,
            completed,
            output,
        } => {
            let project = resolve_project(project, &config)?;
            let filter = match (open, completed) {
                (true, _) => Some(false),
                (_, true) => Some(true),
                _ => None,
            };
            let milestones = db.list_milestones(&project, filter)?;
            match output.output {
                OutputFormat::Json => print_json(&milestones)?,
                OutputFormat::Id => {
                    for m in &milestones {
                        println!("{}", m.id);
                    }
                }
                OutputFormat::Text => {
                    let color = should_colorize();
                    for m in &milestones {
                        println!("{}", format_milestone_line(m, today, color));
                    }
                }
            }
            Ok(())
        }
        MilestoneCommand::Edit {
            id,
            name,
            description,
            due,
        } => {
            let update = MilestoneUpdate {
                name,
                description,
                due_date: parse_date_opt(due.as_deref())?,
            };
            let milestone = edit_impl(&mut db, &id, &update)?;
            println!("Updated {}", milestone.id);
            Ok(())
        }
        MilestoneCommand::Complete { ids } => set_completed(&mut db, &ids, true),
        MilestoneCommand::Reopen { ids } => set_completed(&mut db, &ids, false),
        MilestoneCommand::Delete { id } => {
            db.delete_milestone(&id)?;
            println!("Deleted {}", id);
            Ok(())
        }
    }
}

pub(crate) fn edit_impl(
    db: &mut Database,
    id: &str,
    update: &MilestoneUpdate,
) -> Result<Milestone> {
    if *update == MilestoneUpdate::default() {
        return Err(Error::NothingToUpdate);
    }
    Ok(db.update_milestone(id, update)?)
}

fn set_completed(db: &mut Database, ids: &[String], completed: bool) -> Result<()> {
    for milestone in set_completed_impl(db, ids, completed)? {
        let state = if milestone.is_completed { "completed" } else { "open" };
        println!("{}: {}", milestone.id, state);
    }
    Ok(())
}

pub(crate) fn set_completed_impl(
    db: &mut Database,
    ids: &[String],
    completed: bool,
) -> Result<Vec<Milestone>> {
    for id in ids {
        db.get_milestone(id)?;
    }
    ids.iter()
        .map(|id| -> Result<Milestone> { Ok(db.set_milestone_completed(id, completed)?) })
        .collect()
}

#[cfg(test)]
#[path = "milestone_tests.rs"]
mod tests;
