// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use trellis_core::{
    Database, DependencyEdge, NewTask, Priority, SortField, SortOrder, Task, TaskFilter,
    TaskStatus, TaskUpdate,
};

use crate::cli::{OutputFormat, TaskCommand, TaskListArgs};
use crate::colors::should_colorize;
use crate::display::{format_task_details, format_task_line};
use crate::error::{Error, Result};

use super::{open_db, parse_date, parse_date_opt, print_json, resolve_project};

/// JSON representation of a task for the show command.
#[derive(Serialize)]
struct TaskDetailJson<'a> {
    #[serde(flatten)]
    task: &'a Task,
    blocked: bool,
    depends_on: &'a [DependencyEdge],
    required_by: &'a [DependencyEdge],
}

/// A task together with its direct edges.
pub(crate) struct TaskView {
    pub task: Task,
    pub prerequisites: Vec<DependencyEdge>,
    pub dependents: Vec<DependencyEdge>,
    pub blocked: bool,
}

pub fn run(project: Option<&str>, command: TaskCommand) -> Result<()> {
    let (mut db, config, _) = open_db()?;
    match command {
        TaskCommand::New {
            title,
            description,
            assignee,
            priority,
            estimate,
            due,
            after,
            output,
        } => {
            let project = resolve_project(project, &config)?;
            let new = NewTask {
                project_id: project,
                title,
                description,
                assignee,
                priority: parse_priority(priority.as_deref())?.unwrap_or_default(),
                estimated_hours: estimate,
                due_date: parse_date_opt(due.as_deref())?,
            };
            let task = db.create_task(&new, &after)?;
            match output.output {
                OutputFormat::Text => println!("Created {}: {}", task.id, task.title),
                OutputFormat::Id => println!("{}", task.id),
                OutputFormat::Json => print_json(&task)?,
            }
            Ok(())
        }
        TaskCommand::Show { id, output } => {
            let view = show_impl(&db, &id)?;
            match output.output {
                OutputFormat::Json => print_json(&TaskDetailJson {
                    task: &view.task,
                    blocked: view.blocked,
                    depends_on: &view.prerequisites,
                    required_by: &view.dependents,
                })?,
                OutputFormat::Id => println!("{}", view.task.id),
                OutputFormat::Text => println!(
                    "{}",
                    format_task_details(&view.task, &view.prerequisites, &view.dependents, view.blocked)
                ),
            }
            Ok(())
        }
        TaskCommand::List(args) => {
            let project = resolve_project(project, &config)?;
            let filter = build_filter(&args)?;
            print_tasks(&db.filter_tasks(&project, &filter)?, args.output.output)
        }
        TaskCommand::Sort {
            field,
            desc,
            limit,
            output,
        } => {
            let project = resolve_project(project, &config)?;
            let field: SortField = field.parse()?;
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            print_tasks(&db.sorted_tasks(&project, field, order, limit)?, output.output)
        }
        TaskCommand::Search {
            query,
            limit,
            output,
        } => {
            let project = resolve_project(project, &config)?;
            print_tasks(&db.search_tasks(&project, &query, limit)?, output.output)
        }
        TaskCommand::Ready { output } => {
            let project = resolve_project(project, &config)?;
            print_tasks(&db.ready_tasks(&project)?, output.output)
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            assignee,
            priority,
            estimate,
            actual,
            due,
        } => {
            let update = TaskUpdate {
                title,
                description,
                assignee,
                priority: parse_priority(priority.as_deref())?,
                estimated_hours: estimate,
                actual_hours: actual,
                due_date: parse_date_opt(due.as_deref())?,
            };
            let task = edit_impl(&mut db, &id, &update)?;
            println!("Updated {}", task.id);
            Ok(())
        }
        TaskCommand::Status { id, status } => {
            let status: TaskStatus = status.parse()?;
            transition(&mut db, &[id], status)
        }
        TaskCommand::Start { ids } => transition(&mut db, &ids, TaskStatus::InProgress),
        TaskCommand::Review { ids } => transition(&mut db, &ids, TaskStatus::Review),
        TaskCommand::Done { ids } => transition(&mut db, &ids, TaskStatus::Done),
        TaskCommand::Reopen { ids } => transition(&mut db, &ids, TaskStatus::ToDo),
        TaskCommand::Delete { id } => {
            db.delete_task(&id)?;
            println!("Deleted {}", id);
            Ok(())
        }
    }
}

fn parse_priority(value: Option<&str>) -> Result<Option<Priority>> {
    Ok(value.map(str::parse).transpose()?)
}

/// Builds the store filter from `task list` flags.
pub(crate) fn build_filter(args: &TaskListArgs) -> Result<TaskFilter> {
    let has_prerequisites = match (args.dependent, args.independent) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    Ok(TaskFilter {
        status: args.status.as_deref().map(str::parse).transpose()?,
        priority: parse_priority(args.priority.as_deref())?,
        assignee: args.assignee.clone(),
        due_from: args.due_from.as_deref().map(parse_date).transpose()?,
        due_to: args.due_to.as_deref().map(parse_date).transpose()?,
        has_prerequisites,
        overdue: args.overdue.then_some(true),
        limit: args.limit,
    })
}

pub(crate) fn show_impl(db: &Database, id: &str) -> Result<TaskView> {
    let task = db.get_task(id)?;
    Ok(TaskView {
        prerequisites: db.list_dependencies::<Task>(id)?,
        dependents: db.list_dependents::<Task>(id)?,
        blocked: db.is_task_blocked(id)?,
        task,
    })
}

pub(crate) fn edit_impl(db: &mut Database, id: &str, update: &TaskUpdate) -> Result<Task> {
    if update.is_empty() {
        return Err(Error::NothingToUpdate);
    }
    Ok(db.update_task(id, update)?)
}

/// Moves each task to `status`, reporting `from -> to` per task.
fn transition(db: &mut Database, ids: &[String], status: TaskStatus) -> Result<()> {
    for (from, task) in transition_impl(db, ids, status)? {
        if from == task.status {
            println!("{} is already {}", task.id, task.status);
        } else {
            println!("{}: {} -> {}", task.id, from, task.status);
        }
    }
    Ok(())
}

pub(crate) fn transition_impl(
    db: &mut Database,
    ids: &[String],
    status: TaskStatus,
) -> Result<Vec<(TaskStatus, Task)>> {
    // Resolve every id before changing anything.
    let before = ids
        .iter()
        .map(|id| -> Result<TaskStatus> { Ok(db.get_task(id)?.status) })
        .collect::<Result<Vec<_>>>()?;
    ids.iter()
        .zip(before)
        .map(|(id, from)| -> Result<(TaskStatus, Task)> {
            Ok((from, db.update_task_status(id, status)?))
        })
        .collect()
}

fn print_tasks(tasks: &[Task], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => print_json(tasks)?,
        OutputFormat::Id => {
            for task in tasks {
                println!("{}", task.id);
            }
        }
        OutputFormat::Text => {
            let color = should_colorize();
            for task in tasks {
                println!("{}", format_task_line(task, color));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
