// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use tracing::info;

use crate::edge::DependencyType;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::kind::WorkItemKind;
use crate::lifecycle::{Lifecycle, Timestamps};
use crate::query::{like_pattern, SortField, SortOrder, TaskFilter};
use crate::task::{NewTask, Task, TaskStatus, TaskUpdate};
use crate::validate::{
    validate_assignee, validate_description, validate_due_date, validate_hours, validate_name,
};

use super::deps::insert_edge;
use super::projects::ensure_project;
use super::{
    format_date, format_timestamp, parse_date_opt, parse_db, parse_timestamp, parse_timestamp_opt,
    row_exists, Database,
};

const TASK_COLUMNS: &str = "t.id, t.project_id, t.title, t.description, t.assignee, t.status,
    t.priority, t.estimated_hours, t.actual_hours, t.due_date, t.started_at, t.completed_at,
    t.created_at, t.updated_at";

/// Active prerequisites that gate readiness.
const HAS_OPEN_GATE: &str = "EXISTS (
    SELECT 1 FROM task_dependencies d JOIN tasks p ON p.id = d.prerequisite_id
    WHERE d.dependent_id = t.id
      AND d.dependency_type IN ('Blocks', 'DependsOn')
      AND p.status != 'Done')";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status_str: String = row.get(5)?;
    let priority_str: String = row.get(6)?;
    let created_str: String = row.get(12)?;
    let updated_str: String = row.get(13)?;

    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        assignee: row.get(4)?,
        status: parse_db(&status_str, "status")?,
        priority: parse_db(&priority_str, "priority")?,
        estimated_hours: row.get(7)?,
        actual_hours: row.get(8)?,
        due_date: parse_date_opt(row.get(9)?, "due_date")?,
        started_at: parse_timestamp_opt(row.get(10)?, "started_at")?,
        completed_at: parse_timestamp_opt(row.get(11)?, "completed_at")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

pub(crate) fn load_task(conn: &Connection, id: &str) -> Result<Task> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.id = ?1");
    conn.query_row(&sql, params![id], task_from_row)
        .optional()?
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))
}

fn query_tasks(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(sql)?;
    let tasks = stmt
        .query_map(params, task_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tasks)
}

fn limit_clause(limit: Option<usize>) -> String {
    match limit {
        Some(n) => format!(" LIMIT {}", i64::try_from(n).unwrap_or(i64::MAX)),
        None => String::new(),
    }
}

impl Database {
    /// Create a task, optionally with initial `Blocks` prerequisites.
    ///
    /// Each prerequisite goes through the same checks as
    /// [`Database::add_dependency`], in the same transaction as the insert;
    /// any failure leaves no trace of the task.
    pub fn create_task(&mut self, new: &NewTask, prerequisites: &[String]) -> Result<Task> {
        let title = validate_name("Title", &new.title)?;
        if let Some(desc) = &new.description {
            validate_description(desc)?;
        }
        let assignee = new.assignee.as_deref().map(validate_assignee).transpose()?;
        let estimated_hours = new.estimated_hours.unwrap_or(0.0);
        validate_hours("Estimated hours", estimated_hours)?;
        if let Some(due) = new.due_date {
            validate_due_date(due, self.today())?;
        }

        let task = self.write(|tx, now| {
            ensure_project(tx, &new.project_id)?;
            let id = generate_unique_id(Task::ID_PREFIX, &title, &now, |candidate| {
                row_exists(tx, Task::ITEM_TABLE, candidate)
            })?;
            let ts = format_timestamp(&now);
            tx.execute(
                "INSERT INTO tasks (id, project_id, title, description, assignee, status,
                 priority, estimated_hours, actual_hours, due_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?10, ?10)",
                params![
                    id,
                    new.project_id,
                    title,
                    new.description,
                    assignee,
                    TaskStatus::ToDo.as_str(),
                    new.priority.as_str(),
                    estimated_hours,
                    new.due_date.as_ref().map(format_date),
                    ts,
                ],
            )?;
            for prerequisite in prerequisites {
                insert_edge::<Task>(tx, &id, prerequisite, DependencyType::Blocks, now)?;
            }
            load_task(tx, &id)
        })?;

        info!(
            task = %task.id,
            project = %task.project_id,
            prerequisites = prerequisites.len(),
            "created task"
        );
        Ok(task)
    }

    /// Get a task by ID.
    pub fn get_task(&self, id: &str) -> Result<Task> {
        load_task(&self.conn, id)
    }

    /// Check if a task exists.
    pub fn task_exists(&self, id: &str) -> Result<bool> {
        row_exists(&self.conn, Task::ITEM_TABLE, id)
    }

    /// Edit a task's plain fields. Status, lifecycle timestamps, and edges are
    /// left untouched.
    pub fn update_task(&mut self, id: &str, update: &TaskUpdate) -> Result<Task> {
        let title = update
            .title
            .as_deref()
            .map(|t| validate_name("Title", t))
            .transpose()?;
        if let Some(desc) = &update.description {
            validate_description(desc)?;
        }
        let assignee = update.assignee.as_deref().map(validate_assignee).transpose()?;
        if let Some(hours) = update.estimated_hours {
            validate_hours("Estimated hours", hours)?;
        }
        if let Some(hours) = update.actual_hours {
            validate_hours("Actual hours", hours)?;
        }
        if let Some(due) = update.due_date {
            validate_due_date(due, self.today())?;
        }

        if update.is_empty() {
            return self.get_task(id);
        }

        let task = self.write(|tx, now| {
            let current = load_task(tx, id)?;
            tx.execute(
                "UPDATE tasks SET title = ?1, description = ?2, assignee = ?3, priority = ?4,
                 estimated_hours = ?5, actual_hours = ?6, due_date = ?7, updated_at = ?8
                 WHERE id = ?9",
                params![
                    title.as_deref().unwrap_or(&current.title),
                    update.description.as_deref().or(current.description.as_deref()),
                    assignee.as_deref().or(current.assignee.as_deref()),
                    update.priority.unwrap_or(current.priority).as_str(),
                    update.estimated_hours.unwrap_or(current.estimated_hours),
                    update.actual_hours.unwrap_or(current.actual_hours),
                    update.due_date.or(current.due_date).as_ref().map(format_date),
                    format_timestamp(&now),
                    id,
                ],
            )?;
            load_task(tx, id)
        })?;

        info!(task = %id, "updated task");
        Ok(task)
    }

    /// Set a task's status, deriving `started_at`/`completed_at` from the
    /// transition. Writing the current status again changes nothing.
    pub fn update_task_status(&mut self, id: &str, status: TaskStatus) -> Result<Task> {
        let (from, task) = self.write(|tx, now| {
            let current = load_task(tx, id)?;
            if current.status == status {
                return Ok((current.status, current));
            }

            let stamps = Task::transition(
                current.status,
                status,
                Timestamps {
                    started_at: current.started_at,
                    completed_at: current.completed_at,
                },
                now,
            );
            tx.execute(
                "UPDATE tasks SET status = ?1, started_at = ?2, completed_at = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![
                    status.as_str(),
                    stamps.started_at.as_ref().map(format_timestamp),
                    stamps.completed_at.as_ref().map(format_timestamp),
                    format_timestamp(&now),
                    id,
                ],
            )?;
            Ok((current.status, load_task(tx, id)?))
        })?;

        if from != status {
            info!(task = %id, from = %from, to = %status, "task status changed");
        }
        Ok(task)
    }

    /// Delete a task and every edge that references it.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        self.write(|tx, _| {
            let affected = tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(Error::TaskNotFound(id.to_string()));
            }
            Ok(())
        })?;
        info!(task = %id, "deleted task");
        Ok(())
    }

    /// List a project's tasks, oldest first, optionally by status.
    pub fn list_tasks(&self, project_id: &str, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let filter = TaskFilter {
            status,
            ..TaskFilter::default()
        };
        self.filter_tasks(project_id, &filter)
    }

    /// List a project's tasks matching every set field of `filter`.
    pub fn filter_tasks(&self, project_id: &str, filter: &TaskFilter) -> Result<Vec<Task>> {
        ensure_project(&self.conn, project_id)?;

        let mut conditions = vec!["t.project_id = ?".to_string()];
        let mut params_vec: Vec<String> = vec![project_id.to_string()];

        if let Some(status) = filter.status {
            conditions.push("t.status = ?".to_string());
            params_vec.push(status.as_str().to_string());
        }
        if let Some(priority) = filter.priority {
            conditions.push("t.priority = ?".to_string());
            params_vec.push(priority.as_str().to_string());
        }
        if let Some(assignee) = &filter.assignee {
            conditions.push("t.assignee = ?".to_string());
            params_vec.push(assignee.trim().to_string());
        }
        if let Some(from) = &filter.due_from {
            conditions.push("t.due_date >= ?".to_string());
            params_vec.push(format_date(from));
        }
        if let Some(to) = &filter.due_to {
            conditions.push("t.due_date <= ?".to_string());
            params_vec.push(format_date(to));
        }
        if let Some(has) = filter.has_prerequisites {
            let exists = "EXISTS (SELECT 1 FROM task_dependencies d WHERE d.dependent_id = t.id)";
            conditions.push(if has {
                exists.to_string()
            } else {
                format!("NOT {exists}")
            });
        }
        if let Some(overdue) = filter.overdue {
            let expr = "(t.status != 'Done' AND t.due_date IS NOT NULL AND t.due_date < ?)";
            conditions.push(if overdue {
                expr.to_string()
            } else {
                format!("NOT {expr}")
            });
            params_vec.push(format_date(&self.today()));
        }

        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t WHERE {} ORDER BY t.created_at, t.rowid{}",
            conditions.join(" AND "),
            limit_clause(filter.limit),
        );
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|s| s as &dyn ToSql).collect();
        query_tasks(&self.conn, &sql, &params_refs)
    }

    /// Case-insensitive substring search over title and description.
    pub fn search_tasks(
        &self,
        project_id: &str,
        text: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Task>> {
        ensure_project(&self.conn, project_id)?;
        let pattern = like_pattern(text.trim());
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t
             WHERE t.project_id = ?1
               AND (fold_case(t.title) LIKE ?2 ESCAPE '\\'
                    OR fold_case(COALESCE(t.description, '')) LIKE ?2 ESCAPE '\\')
             ORDER BY t.created_at, t.rowid{}",
            limit_clause(limit),
        );
        query_tasks(&self.conn, &sql, params![project_id, pattern])
    }

    /// A project's tasks ordered by `field`. Tasks without a due date sort
    /// last for [`SortField::DueDate`] in either direction.
    pub fn sorted_tasks(
        &self,
        project_id: &str,
        field: SortField,
        order: SortOrder,
        limit: Option<usize>,
    ) -> Result<Vec<Task>> {
        ensure_project(&self.conn, project_id)?;
        let nulls_last = if field == SortField::DueDate {
            "t.due_date IS NULL, "
        } else {
            ""
        };
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t WHERE t.project_id = ?1
             ORDER BY {nulls_last}{} {}, t.created_at, t.rowid{}",
            field.sql_expr(),
            order.sql(),
            limit_clause(limit),
        );
        query_tasks(&self.conn, &sql, params![project_id])
    }

    /// Tasks that are not done and have no open `Blocks`/`DependsOn`
    /// prerequisite. `RelatedTo` edges never hold a task back.
    pub fn ready_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        ensure_project(&self.conn, project_id)?;
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t
             WHERE t.project_id = ?1 AND t.status != 'Done' AND NOT {HAS_OPEN_GATE}
             ORDER BY t.created_at, t.rowid"
        );
        query_tasks(&self.conn, &sql, params![project_id])
    }

    /// Returns true if the task has an open `Blocks`/`DependsOn` prerequisite.
    pub fn is_task_blocked(&self, id: &str) -> Result<bool> {
        let sql = format!("SELECT {HAS_OPEN_GATE} FROM tasks t WHERE t.id = ?1");
        self.conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()?
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
