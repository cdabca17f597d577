// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::error::{Error, Result};
use crate::id::{generate_unique_id, PROJECT_PREFIX};
use crate::project::Project;
use crate::validate::{validate_description, validate_name};

use super::{format_timestamp, parse_timestamp, row_exists, Database};

const PROJECT_COLUMNS: &str = "id, name, description, created_at, updated_at";

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let created_str: String = row.get(3)?;
    let updated_str: String = row.get(4)?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

pub(crate) fn load_project(conn: &Connection, id: &str) -> Result<Project> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1");
    conn.query_row(&sql, params![id], project_from_row)
        .optional()?
        .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
}

pub(crate) fn ensure_project(conn: &Connection, id: &str) -> Result<()> {
    if row_exists(conn, "projects", id)? {
        Ok(())
    } else {
        Err(Error::ProjectNotFound(id.to_string()))
    }
}

impl Database {
    /// Create a project.
    pub fn create_project(&mut self, name: &str, description: Option<&str>) -> Result<Project> {
        let name = validate_name("Name", name)?;
        if let Some(desc) = description {
            validate_description(desc)?;
        }

        let project = self.write(|tx, now| {
            let id = generate_unique_id(PROJECT_PREFIX, &name, &now, |candidate| {
                row_exists(tx, "projects", candidate)
            })?;
            tx.execute(
                "INSERT INTO projects (id, name, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![id, name, description, format_timestamp(&now)],
            )?;
            load_project(tx, &id)
        })?;

        info!(project = %project.id, "created project");
        Ok(project)
    }

    /// Get a project by ID.
    pub fn get_project(&self, id: &str) -> Result<Project> {
        load_project(&self.conn, id)
    }

    /// Check if a project exists.
    pub fn project_exists(&self, id: &str) -> Result<bool> {
        row_exists(&self.conn, "projects", id)
    }

    /// List all projects, oldest first.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at, rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    /// Delete a project together with its tasks, milestones, and edges.
    pub fn delete_project(&mut self, id: &str) -> Result<()> {
        self.write(|tx, _| {
            let affected = tx.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(Error::ProjectNotFound(id.to_string()));
            }
            Ok(())
        })?;
        info!(project = %id, "deleted project");
        Ok(())
    }
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
