// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::edge::DependencyType;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::kind::WorkItemKind;
use crate::lifecycle::{Lifecycle, Timestamps};
use crate::milestone::{Milestone, MilestoneUpdate, NewMilestone};
use crate::validate::{validate_description, validate_due_date, validate_name};

use super::deps::insert_edge;
use super::projects::ensure_project;
use super::{
    format_date, format_timestamp, parse_date, parse_timestamp, parse_timestamp_opt, row_exists,
    Database,
};

const MILESTONE_COLUMNS: &str =
    "id, project_id, name, description, due_date, is_completed, completed_at, created_at, updated_at";

fn milestone_from_row(row: &Row<'_>) -> rusqlite::Result<Milestone> {
    let due_str: String = row.get(4)?;
    let created_str: String = row.get(7)?;
    let updated_str: String = row.get(8)?;
    Ok(Milestone {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        due_date: parse_date(&due_str, "due_date")?,
        is_completed: row.get(5)?,
        completed_at: parse_timestamp_opt(row.get(6)?, "completed_at")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

pub(crate) fn load_milestone(conn: &Connection, id: &str) -> Result<Milestone> {
    let sql = format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE id = ?1");
    conn.query_row(&sql, params![id], milestone_from_row)
        .optional()?
        .ok_or_else(|| Error::MilestoneNotFound(id.to_string()))
}

impl Database {
    /// Create a milestone, optionally with initial prerequisite milestones.
    pub fn create_milestone(
        &mut self,
        new: &NewMilestone,
        prerequisites: &[String],
    ) -> Result<Milestone> {
        let name = validate_name("Name", &new.name)?;
        if let Some(desc) = &new.description {
            validate_description(desc)?;
        }
        validate_due_date(new.due_date, self.today())?;

        let milestone = self.write(|tx, now| {
            ensure_project(tx, &new.project_id)?;
            let id = generate_unique_id(Milestone::ID_PREFIX, &name, &now, |candidate| {
                row_exists(tx, Milestone::ITEM_TABLE, candidate)
            })?;
            tx.execute(
                "INSERT INTO milestones (id, project_id, name, description, due_date,
                 is_completed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
                params![
                    id,
                    new.project_id,
                    name,
                    new.description,
                    format_date(&new.due_date),
                    format_timestamp(&now),
                ],
            )?;
            for prerequisite in prerequisites {
                insert_edge::<Milestone>(tx, &id, prerequisite, DependencyType::Blocks, now)?;
            }
            load_milestone(tx, &id)
        })?;

        info!(
            milestone = %milestone.id,
            project = %milestone.project_id,
            due = %milestone.due_date,
            "created milestone"
        );
        Ok(milestone)
    }

    /// Get a milestone by ID.
    pub fn get_milestone(&self, id: &str) -> Result<Milestone> {
        load_milestone(&self.conn, id)
    }

    /// Edit a milestone's name, description, or due date.
    pub fn update_milestone(&mut self, id: &str, update: &MilestoneUpdate) -> Result<Milestone> {
        let name = update
            .name
            .as_deref()
            .map(|n| validate_name("Name", n))
            .transpose()?;
        if let Some(desc) = &update.description {
            validate_description(desc)?;
        }
        if let Some(due) = update.due_date {
            validate_due_date(due, self.today())?;
        }

        if *update == MilestoneUpdate::default() {
            return self.get_milestone(id);
        }

        let milestone = self.write(|tx, now| {
            let current = load_milestone(tx, id)?;
            tx.execute(
                "UPDATE milestones SET name = ?1, description = ?2, due_date = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![
                    name.as_deref().unwrap_or(&current.name),
                    update.description.as_deref().or(current.description.as_deref()),
                    format_date(&update.due_date.unwrap_or(current.due_date)),
                    format_timestamp(&now),
                    id,
                ],
            )?;
            load_milestone(tx, id)
        })?;

        info!(milestone = %id, "updated milestone");
        Ok(milestone)
    }

    /// Mark a milestone completed or reopen it, deriving `completed_at`.
    pub fn set_milestone_completed(&mut self, id: &str, completed: bool) -> Result<Milestone> {
        let (changed, milestone) = self.write(|tx, now| {
            let current = load_milestone(tx, id)?;
            if current.is_completed == completed {
                return Ok((false, current));
            }

            let stamps = Milestone::transition(
                current.is_completed,
                completed,
                Timestamps {
                    started_at: None,
                    completed_at: current.completed_at,
                },
                now,
            );
            tx.execute(
                "UPDATE milestones SET is_completed = ?1, completed_at = ?2, updated_at = ?3
                 WHERE id = ?4",
                params![
                    completed,
                    stamps.completed_at.as_ref().map(format_timestamp),
                    format_timestamp(&now),
                    id,
                ],
            )?;
            Ok((true, load_milestone(tx, id)?))
        })?;

        if changed {
            info!(milestone = %id, completed, "milestone completion changed");
        }
        Ok(milestone)
    }

    /// Delete a milestone and every edge that references it.
    pub fn delete_milestone(&mut self, id: &str) -> Result<()> {
        self.write(|tx, _| {
            let affected = tx.execute("DELETE FROM milestones WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(Error::MilestoneNotFound(id.to_string()));
            }
            Ok(())
        })?;
        info!(milestone = %id, "deleted milestone");
        Ok(())
    }

    /// List a project's milestones by due date, optionally by completion.
    pub fn list_milestones(
        &self,
        project_id: &str,
        completed: Option<bool>,
    ) -> Result<Vec<Milestone>> {
        ensure_project(&self.conn, project_id)?;
        let mut sql = format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE project_id = ?1");
        if completed.is_some() {
            sql.push_str(" AND is_completed = ?2");
        }
        sql.push_str(" ORDER BY due_date, created_at, rowid");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = match completed {
            Some(flag) => stmt.query_map(params![project_id, flag], milestone_from_row)?,
            None => stmt.query_map(params![project_id], milestone_from_row)?,
        };
        let milestones = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(milestones)
    }
}

#[cfg(test)]
#[path = "milestones_tests.rs"]
mod tests;
