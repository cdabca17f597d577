// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Task query parameters: filters and sort orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::task::{Priority, TaskStatus};

/// Conjunctive filter over a project's tasks. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    /// Due on or after this date.
    pub due_from: Option<NaiveDate>,
    /// Due on or before this date.
    pub due_to: Option<NaiveDate>,
    /// Whether the task has at least one prerequisite edge.
    pub has_prerequisites: Option<bool>,
    /// Whether the task is overdue as of the database clock.
    pub overdue: Option<bool>,
    pub limit: Option<usize>,
}

/// Field a task listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    Title,
    Status,
    Priority,
    DueDate,
    #[default]
    CreatedAt,
    UpdatedAt,
    EstimatedHours,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Status => "status",
            SortField::Priority => "priority",
            SortField::DueDate => "due_date",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::EstimatedHours => "estimated_hours",
        }
    }

    /// SQL expression ordering tasks aliased as `t` by this field.
    pub(crate) fn sql_expr(&self) -> &'static str {
        match self {
            SortField::Title => "t.title COLLATE NOCASE",
            SortField::Status => {
                "CASE t.status WHEN 'ToDo' THEN 0 WHEN 'InProgress' THEN 1 \
                 WHEN 'Review' THEN 2 ELSE 3 END"
            }
            SortField::Priority => {
                "CASE t.priority WHEN 'Low' THEN 0 WHEN 'Medium' THEN 1 \
                 WHEN 'High' THEN 2 ELSE 3 END"
            }
            SortField::DueDate => "t.due_date",
            SortField::CreatedAt => "t.created_at",
            SortField::UpdatedAt => "t.updated_at",
            SortField::EstimatedHours => "t.estimated_hours",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "title" => Ok(SortField::Title),
            "status" => Ok(SortField::Status),
            "priority" => Ok(SortField::Priority),
            "due_date" | "due" => Ok(SortField::DueDate),
            "created_at" | "created" => Ok(SortField::CreatedAt),
            "updated_at" | "updated" => Ok(SortField::UpdatedAt),
            "estimated_hours" | "estimate" => Ok(SortField::EstimatedHours),
            _ => Err(Error::InvalidInput(format!(
                "invalid sort field: '{s}'\n  hint: valid fields are: title, status, priority, due_date, created_at, updated_at, estimated_hours"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub(crate) fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(Error::InvalidInput(format!(
                "invalid sort order: '{s}'\n  hint: use asc or desc"
            ))),
        }
    }
}

/// Escapes `%`, `_`, and `\` for a `LIKE ... ESCAPE '\'` pattern, lowercased
/// to match `fold_case` on the column side.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
