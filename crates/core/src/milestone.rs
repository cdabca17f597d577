// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Milestone types: the binary-state work item.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A dated checkpoint inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier (format: `ms-{hash}`).
    pub id: String,
    /// Owning project; immutable after creation.
    pub project_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always present for milestones.
    pub due_date: NaiveDate,
    pub is_completed: bool,
    /// Set when the milestone is completed; cleared when reopened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Milestone {
    /// Incomplete and past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed && self.due_date < today
    }

    /// Incomplete and due today or later.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        !self.is_completed && self.due_date >= today
    }
}

/// Fields supplied by the caller when creating a milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
}

impl NewMilestone {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>, due_date: NaiveDate) -> Self {
        NewMilestone {
            project_id: project_id.into(),
            name: name.into(),
            description: None,
            due_date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A partial edit of a milestone's plain fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestoneUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[cfg(test)]
#[path = "milestone_tests.rs"]
mod tests;
