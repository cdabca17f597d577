// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::Result;
use crate::stats::{
    milestone_statistics, task_statistics, MilestoneStatistics, ProjectStatistics, TaskStatistics,
};

use super::Database;

impl Database {
    /// Task statistics for a project as of the database clock's today.
    pub fn task_statistics(&self, project_id: &str) -> Result<TaskStatistics> {
        let tasks = self.list_tasks(project_id, None)?;
        Ok(task_statistics(&tasks, self.today()))
    }

    /// Milestone statistics for a project as of the database clock's today.
    pub fn milestone_statistics(&self, project_id: &str) -> Result<MilestoneStatistics> {
        let milestones = self.list_milestones(project_id, None)?;
        Ok(milestone_statistics(&milestones, self.today()))
    }

    /// Task and milestone statistics for a project, read in one transaction
    /// so both halves describe the same state.
    pub fn project_statistics(&self, project_id: &str) -> Result<ProjectStatistics> {
        let today = self.today();
        let tx = self.conn.unchecked_transaction()?;
        let tasks = self.list_tasks(project_id, None)?;
        let milestones = self.list_milestones(project_id, None)?;
        tx.commit()?;

        Ok(ProjectStatistics {
            project_id: project_id.to_string(),
            as_of: today,
            tasks: task_statistics(&tasks, today),
            milestones: milestone_statistics(&milestones, today),
        })
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
